use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use salescope_core::{Clock, Order};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::envelope::{normalize_envelope, EnvelopeError};
use crate::transport::{OrderTransport, TransportError};

#[derive(Debug, Error)]
pub enum OrderFetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

struct CachedOrders {
    orders: Arc<Vec<Order>>,
    fetched_at: DateTime<Utc>,
}

/// Fetches the recent-order list, caching a successful snapshot for the
/// configured TTL.
///
/// The single mutex guard spans the freshness check, the fetch, and the
/// store, so concurrent callers cannot race a stale check into a double
/// fetch. A failed fetch leaves any previous snapshot in place; it will be
/// served again once the next call finds it fresh, which for a stale entry
/// means never (staleness only ends by a successful refetch).
pub struct OrderService {
    transport: Arc<dyn OrderTransport>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    cache: Mutex<Option<CachedOrders>>,
}

/// Upper bound on the cache TTL, matching `orders.cache_ttl_secs` config
/// validation. `new` clamps to it so a direct caller cannot pick a TTL that
/// overflows chrono's duration arithmetic.
const MAX_TTL_SECS: i64 = 86_400;

impl OrderService {
    pub fn new(transport: Arc<dyn OrderTransport>, clock: Arc<dyn Clock>, ttl_secs: u64) -> Self {
        let ttl_secs = i64::try_from(ttl_secs).unwrap_or(MAX_TTL_SECS).min(MAX_TTL_SECS);
        Self { transport, clock, ttl: Duration::seconds(ttl_secs), cache: Mutex::new(None) }
    }

    /// Return the order snapshot, fetching only when the cache is empty or
    /// past its TTL. Errors report this call's failure; the cache itself is
    /// never corrupted or cleared by one.
    pub async fn get_orders(&self) -> Result<Arc<Vec<Order>>, OrderFetchError> {
        let mut slot = self.cache.lock().await;
        let now = self.clock.now();

        if let Some(entry) = slot.as_ref() {
            if now - entry.fetched_at < self.ttl {
                debug!(
                    fetched_at = %entry.fetched_at,
                    order_count = entry.orders.len(),
                    "serving cached order snapshot"
                );
                return Ok(Arc::clone(&entry.orders));
            }
        }

        info!("fetching fresh data from order api");
        let body = self.transport.fetch().await?;
        let orders = Arc::new(normalize_envelope(&body)?);

        info!(order_count = orders.len(), "order snapshot fetched and cached");
        *slot = Some(CachedOrders { orders: Arc::clone(&orders), fetched_at: now });
        Ok(orders)
    }
}
