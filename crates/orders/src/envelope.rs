use salescope_core::Order;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Keys searched, in priority order, when the API wraps the order list in an
/// object instead of returning it bare.
pub const ENVELOPE_KEYS: [&str; 3] = ["data", "results", "orders"];

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("response body is not a recognized order envelope")]
    UnrecognizedShape,
    #[error("order list did not decode as order records: {0}")]
    MalformedOrders(#[from] serde_json::Error),
}

/// Normalize a raw response body into a flat order list.
///
/// A bare array is used directly; an object is searched under
/// [`ENVELOPE_KEYS`] for the first array-valued entry. Anything else is an
/// unrecognized shape and must not be cached by the caller.
pub fn normalize_envelope(body: &Value) -> Result<Vec<Order>, EnvelopeError> {
    let (source, list) = extract_order_list(body).ok_or(EnvelopeError::UnrecognizedShape)?;
    let orders: Vec<Order> = serde_json::from_value(Value::Array(list.clone()))?;
    info!(source, order_count = orders.len(), "order envelope normalized");
    Ok(orders)
}

fn extract_order_list(body: &Value) -> Option<(&'static str, &Vec<Value>)> {
    if let Some(list) = body.as_array() {
        return Some(("bare_array", list));
    }

    let object = body.as_object()?;
    ENVELOPE_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array).map(|list| (*key, list)))
}
