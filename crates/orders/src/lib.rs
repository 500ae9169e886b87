//! Order acquisition and filtering.
//!
//! The pipeline's data side: fetch the recent-order list over HTTP behind a
//! time-bounded in-memory cache, normalize whichever response envelope the
//! API chooses to send, and narrow the snapshot down to completed orders
//! inside a resolved date range.

pub mod envelope;
pub mod filter;
pub mod service;
pub mod transport;

pub use envelope::{normalize_envelope, EnvelopeError};
pub use filter::filter_orders;
pub use service::{OrderFetchError, OrderService};
pub use transport::{HttpOrderTransport, OrderTransport, TransportError};
