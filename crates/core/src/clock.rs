use chrono::{DateTime, Utc};

/// Source of "now" for cache freshness decisions.
///
/// Production uses [`SystemClock`]; tests inject a manual clock so TTL
/// boundaries can be crossed without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
