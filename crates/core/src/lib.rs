//! Shared domain model and configuration for Salescope.
//!
//! This crate holds the pieces every other crate depends on:
//! - the order domain types (`domain::order`) mirroring the sales API wire
//!   shape, tolerant of fields we do not model,
//! - calendar date ranges (`domain::dates`) used to bound order filtering,
//! - layered application configuration (`config`),
//! - the injectable clock seam (`clock`) that keeps cache TTL logic
//!   deterministic under test.

pub mod clock;
pub mod config;
pub mod domain;

pub use clock::{Clock, SystemClock};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
pub use domain::dates::DateRange;
pub use domain::order::{LineItem, Order, LOCKED_STATE};
