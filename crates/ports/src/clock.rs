//! Time source boundary contract.

use chrono::{DateTime, Utc};

/// Boundary contract for reading the current time.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
