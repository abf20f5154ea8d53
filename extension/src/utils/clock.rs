//! Clock source used for the fallback record timestamp

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::time::millis_to_datetime;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis_to_datetime(millis))
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shared handle to a clock
pub type SharedClock = Arc<dyn Clock>;

/// Default clock handle (wall clock)
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}
