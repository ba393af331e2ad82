//! Clock capability for the engine.
//!
//! Join timestamps are a pure function of "current time", injected rather
//! than read from the system clock inside the engine, so tests can supply
//! fixed instants.

use chrono::{DateTime, Local};

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    /// Clock pinned to a single instant.
    pub struct FixedClock(pub DateTime<Local>);

    impl FixedClock {
        /// 2024-03-01 09:41:30 local time.
        pub fn morning() -> Self {
            Self(
                Local
                    .with_ymd_and_hms(2024, 3, 1, 9, 41, 30)
                    .single()
                    .expect("unambiguous local time"),
            )
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }
}
