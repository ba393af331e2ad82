//! Derived queue statistics.

use serde::{Deserialize, Serialize};

/// Snapshot of the derived statistics, recomputed on every read.
///
/// `avg_wait_time` is a static multiplicative projection (queue length
/// times the configured per-patient estimate, in minutes), not a
/// measurement of real elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub total_patients: u32,
    pub patients_served: u64,
    pub avg_wait_time: u32,
    pub efficiency: u32,
}

impl QueueStats {
    /// Compute the statistics for the given counters.
    ///
    /// Efficiency is `round(served / (served + waiting) × 100)`; with an
    /// empty waiting sequence it is defined as 100, which also avoids
    /// dividing by zero when both counters are zero.
    pub(crate) fn derive(waiting: u32, served: u64, avg_wait_minutes: u32) -> Self {
        let efficiency = if waiting > 0 {
            let ratio = served as f64 / (served + u64::from(waiting)) as f64;
            (ratio * 100.0).round() as u32
        } else {
            100
        };

        Self {
            total_patients: waiting,
            patients_served: served,
            avg_wait_time: waiting * avg_wait_minutes,
            efficiency,
        }
    }
}
