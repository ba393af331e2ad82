//! # VQ Core
//!
//! Core business logic for the visit-queue coordinator: the Queue State
//! Engine that owns the ordered waiting list, the currently-served patient,
//! the pause flag and the served counter.
//!
//! This crate contains pure in-memory queue operations:
//! - Joining the queue and position lookup for waiting patients
//! - Advancing the queue (call-next) and skipping the head patient
//! - Derived queue statistics, recomputed on every read
//!
//! **No API concerns**: HTTP servers, request validation, or service
//! interfaces belong in `api-rest` and `api-shared`. The engine is total —
//! every operation always returns; absence is signalled with sentinel
//! values (`None` from call-next, `0` from position lookup), never errors.
//!
//! The engine assumes one logical writer at a time. Callers in a
//! multi-writer environment (concurrent HTTP handlers) must serialise the
//! mutating operations externally, e.g. behind a mutex.

pub mod clock;
pub mod config;
pub mod patient;
pub mod queue;
pub mod stats;

pub use clock::{Clock, SystemClock};
pub use config::{avg_wait_from_env_value, ConfigError, CoreConfig};
pub use patient::{Patient, PatientId, PatientStatus};
pub use queue::VisitQueue;
pub use stats::QueueStats;
