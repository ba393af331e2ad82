//! # API Shared
//!
//! Request/response types shared by the visit-queue REST API and its
//! clients (the `vq` CLI talks to the server with these).
//!
//! Wire JSON uses camelCase field names throughout. Positions keep the
//! engine's convention: 1-based for waiting patients, with `0` as the
//! "not found" sentinel from position lookup.

pub mod health;
pub mod queue;

pub use health::HealthRes;
pub use queue::{
    CallNextRes, ClearCurrentRes, CurrentRes, DoctorReq, DoctorRes, JoinReq, JoinRes, PatientDto,
    PauseRes, PositionRes, QueueRes, RegisterReq, RegisterRes, SkipRes, StatsRes,
};
