use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response used by monitoring and load balancers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

impl HealthRes {
    /// The standard "alive" response.
    pub fn alive() -> Self {
        Self {
            ok: true,
            message: "visit-queue API is alive".into(),
        }
    }
}
