//! Main entry point for the visit-queue coordinator.
//!
//! Boots the REST API around a single shared Queue State Engine. The
//! engine models exactly one queue (the reference system's behaviour); a
//! multi-doctor deployment would instantiate one engine per entry code.
//!
//! # Environment Variables
//! - `VQ_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
//! - `VQ_AVG_WAIT_MINUTES`: Per-patient wait estimate in minutes (default: 15)
//!
//! Variables may also be supplied through a `.env` file.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use vq_core::{avg_wait_from_env_value, CoreConfig};

/// Starts the visit-queue REST server.
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("vq=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("VQ_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let avg_wait = avg_wait_from_env_value(std::env::var("VQ_AVG_WAIT_MINUTES").ok())?;
    let cfg = CoreConfig::new(avg_wait)?;
    tracing::info!("per-patient wait estimate: {} minutes", avg_wait);

    api_rest::serve(&addr, AppState::new(&cfg)).await
}
