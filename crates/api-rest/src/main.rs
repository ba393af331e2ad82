//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the visit-queue REST API on its own. The workspace's main
//! `vq-run` binary is the usual entry point; this one is handy for
//! development and debugging of the REST surface.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use vq_core::{avg_wait_from_env_value, CoreConfig};

/// Main entry point for the standalone visit-queue REST API server.
///
/// # Environment Variables
/// - `VQ_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `VQ_AVG_WAIT_MINUTES`: Per-patient wait estimate in minutes (default: 15)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the wait estimate is not a positive integer, or
/// - the server address cannot be bound or the server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("VQ_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let avg_wait = avg_wait_from_env_value(std::env::var("VQ_AVG_WAIT_MINUTES").ok())?;
    let cfg = CoreConfig::new(avg_wait)?;

    api_rest::serve(&addr, AppState::new(&cfg)).await
}
