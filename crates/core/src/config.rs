//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! the engine, rather than read from environment variables during request
//! handling, which behaves inconsistently in multi-threaded runtimes and
//! test harnesses.

/// Default per-patient service estimate, in minutes, used for the average
/// wait projection.
pub const DEFAULT_AVG_WAIT_MINUTES: u32 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid per-patient wait estimate: {0}")]
    InvalidAvgWait(String),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    avg_wait_minutes: u32,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `avg_wait_minutes` is the fixed per-patient service estimate that
    /// the wait projection multiplies by queue length. Zero is rejected:
    /// it would make every wait estimate zero regardless of queue depth.
    pub fn new(avg_wait_minutes: u32) -> Result<Self, ConfigError> {
        if avg_wait_minutes == 0 {
            return Err(ConfigError::InvalidAvgWait(
                "estimate must be at least one minute".into(),
            ));
        }
        Ok(Self { avg_wait_minutes })
    }

    pub fn avg_wait_minutes(&self) -> u32 {
        self.avg_wait_minutes
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            avg_wait_minutes: DEFAULT_AVG_WAIT_MINUTES,
        }
    }
}

/// Parse the per-patient wait estimate from an environment variable value
/// without reading the environment here.
///
/// `None` (variable unset) resolves to [`DEFAULT_AVG_WAIT_MINUTES`].
pub fn avg_wait_from_env_value(value: Option<String>) -> Result<u32, ConfigError> {
    match value {
        None => Ok(DEFAULT_AVG_WAIT_MINUTES),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidAvgWait(raw.clone()))
            .and_then(|minutes| {
                if minutes == 0 {
                    Err(ConfigError::InvalidAvgWait(raw))
                } else {
                    Ok(minutes)
                }
            }),
    }
}
