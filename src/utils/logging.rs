//! Logging initialization
//!
//! Sets up the tracing subscriber from the gateway's logging configuration.
//! `RUST_LOG` takes precedence over the configured level when set.

use crate::config::LoggingConfig;
use crate::utils::error::{GatewayError, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Safe to call more than once; later calls are no-ops so tests can share a
/// process with an already-initialized subscriber.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| GatewayError::Config(format!("invalid log level '{}': {}", config.level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    // A subscriber may already be installed (tests, embedders); that is fine.
    let _ = result;
    Ok(())
}
