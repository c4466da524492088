//! Configuration validation

use crate::config::models::GatewayConfig;
use crate::utils::error::{GatewayError, Result};

/// Validation of configuration sections
pub trait Validate {
    /// Check the configuration for values the gateway cannot run with
    fn validate(&self) -> Result<()>;
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(GatewayError::Config("server.host must not be empty".to_string()));
        }
        if self.server.port == 0 {
            return Err(GatewayError::Config("server.port must not be 0".to_string()));
        }
        if self.server.max_body_size == 0 {
            return Err(GatewayError::Config(
                "server.max_body_size must not be 0".to_string(),
            ));
        }
        if self.database.url.is_empty() {
            return Err(GatewayError::Config("database.url must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(GatewayError::Config(
                "database.max_connections must not be 0".to_string(),
            ));
        }
        if self.batch.max_requests == 0 {
            return Err(GatewayError::Config(
                "batch.max_requests must not be 0".to_string(),
            ));
        }
        Ok(())
    }
}
