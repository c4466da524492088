//! Server builder and run_server function
//!
//! The builder wires configuration and the strategy registry into an
//! [`HttpServer`]; `run_server` is the binary's automatic entry point.

use crate::config::Config;
use crate::core::strategy::StrategyRegistry;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
    registry: StrategyRegistry,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: None,
            registry: StrategyRegistry::new(),
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the command strategy registry
    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config, self.registry).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    // Auto-load configuration file, fall back to environment + defaults
    let config_path = "config/gateway.yaml";
    let (config, config_source) = match Config::from_file(config_path).await {
        Ok(config) => (config, config_path),
        Err(_) => (Config::from_env()?, "environment"),
    };

    crate::utils::logging::init(config.logging())?;

    info!("🚀 Starting batchgate");
    info!("✅ Configuration source: {}", config_source);

    let server = HttpServer::new(&config, StrategyRegistry::new()).await?;
    info!(
        "🌐 Server starting at: http://{}",
        config.server().address()
    );
    info!("📋 API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /health/detailed - Database and registry status");
    info!("   GET  /version - Build metadata");
    info!("   POST /v1/batches?enclosingTransaction=false - Batch envelope");

    server.start().await
}
