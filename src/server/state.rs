//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BatchOrchestrator;
use crate::core::strategy::StrategyRegistry;
use crate::storage::Database;
use crate::utils::classifier::DefaultErrorClassifier;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across worker
/// threads.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Database handle
    pub database: Arc<Database>,
    /// Registered command strategies
    pub registry: Arc<StrategyRegistry>,
    /// Batch orchestrator
    pub orchestrator: Arc<BatchOrchestrator>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, database: Database, registry: StrategyRegistry) -> Self {
        let config = Arc::new(config);
        let registry = Arc::new(registry);
        let orchestrator = Arc::new(BatchOrchestrator::new(
            Arc::clone(&registry),
            Arc::new(DefaultErrorClassifier),
            config.batch(),
        ));

        Self {
            config,
            database: Arc::new(database),
            registry,
            orchestrator,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
