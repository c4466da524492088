//! # batchgate
//!
//! A batch request orchestration gateway: one HTTP call delivers an ordered
//! envelope of sub-requests, the engine resolves the dependency graph
//! between them, executes each sub-request against registered command
//! strategies in dependency order, substitutes values from parent responses
//! into child parameters, and returns one consolidated response array,
//! optionally all-or-nothing inside a single database transaction.
//!
//! ## Features
//!
//! - **Dependency-ordered execution**: sub-requests reference each other by
//!   `requestId`; parents always complete before their children run
//! - **Parameter substitution**: `$.field` placeholders in a child's URL and
//!   body resolve against its parent's response body
//! - **Failure containment**: a strategy failure becomes that sub-request's
//!   response and cascades 409s down its subtree; sibling branches are
//!   unaffected
//! - **Enclosed transactions**: `enclosingTransaction=true` wraps the whole
//!   envelope in one database transaction with all-or-nothing semantics
//! - **Deterministic responses**: the result array is always sorted by
//!   `requestId`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use batchgate::{Config, Gateway, StrategyRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let registry = StrategyRegistry::new();
//!     // register the platform's command strategies here
//!     let gateway = Gateway::new(config, registry).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Library Mode
//!
//! Embedders that already have an HTTP surface can drive the
//! [`BatchOrchestrator`] directly and skip the server entirely.

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::batch::{
    assemble, BatchHeader, BatchOrchestrator, BatchRequest, BatchRequestNode, BatchResponse,
    ErrorInfo, Method,
};
pub use crate::core::models::{CommandContext, DbHandle};
pub use crate::core::strategy::{CommandStrategy, RouteTemplate, StrategyRegistry};
pub use crate::storage::Database;
pub use crate::utils::classifier::{DefaultErrorClassifier, ErrorClassifier};
pub use crate::utils::error::{GatewayError, Result};

use tracing::info;

/// A standalone gateway instance: configuration plus HTTP server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance over a strategy registry
    pub async fn new(config: Config, registry: StrategyRegistry) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config, registry).await?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting batchgate");
        info!("Listening on {}", self.config.server().address());

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Gateway build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build metadata captured at compile time
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
