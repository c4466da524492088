//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::strategy::StrategyRegistry;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::Database;
use crate::utils::error::Result;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer as ActixHttpServer};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Connects the database and wires the orchestrator over the supplied
    /// strategy registry.
    pub async fn new(config: &Config, registry: StrategyRegistry) -> Result<Self> {
        info!("Creating HTTP server");

        if registry.is_empty() {
            warn!("No command strategies registered; every sub-request will fail dispatch");
        }

        let database = Database::connect(config.database()).await?;
        let state = AppState::new(config.clone(), database, registry);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Application state, for embedders that drive the orchestrator
    /// directly
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let state = web::Data::new(self.state);
        let cors_config = state.config.server().cors.clone();
        let max_body_size = self.config.max_body_size;

        info!("Setting up routes and middleware");

        let server = ActixHttpServer::new(move || {
            let cors = if cors_config.enabled {
                let mut cors = Cors::default()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header();
                if cors_config.allows_all_origins() {
                    cors = cors.allow_any_origin();
                } else {
                    for origin in &cors_config.allowed_origins {
                        cors = cors.allowed_origin(origin);
                    }
                }
                cors
            } else {
                Cors::default()
            };

            App::new()
                .app_data(state.clone())
                .app_data(web::JsonConfig::default().limit(max_body_size))
                .wrap(TracingLogger::default())
                .wrap(cors)
                .configure(routes::batch::configure_routes)
                .configure(routes::health::configure_routes)
        })
        .workers(self.config.worker_count())
        .bind(self.config.address())?;

        info!("HTTP server listening on {}", self.config.address());
        server.run().await?;
        Ok(())
    }
}
