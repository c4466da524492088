//! Database connection management
//!
//! Thin wrapper over a sea-orm connection pool. The batch engine persists
//! nothing itself; this layer exists for the transaction contract the
//! coordinator consumes and as the unit of work handed to strategies.

use crate::config::DatabaseConfig;
use crate::utils::error::{GatewayError, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait,
};
use std::time::Duration;
use tracing::{debug, info};

/// Gateway database handle
#[derive(Debug)]
pub struct Database {
    conn: DatabaseConnection,
}

impl Database {
    /// Open a connection pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let conn = sea_orm::Database::connect(options)
            .await
            .map_err(GatewayError::Database)?;

        info!("Database connection established");
        Ok(Self { conn })
    }

    /// The pooled connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Begin a transaction enclosing one batch envelope
    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        debug!("opening batch transaction");
        self.conn.begin().await.map_err(GatewayError::Database)
    }

    /// Verify the connection is alive
    pub async fn ping(&self) -> Result<()> {
        self.conn.ping().await.map_err(GatewayError::Database)
    }

    /// Name of the active database backend
    pub fn backend_name(&self) -> &'static str {
        match self.conn.get_database_backend() {
            sea_orm::DbBackend::Postgres => "postgres",
            sea_orm::DbBackend::MySql => "mysql",
            sea_orm::DbBackend::Sqlite => "sqlite",
        }
    }
}
