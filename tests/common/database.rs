//! In-memory database helpers
//!
//! Each test database is a single-connection in-memory SQLite instance (a
//! pooled in-memory SQLite would open one database per connection) with a
//! `journal` table that journaling strategies write into, so tests can check
//! which sub-requests left visible side effects.

use batchgate::config::DatabaseConfig;
use batchgate::Database;
use sea_orm::{ConnectionTrait, DbBackend, Statement};

/// An isolated in-memory database with a journal table
pub struct TestDatabase {
    db: Database,
}

impl TestDatabase {
    /// Create a fresh in-memory database
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
        };
        let db = Database::connect(&config)
            .await
            .expect("in-memory database");

        db.connection()
            .execute_unprepared(
                "CREATE TABLE journal (request_id INTEGER NOT NULL, payload TEXT NOT NULL)",
            )
            .await
            .expect("journal table");

        Self { db }
    }

    /// The wrapped gateway database handle
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Number of journal rows currently visible
    pub async fn journal_count(&self) -> i64 {
        let row = self
            .db
            .connection()
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS cnt FROM journal",
            ))
            .await
            .expect("count query")
            .expect("count row");
        row.try_get::<i64>("", "cnt").expect("count column")
    }

    /// Request ids with visible journal rows, ascending
    pub async fn journal_ids(&self) -> Vec<i64> {
        let rows = self
            .db
            .connection()
            .query_all(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT request_id FROM journal ORDER BY request_id",
            ))
            .await
            .expect("ids query");
        rows.iter()
            .map(|row| row.try_get::<i64>("", "request_id").expect("id column"))
            .collect()
    }
}
