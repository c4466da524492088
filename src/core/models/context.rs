//! Per-call execution context handed to command strategies

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, ExecResult,
    QueryResult, Statement,
};
use uuid::Uuid;

/// The unit of work a batch call executes against
///
/// Unenclosed execution hands strategies the pooled connection; enclosed
/// execution hands them the one transaction shared by the whole envelope.
/// The handle implements [`ConnectionTrait`] by delegation so strategy code
/// is written once against either mode.
pub enum DbHandle<'a> {
    /// Pooled connection; each strategy's own unit of work stands alone
    Pool(&'a DatabaseConnection),
    /// The envelope's enclosing transaction
    Transaction(&'a DatabaseTransaction),
}

#[async_trait::async_trait]
impl ConnectionTrait for DbHandle<'_> {
    fn get_database_backend(&self) -> DbBackend {
        match self {
            DbHandle::Pool(conn) => conn.get_database_backend(),
            DbHandle::Transaction(txn) => txn.get_database_backend(),
        }
    }

    async fn execute(&self, stmt: Statement) -> Result<ExecResult, DbErr> {
        match self {
            DbHandle::Pool(conn) => conn.execute(stmt).await,
            DbHandle::Transaction(txn) => txn.execute(stmt).await,
        }
    }

    async fn execute_unprepared(&self, sql: &str) -> Result<ExecResult, DbErr> {
        match self {
            DbHandle::Pool(conn) => conn.execute_unprepared(sql).await,
            DbHandle::Transaction(txn) => txn.execute_unprepared(sql).await,
        }
    }

    async fn query_one(&self, stmt: Statement) -> Result<Option<QueryResult>, DbErr> {
        match self {
            DbHandle::Pool(conn) => conn.query_one(stmt).await,
            DbHandle::Transaction(txn) => txn.query_one(stmt).await,
        }
    }

    async fn query_all(&self, stmt: Statement) -> Result<Vec<QueryResult>, DbErr> {
        match self {
            DbHandle::Pool(conn) => conn.query_all(stmt).await,
            DbHandle::Transaction(txn) => txn.query_all(stmt).await,
        }
    }
}

/// Context threaded through one batch call's strategy executions
pub struct CommandContext<'a> {
    correlation_id: Uuid,
    db: DbHandle<'a>,
}

impl<'a> CommandContext<'a> {
    /// Context for unenclosed execution against the pooled connection
    pub fn pooled(conn: &'a DatabaseConnection, correlation_id: Uuid) -> Self {
        Self {
            correlation_id,
            db: DbHandle::Pool(conn),
        }
    }

    /// Context for enclosed execution inside the given transaction
    pub fn transactional(txn: &'a DatabaseTransaction, correlation_id: Uuid) -> Self {
        Self {
            correlation_id,
            db: DbHandle::Transaction(txn),
        }
    }

    /// Correlation id of the enclosing batch call
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Unit of work for this call; usable wherever sea-orm expects a
    /// [`ConnectionTrait`]
    pub fn db(&self) -> &DbHandle<'a> {
        &self.db
    }

    /// Whether this call runs inside an enclosing transaction
    pub fn is_transactional(&self) -> bool {
        matches!(self.db, DbHandle::Transaction(_))
    }
}
