//! Command strategy doubles

use batchgate::{BatchRequest, BatchResponse, CommandContext, CommandStrategy, GatewayError};
use sea_orm::{ConnectionTrait, Statement, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Always succeeds with a fixed status and body
pub struct StaticStrategy {
    pub status_code: u16,
    pub body: String,
}

impl StaticStrategy {
    /// A 200 strategy with the given body
    pub fn ok(body: &str) -> Arc<Self> {
        Arc::new(Self {
            status_code: 200,
            body: body.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl CommandStrategy for StaticStrategy {
    async fn execute(
        &self,
        request: &BatchRequest,
        _context: &CommandContext<'_>,
    ) -> batchgate::Result<BatchResponse> {
        Ok(BatchResponse {
            request_id: request.request_id,
            status_code: self.status_code,
            headers: None,
            body: self.body.clone(),
        })
    }
}

/// Always fails with a validation error
pub struct FailingStrategy {
    pub message: String,
}

impl FailingStrategy {
    pub fn new(message: &str) -> Arc<Self> {
        Arc::new(Self {
            message: message.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl CommandStrategy for FailingStrategy {
    async fn execute(
        &self,
        _request: &BatchRequest,
        _context: &CommandContext<'_>,
    ) -> batchgate::Result<BatchResponse> {
        Err(GatewayError::Validation(self.message.clone()))
    }
}

/// Counts invocations, then delegates to an inner strategy
pub struct CountingStrategy {
    calls: Arc<AtomicUsize>,
    inner: Arc<dyn CommandStrategy>,
}

impl CountingStrategy {
    pub fn wrap(inner: Arc<dyn CommandStrategy>) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let strategy = Arc::new(Self {
            calls: Arc::clone(&calls),
            inner,
        });
        (strategy, calls)
    }
}

#[async_trait::async_trait]
impl CommandStrategy for CountingStrategy {
    async fn execute(
        &self,
        request: &BatchRequest,
        context: &CommandContext<'_>,
    ) -> batchgate::Result<BatchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(request, context).await
    }
}

/// Reflects the effective (post-substitution) request back as its response
pub struct EchoStrategy;

#[async_trait::async_trait]
impl CommandStrategy for EchoStrategy {
    async fn execute(
        &self,
        request: &BatchRequest,
        _context: &CommandContext<'_>,
    ) -> batchgate::Result<BatchResponse> {
        let body = serde_json::json!({
            "url": request.relative_url,
            "body": request.body,
        });
        Ok(BatchResponse {
            request_id: request.request_id,
            status_code: 200,
            headers: None,
            body: body.to_string(),
        })
    }
}

/// Writes one journal row through the call's unit of work
///
/// In enclosed mode the row only becomes visible if the envelope's
/// transaction commits, which is exactly what the rollback tests observe.
pub struct JournalStrategy;

#[async_trait::async_trait]
impl CommandStrategy for JournalStrategy {
    async fn execute(
        &self,
        request: &BatchRequest,
        context: &CommandContext<'_>,
    ) -> batchgate::Result<BatchResponse> {
        let payload = request.body.clone().unwrap_or_default();
        let stmt = Statement::from_sql_and_values(
            context.db().get_database_backend(),
            "INSERT INTO journal (request_id, payload) VALUES (?, ?)",
            [Value::from(request.request_id), Value::from(payload)],
        );
        context.db().execute(stmt).await?;

        Ok(BatchResponse {
            request_id: request.request_id,
            status_code: 200,
            headers: None,
            body: format!(r#"{{"journaled": {}}}"#, request.request_id),
        })
    }
}
