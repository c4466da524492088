//! Transaction coordination
//!
//! Two execution modes over the same engine. Unenclosed execution runs each
//! strategy against the pooled connection, so side effects commit or fail
//! independently. Enclosed execution runs the whole forest inside one
//! database transaction: any non-200 sub-response rolls everything back and
//! the caller receives a single summary response embedding the first failing
//! sub-response.

use crate::core::batch::engine::ExecutionEngine;
use crate::core::batch::resolver::BatchRequestNode;
use crate::core::batch::types::{BatchResponse, ErrorInfo};
use crate::core::models::CommandContext;
use crate::storage::Database;
use crate::utils::classifier::{codes, ErrorClassifier};
use crate::utils::error::GatewayError;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Selects and drives the execution mode of a batch call
pub struct TransactionCoordinator {
    engine: ExecutionEngine,
    classifier: Arc<dyn ErrorClassifier>,
}

impl TransactionCoordinator {
    /// Create a coordinator over an engine and error classifier
    pub fn new(engine: ExecutionEngine, classifier: Arc<dyn ErrorClassifier>) -> Self {
        Self { engine, classifier }
    }

    /// Execute the forest without an enclosing transaction
    pub async fn run_unenclosed(
        &self,
        forest: &[BatchRequestNode],
        database: &Database,
        correlation_id: Uuid,
    ) -> Vec<BatchResponse> {
        let context = CommandContext::pooled(database.connection(), correlation_id);
        self.engine.run(forest, &context).await
    }

    /// Execute the forest inside one database transaction
    ///
    /// Success returns the full response list after commit. Any failure
    /// discards the partial list and returns a single rollback summary.
    pub async fn run_enclosed(
        &self,
        forest: &[BatchRequestNode],
        database: &Database,
        correlation_id: Uuid,
    ) -> Vec<BatchResponse> {
        let txn = match database.begin().await {
            Ok(txn) => txn,
            Err(error) => {
                error!(%correlation_id, %error, "failed to open batch transaction");
                let request_id = forest
                    .first()
                    .map(|node| node.request.request_id)
                    .unwrap_or(0);
                return vec![self.classifier.classify(&error).into_response(request_id, None)];
            }
        };

        let responses = {
            let context = CommandContext::transactional(&txn, correlation_id);
            self.engine.run(forest, &context).await
        };

        if let Some(first_failed) = responses.iter().find(|r| !r.is_success()) {
            let summary = rollback_summary(first_failed);
            warn!(
                %correlation_id,
                request_id = first_failed.request_id,
                status_code = first_failed.status_code,
                "rolling back batch transaction"
            );
            if let Err(rollback_error) = txn.rollback().await {
                error!(%correlation_id, error = %rollback_error, "batch rollback failed");
            }
            return vec![summary];
        }

        match txn.commit().await {
            Ok(()) => {
                info!(%correlation_id, responses = responses.len(), "batch transaction committed");
                responses
            }
            Err(commit_error) => {
                // All sub-requests reported success, so there is no failing
                // sub-response to embed; report the commit failure itself.
                error!(%correlation_id, error = %commit_error, "batch commit failed");
                let request_id = responses.first().map(|r| r.request_id).unwrap_or(0);
                vec![
                    self.classifier
                        .classify(&GatewayError::Database(commit_error))
                        .into_response(request_id, None),
                ]
            }
        }
    }
}

fn rollback_summary(first_failed: &BatchResponse) -> BatchResponse {
    let details = serde_json::to_value(first_failed).unwrap_or(serde_json::Value::Null);
    ErrorInfo::new(
        first_failed.status_code,
        codes::TRANSACTION_ROLLED_BACK,
        format!(
            "Transaction is being rolled back; request {} failed",
            first_failed.request_id
        ),
    )
    .with_details(details)
    .into_response(first_failed.request_id, None)
}
