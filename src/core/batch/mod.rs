//! Batch request orchestration
//!
//! One envelope of dependent sub-requests in, one consolidated response
//! array out. The orchestrator composes the pipeline: envelope validation →
//! dependency resolution → (optionally transactional) execution → response
//! assembly.

pub mod engine;
pub mod resolver;
pub mod substitution;
pub mod transaction;
pub mod types;
pub mod validator;


pub use resolver::BatchRequestNode;
pub use types::{BatchHeader, BatchRequest, BatchResponse, ErrorInfo, Method};

use crate::config::BatchConfig;
use crate::core::strategy::StrategyRegistry;
use crate::storage::Database;
use crate::utils::classifier::{codes, ErrorClassifier};
use engine::ExecutionEngine;
use std::sync::Arc;
use transaction::TransactionCoordinator;
use tracing::{info, warn};
use uuid::Uuid;
use validator::BatchValidator;

/// Entry point of the batch engine
///
/// Holds the strategy registry, classifier, and configuration for the
/// lifetime of the process; each [`process`](Self::process) call is
/// self-contained and leaves no state behind.
pub struct BatchOrchestrator {
    validator: BatchValidator,
    coordinator: TransactionCoordinator,
    classifier: Arc<dyn ErrorClassifier>,
}

impl BatchOrchestrator {
    /// Create an orchestrator over a strategy registry
    pub fn new(
        registry: Arc<StrategyRegistry>,
        classifier: Arc<dyn ErrorClassifier>,
        config: &BatchConfig,
    ) -> Self {
        let engine = ExecutionEngine::new(registry, Arc::clone(&classifier));
        Self {
            validator: BatchValidator::new(config),
            coordinator: TransactionCoordinator::new(engine, Arc::clone(&classifier)),
            classifier,
        }
    }

    /// Process one batch envelope
    ///
    /// Always returns a response array: one entry per resolvable
    /// sub-request, sorted ascending by `requestId`, or a single synthesized
    /// entry for whole-batch failures (invalid envelope, no resolvable
    /// roots, enclosed-transaction rollback).
    pub async fn process(
        &self,
        requests: Vec<BatchRequest>,
        enclosing_transaction: bool,
        database: &Database,
    ) -> Vec<BatchResponse> {
        let correlation_id = Uuid::new_v4();
        info!(
            %correlation_id,
            requests = requests.len(),
            enclosing_transaction,
            "processing batch envelope"
        );

        if let Err(error) = self.validator.validate(&requests) {
            warn!(%correlation_id, %error, "batch envelope rejected");
            let request_id = requests.first().map(|r| r.request_id).unwrap_or(0);
            return vec![self.classifier.classify(&error).into_response(request_id, None)];
        }

        let forest = resolver::resolve(&requests);
        if forest.is_empty() {
            warn!(%correlation_id, "batch envelope has no resolvable roots");
            let request_id = requests.first().map(|r| r.request_id).unwrap_or(0);
            return vec![
                ErrorInfo::new(
                    500,
                    codes::UNRESOLVABLE_BATCH,
                    "no executable root requests in the batch envelope",
                )
                .into_response(request_id, None),
            ];
        }

        let responses = if enclosing_transaction {
            self.coordinator
                .run_enclosed(&forest, database, correlation_id)
                .await
        } else {
            self.coordinator
                .run_unenclosed(&forest, database, correlation_id)
                .await
        };

        assemble(responses)
    }
}

/// Order responses ascending by `requestId`
///
/// This is the only place ordering is imposed; execution order is dependency
/// order, not id order.
pub fn assemble(mut responses: Vec<BatchResponse>) -> Vec<BatchResponse> {
    responses.sort_by_key(|response| response.request_id);
    responses
}
