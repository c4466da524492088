//! Execution engine
//!
//! Walks the dependency forest depth-first and produces exactly one
//! sub-response per node. Every step yields a [`BatchResponse`]: strategy
//! errors are classified into responses and never propagate, so the engine
//! itself is infallible. A failed node poisons its entire subtree: each
//! descendant receives a synthesized 409 naming the failed ancestor and its
//! strategy is never invoked.

use crate::core::batch::resolver::BatchRequestNode;
use crate::core::batch::substitution;
use crate::core::batch::types::{BatchRequest, BatchResponse, ErrorInfo};
use crate::core::models::CommandContext;
use crate::core::strategy::StrategyRegistry;
use crate::utils::classifier::{codes, ErrorClassifier};
use crate::utils::error::GatewayError;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, warn};

/// Executes a resolved forest against the registered strategies
pub struct ExecutionEngine {
    registry: Arc<StrategyRegistry>,
    classifier: Arc<dyn ErrorClassifier>,
}

impl ExecutionEngine {
    /// Create an engine over a strategy registry and error classifier
    pub fn new(registry: Arc<StrategyRegistry>, classifier: Arc<dyn ErrorClassifier>) -> Self {
        Self {
            registry,
            classifier,
        }
    }

    /// Execute every tree of the forest, accumulating responses in
    /// depth-first document order
    pub async fn run(
        &self,
        forest: &[BatchRequestNode],
        context: &CommandContext<'_>,
    ) -> Vec<BatchResponse> {
        let mut responses = Vec::new();
        for node in forest {
            responses.extend(self.execute_tree(node, None, context).await);
        }
        responses
    }

    fn execute_tree<'a>(
        &'a self,
        node: &'a BatchRequestNode,
        parent: Option<&'a BatchResponse>,
        context: &'a CommandContext<'a>,
    ) -> BoxFuture<'a, Vec<BatchResponse>> {
        Box::pin(async move {
            let response = match parent {
                // Failure cascades down the whole subtree; the child's
                // strategy is not invoked.
                Some(parent) if !parent.is_success() => conflict_response(&node.request, parent),
                Some(parent) => {
                    let resolved = substitution::resolve_references(&node.request, parent);
                    self.execute_request(&resolved, context).await
                }
                None => self.execute_request(&node.request, context).await,
            };

            let mut descendants = Vec::new();
            for child in &node.children {
                descendants.extend(self.execute_tree(child, Some(&response), context).await);
            }

            let mut responses = Vec::with_capacity(1 + descendants.len());
            responses.push(response);
            responses.extend(descendants);
            responses
        })
    }

    async fn execute_request(
        &self,
        request: &BatchRequest,
        context: &CommandContext<'_>,
    ) -> BatchResponse {
        debug!(
            correlation_id = %context.correlation_id(),
            request_id = request.request_id,
            method = %request.method,
            url = %request.relative_url,
            "executing sub-request"
        );

        let mut response = match self.registry.lookup(request.method, &request.relative_url) {
            Some(strategy) => match strategy.execute(request, context).await {
                Ok(response) => response,
                Err(error) => {
                    warn!(
                        correlation_id = %context.correlation_id(),
                        request_id = request.request_id,
                        error = %error,
                        "sub-request failed"
                    );
                    self.classifier
                        .classify(&error)
                        .into_response(request.request_id, None)
                }
            },
            None => {
                let error = GatewayError::StrategyNotFound(format!(
                    "{} {}",
                    request.method, request.relative_url
                ));
                warn!(
                    correlation_id = %context.correlation_id(),
                    request_id = request.request_id,
                    error = %error,
                    "no strategy matches sub-request"
                );
                self.classifier
                    .classify(&error)
                    .into_response(request.request_id, None)
            }
        };

        // Headers are pass-through from the originating request, also for
        // strategies that set their own.
        response.request_id = request.request_id;
        response.headers = request.headers.clone();
        response
    }
}

fn conflict_response(request: &BatchRequest, parent: &BatchResponse) -> BatchResponse {
    ErrorInfo::new(
        409,
        codes::PARENT_REQUEST_FAILED,
        format!("Parent request with id {} failed", parent.request_id),
    )
    .into_response(request.request_id, request.headers.clone())
}
