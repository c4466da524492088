//! Command strategies
//!
//! A strategy performs one platform operation for a (method, URL template)
//! pair. The gateway ships only the dispatch machinery; concrete strategies
//! are registered by the embedding application at startup.

pub mod registry;

pub use registry::{RouteTemplate, StrategyRegistry};

use crate::core::batch::types::{BatchRequest, BatchResponse};
use crate::core::models::CommandContext;
use crate::utils::error::Result;

/// One platform operation invokable from a batch envelope
///
/// Strategies must not retry on their own; the engine executes each
/// sub-request exactly once. Errors returned here never reach the client as
/// failures of the whole call; the engine classifies them into the failing
/// sub-response.
#[async_trait::async_trait]
pub trait CommandStrategy: Send + Sync {
    /// Execute the operation the sub-request describes
    async fn execute(
        &self,
        request: &BatchRequest,
        context: &CommandContext<'_>,
    ) -> Result<BatchResponse>;
}
