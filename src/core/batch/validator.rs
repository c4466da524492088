//! Envelope shape validation
//!
//! Checks the batch envelope before resolution. Business semantics of the
//! individual sub-requests are the strategies' concern; only the properties
//! the resolver relies on are enforced here. In particular, `requestId`
//! uniqueness is what guarantees the resolver's recursion terminates.

use crate::config::BatchConfig;
use crate::core::batch::types::BatchRequest;
use crate::utils::error::{GatewayError, Result};
use std::collections::HashSet;

/// Validates incoming batch envelopes
#[derive(Debug, Clone)]
pub struct BatchValidator {
    max_requests: usize,
}

impl BatchValidator {
    /// Create a validator from the batch configuration
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            max_requests: config.max_requests,
        }
    }

    /// Validate the envelope's shape
    ///
    /// An empty envelope passes here; it produces an empty forest and is
    /// reported through the no-resolvable-roots path instead.
    pub fn validate(&self, requests: &[BatchRequest]) -> Result<()> {
        if requests.len() > self.max_requests {
            return Err(GatewayError::Validation(format!(
                "batch size {} exceeds the maximum of {}",
                requests.len(),
                self.max_requests
            )));
        }

        let mut seen = HashSet::with_capacity(requests.len());
        for request in requests {
            if !seen.insert(request.request_id) {
                return Err(GatewayError::Validation(format!(
                    "duplicate requestId {} in batch",
                    request.request_id
                )));
            }

            if request.reference == Some(request.request_id) {
                return Err(GatewayError::Validation(format!(
                    "request {} references itself",
                    request.request_id
                )));
            }

            if request.relative_url.trim().is_empty() {
                return Err(GatewayError::Validation(format!(
                    "request {} has an empty relativeUrl",
                    request.request_id
                )));
            }
        }

        Ok(())
    }
}
