//! Centralized error classification
//!
//! Strategy failures never escape the execution engine; they are converted
//! into sub-responses here. The classifier owns the error-to-status mapping
//! so every failing sub-request produces the same wire shape.

use crate::core::batch::types::ErrorInfo;
use crate::utils::error::GatewayError;

/// Error codes emitted by the engine itself (as opposed to strategies).
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const MALFORMED_BODY: &str = "MALFORMED_BODY";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFLICT: &str = "CONFLICT";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NO_MATCHING_HANDLER: &str = "NO_MATCHING_HANDLER";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const UNRESOLVABLE_BATCH: &str = "UNRESOLVABLE_BATCH";
    pub const PARENT_REQUEST_FAILED: &str = "PARENT_REQUEST_FAILED";
    pub const TRANSACTION_ROLLED_BACK: &str = "TRANSACTION_ROLLED_BACK";
}

/// Maps a strategy or infrastructure error to the wire error payload
///
/// Implementations must be deterministic: the same error always classifies to
/// the same status code, so batch results stay reproducible.
pub trait ErrorClassifier: Send + Sync {
    /// Classify an error into the `(statusCode, code, message)` payload
    /// embedded in a failing sub-response body.
    fn classify(&self, error: &GatewayError) -> ErrorInfo;
}

/// Default classifier used by the gateway
///
/// Encodes the same status table as the HTTP error responses, so a strategy
/// failure inside a batch reports the status the same operation would have
/// reported as a standalone call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorClassifier;

impl ErrorClassifier for DefaultErrorClassifier {
    fn classify(&self, error: &GatewayError) -> ErrorInfo {
        let (status_code, code) = match error {
            GatewayError::Validation(_) => (400, codes::VALIDATION_ERROR),
            GatewayError::BadRequest(_) => (400, codes::BAD_REQUEST),
            GatewayError::Serialization(_) => (400, codes::MALFORMED_BODY),
            GatewayError::NotFound(_) => (404, codes::NOT_FOUND),
            GatewayError::Conflict(_) => (409, codes::CONFLICT),
            GatewayError::Forbidden(_) => (403, codes::FORBIDDEN),
            GatewayError::StrategyNotFound(_) => (500, codes::NO_MATCHING_HANDLER),
            GatewayError::Database(_) => (500, codes::DATABASE_ERROR),
            GatewayError::Config(_)
            | GatewayError::Yaml(_)
            | GatewayError::Io(_)
            | GatewayError::Internal(_) => (500, codes::INTERNAL_ERROR),
        };

        ErrorInfo::new(status_code, code, error.to_string())
    }
}
