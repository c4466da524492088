//! Batch orchestration types and data structures
//!
//! Wire model for the batch envelope: one call carries an ordered array of
//! sub-requests and returns one array of sub-responses. Member names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of a sub-request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One name/value header pair carried by a sub-request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
    /// Header name
    pub name: String,
    /// Header value
    pub value: String,
}

/// One sub-request of the client-supplied envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Unique id within the envelope; used for correlation and final
    /// ordering, never for dependency lookup
    pub request_id: i64,
    /// HTTP method of the described operation
    pub method: Method,
    /// Path plus optional query string, relative to the API root
    pub relative_url: String,
    /// Ordered header pairs, optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<BatchHeader>>,
    /// Opaque body text (JSON by convention); only inspected for
    /// placeholder substitution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// `requestId` of the sub-request this one depends on; absence marks a
    /// root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<i64>,
}

/// One sub-response, always produced per sub-request that enters the forest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    /// Copied from the originating sub-request
    pub request_id: i64,
    /// HTTP-style status: 200 success, 409 parent-failed cascade, 500
    /// unexpected failure, handler-specific codes otherwise
    pub status_code: u16,
    /// Copied from the originating request (pass-through)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<BatchHeader>>,
    /// Success payload or serialized [`ErrorInfo`]
    pub body: String,
}

impl BatchResponse {
    /// Whether this sub-request executed successfully
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Structured error payload serialized into failing sub-response bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// HTTP-style status code, duplicated from the enclosing response
    pub status_code: u16,
    /// Stable machine-readable error code
    pub code: String,
    /// Human-readable description
    pub message: String,
    /// Optional structured context, e.g. the serialized first failing
    /// sub-response of a rolled-back transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Create an error payload
    pub fn new(status_code: u16, code: &str, message: impl Into<String>) -> Self {
        Self {
            status_code,
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured context
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Wrap this payload into a sub-response for the given request id
    pub fn into_response(self, request_id: i64, headers: Option<Vec<BatchHeader>>) -> BatchResponse {
        let status_code = self.status_code;
        let body = serde_json::to_string(&self).unwrap_or_else(|_| self.message.clone());
        BatchResponse {
            request_id,
            status_code,
            headers,
            body,
        }
    }
}
