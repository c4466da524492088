//! Request fixtures and factories

use batchgate::{BatchHeader, BatchRequest, Method};

/// Factory for batch sub-requests
pub struct RequestFactory;

impl RequestFactory {
    /// A root sub-request (no reference)
    pub fn root(id: i64, method: Method, url: &str) -> BatchRequest {
        BatchRequest {
            request_id: id,
            method,
            relative_url: url.to_string(),
            headers: None,
            body: None,
            reference: None,
        }
    }

    /// A child sub-request referencing `reference`
    pub fn child(id: i64, reference: i64, method: Method, url: &str) -> BatchRequest {
        BatchRequest {
            reference: Some(reference),
            ..Self::root(id, method, url)
        }
    }

    /// Attach a body
    pub fn with_body(mut request: BatchRequest, body: &str) -> BatchRequest {
        request.body = Some(body.to_string());
        request
    }

    /// Attach a single header
    pub fn with_header(mut request: BatchRequest, name: &str, value: &str) -> BatchRequest {
        request.headers = Some(vec![BatchHeader {
            name: name.to_string(),
            value: value.to_string(),
        }]);
        request
    }
}
