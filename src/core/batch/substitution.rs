//! Parameter substitution
//!
//! A child sub-request may embed `$.field` placeholders in its URL and body
//! that refer into its parent's response body. Substitution is textual: each
//! placeholder token is replaced in place with the stringified value found at
//! that path, leaving surrounding characters untouched. A path with no match
//! keeps its literal text, since `$.`-shaped text may legitimately not be a
//! placeholder.

use crate::core::batch::types::{BatchRequest, BatchResponse};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

// `$.` followed by dot-separated segments; numeric segments index arrays.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\.[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*")
        .expect("placeholder pattern is valid")
});

/// Rewrite a child request against its parent's response body
///
/// Returns a copy with placeholders in `relativeUrl` and `body` resolved.
/// The input request is never mutated. If the parent body is not parseable
/// JSON the request is returned unchanged (fail-open, same convention as an
/// unmatched path).
pub fn resolve_references(request: &BatchRequest, parent: &BatchResponse) -> BatchRequest {
    let tree: Value = match serde_json::from_str(&parent.body) {
        Ok(tree) => tree,
        Err(_) => {
            debug!(
                parent_id = parent.request_id,
                child_id = request.request_id,
                "parent response body is not JSON; leaving child unchanged"
            );
            return request.clone();
        }
    };

    let mut resolved = request.clone();
    resolved.relative_url = substitute(&request.relative_url, &tree);
    if let Some(body) = &request.body {
        resolved.body = Some(substitute(body, &tree));
    }
    resolved
}

fn substitute(text: &str, tree: &Value) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            match lookup(tree, &token[2..]) {
                Some(value) => render(value),
                None => token.to_string(),
            }
        })
        .into_owned()
}

fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(tree, |value, segment| match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

// Strings substitute without their JSON quotes; everything else keeps its
// JSON rendering.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
