//! Strategy registry and URL template matching
//!
//! The registry is an ordered table of (method, compiled template) pairs
//! built once at startup and queried per sub-request. Templates use
//! `{param}` segments, e.g. `loans/{loanId}/transactions`. Lookup strips the
//! query string, ignores surrounding slashes, and returns the first matching
//! entry.

use crate::core::batch::types::Method;
use crate::core::strategy::CommandStrategy;
use crate::utils::error::{GatewayError, Result};
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// A compiled relative-URL template
#[derive(Debug, Clone)]
pub struct RouteTemplate {
    raw: String,
    pattern: Regex,
}

impl RouteTemplate {
    /// Compile a template of literal and `{param}` segments
    pub fn compile(template: &str) -> Result<Self> {
        let normalized = template.trim_matches('/');
        if normalized.is_empty() {
            return Err(GatewayError::Config(
                "route template must not be empty".to_string(),
            ));
        }

        let mut pattern = String::from("^");
        for (i, segment) in normalized.split('/').enumerate() {
            if i > 0 {
                pattern.push('/');
            }
            if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 2 {
                pattern.push_str("([^/]+)");
            } else {
                pattern.push_str(&regex::escape(segment));
            }
        }
        pattern.push('$');

        let pattern = Regex::new(&pattern)
            .map_err(|e| GatewayError::Config(format!("invalid route template '{template}': {e}")))?;

        Ok(Self {
            raw: normalized.to_string(),
            pattern,
        })
    }

    /// Whether a query-stripped path matches this template
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// The normalized template text
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

struct RouteEntry {
    method: Method,
    template: RouteTemplate,
    strategy: Arc<dyn CommandStrategy>,
}

/// Ordered (method, template) → strategy table
#[derive(Default)]
pub struct StrategyRegistry {
    entries: Vec<RouteEntry>,
}

impl StrategyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a strategy for a method and URL template
    ///
    /// Registration order is lookup order; the first matching entry wins.
    pub fn register(
        &mut self,
        method: Method,
        template: &str,
        strategy: Arc<dyn CommandStrategy>,
    ) -> Result<()> {
        let template = RouteTemplate::compile(template)?;
        debug!(%method, template = template.as_str(), "registered command strategy");
        self.entries.push(RouteEntry {
            method,
            template,
            strategy,
        });
        Ok(())
    }

    /// Find the strategy for a sub-request's method and relative URL
    pub fn lookup(&self, method: Method, relative_url: &str) -> Option<Arc<dyn CommandStrategy>> {
        let path = relative_url
            .split('?')
            .next()
            .unwrap_or_default()
            .trim_matches('/');

        self.entries
            .iter()
            .find(|entry| entry.method == method && entry.template.matches(path))
            .map(|entry| Arc::clone(&entry.strategy))
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no strategies are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
