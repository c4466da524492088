//! Dependency resolution
//!
//! Turns the flat envelope into a forest of [`BatchRequestNode`]s. A
//! sub-request without a `reference` is a root; every other sub-request is
//! attached under the request its `reference` names. Sibling order follows
//! the input order of the envelope.
//!
//! A reference that names no request in the envelope leaves its sub-request
//! unreachable; it is dropped from the forest and never executed. The same
//! holds for reference cycles: every cycle member carries a `reference`, so
//! no cycle can contain a root, and with unique request ids (enforced by the
//! validator) no cycle is reachable from one.

use crate::core::batch::types::BatchRequest;
use std::collections::HashMap;
use tracing::debug;

/// One node of the dependency forest: a sub-request plus the sub-requests
/// that reference it, in envelope order
#[derive(Debug, Clone)]
pub struct BatchRequestNode {
    /// The sub-request at this node
    pub request: BatchRequest,
    /// Sub-requests whose `reference` names this node's `requestId`
    pub children: Vec<BatchRequestNode>,
}

impl BatchRequestNode {
    /// Number of requests in this subtree, the node itself included
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(BatchRequestNode::subtree_len)
            .sum::<usize>()
    }
}

/// Build the dependency forest for an envelope
///
/// Returns the root nodes, each carrying its full subtree. An empty result
/// means the envelope has no executable roots; the caller is responsible for
/// turning that into a whole-batch failure.
pub fn resolve(requests: &[BatchRequest]) -> Vec<BatchRequestNode> {
    let mut children_by_parent: HashMap<i64, Vec<&BatchRequest>> = HashMap::new();
    let mut roots: Vec<&BatchRequest> = Vec::new();

    for request in requests {
        match request.reference {
            None => roots.push(request),
            Some(parent_id) => children_by_parent
                .entry(parent_id)
                .or_default()
                .push(request),
        }
    }

    let forest: Vec<BatchRequestNode> = roots
        .into_iter()
        .map(|root| build_node(root, &children_by_parent))
        .collect();

    let attached: usize = forest.iter().map(BatchRequestNode::subtree_len).sum();
    if attached < requests.len() {
        debug!(
            dropped = requests.len() - attached,
            "dropping sub-requests with unresolvable references"
        );
    }

    forest
}

fn build_node(
    request: &BatchRequest,
    children_by_parent: &HashMap<i64, Vec<&BatchRequest>>,
) -> BatchRequestNode {
    let children = children_by_parent
        .get(&request.request_id)
        .map(|children| {
            children
                .iter()
                .map(|child| build_node(child, children_by_parent))
                .collect()
        })
        .unwrap_or_default();

    BatchRequestNode {
        request: request.clone(),
        children,
    }
}
