//! Enclosed-transaction tests
//!
//! Verify all-or-nothing semantics by observing which journal rows are
//! visible after the batch call returns.

use crate::common::{FailingStrategy, JournalStrategy, RequestFactory, TestDatabase};
use batchgate::config::BatchConfig;
use batchgate::{
    BatchOrchestrator, BatchResponse, DefaultErrorClassifier, ErrorInfo, Method, StrategyRegistry,
};
use std::sync::Arc;

fn journaling_orchestrator(failing_route: Option<&str>) -> BatchOrchestrator {
    let mut registry = StrategyRegistry::new();
    if let Some(route) = failing_route {
        registry
            .register(Method::Post, route, FailingStrategy::new("rejected"))
            .unwrap();
    }
    registry
        .register(Method::Post, "journal/{entry}", Arc::new(JournalStrategy))
        .unwrap();

    BatchOrchestrator::new(
        Arc::new(registry),
        Arc::new(DefaultErrorClassifier),
        &BatchConfig::default(),
    )
}

#[tokio::test]
async fn enclosed_rollback_reports_first_failure_and_leaves_no_side_effects() {
    let orchestrator = journaling_orchestrator(Some("loans"));
    let db = TestDatabase::new().await;

    let requests = vec![
        RequestFactory::root(1, Method::Post, "journal/a"),
        RequestFactory::root(2, Method::Post, "loans"),
        RequestFactory::root(3, Method::Post, "journal/b"),
    ];

    let responses = orchestrator.process(requests, true, db.db()).await;

    // One summary response carrying the first failing sub-response
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].request_id, 2);

    let summary: ErrorInfo = serde_json::from_str(&responses[0].body).unwrap();
    assert_eq!(summary.code, "TRANSACTION_ROLLED_BACK");
    let embedded: BatchResponse =
        serde_json::from_value(summary.details.expect("embedded response")).unwrap();
    assert_eq!(embedded.request_id, 2);
    assert_ne!(embedded.status_code, 200);

    // Requests 1 and 3 left no visible side effects
    assert_eq!(db.journal_count().await, 0);
}

#[tokio::test]
async fn enclosed_success_commits_every_side_effect() {
    let orchestrator = journaling_orchestrator(None);
    let db = TestDatabase::new().await;

    let requests = vec![
        RequestFactory::root(1, Method::Post, "journal/a"),
        RequestFactory::root(2, Method::Post, "journal/b"),
    ];

    let responses = orchestrator.process(requests, true, db.db()).await;

    assert_eq!(responses.len(), 2);
    assert!(responses.iter().all(|r| r.is_success()));
    assert_eq!(db.journal_ids().await, vec![1, 2]);
}

#[tokio::test]
async fn enclosed_cascade_conflict_also_rolls_back() {
    let orchestrator = journaling_orchestrator(Some("loans"));
    let db = TestDatabase::new().await;

    // Root fails, child would journal; its 409 is a non-200 and must roll
    // back the sibling root's committed work as well.
    let requests = vec![
        RequestFactory::root(1, Method::Post, "journal/a"),
        RequestFactory::root(2, Method::Post, "loans"),
        RequestFactory::child(3, 2, Method::Post, "journal/b"),
    ];

    let responses = orchestrator.process(requests, true, db.db()).await;

    assert_eq!(responses.len(), 1);
    // The first non-200 in document order is the failed root itself
    assert_eq!(responses[0].request_id, 2);
    assert_eq!(db.journal_count().await, 0);
}

#[tokio::test]
async fn unenclosed_failure_keeps_sibling_side_effects() {
    let orchestrator = journaling_orchestrator(Some("loans"));
    let db = TestDatabase::new().await;

    let requests = vec![
        RequestFactory::root(1, Method::Post, "loans"),
        RequestFactory::root(2, Method::Post, "journal/a"),
    ];

    let responses = orchestrator.process(requests, false, db.db()).await;

    assert_eq!(responses.len(), 2);
    assert_ne!(responses[0].status_code, 200);
    assert_eq!(responses[1].status_code, 200);
    // The failed sibling does not take the successful one's work down
    assert_eq!(db.journal_ids().await, vec![2]);
}
