//! Common test utilities for batchgate
//!
//! This module provides shared test infrastructure for all tests:
//! - In-memory SQLite database support with a journal table
//! - Request fixtures and data factories
//! - Command strategy doubles

pub mod database;
pub mod fixtures;
pub mod strategies;

// Re-export commonly used items
pub use database::TestDatabase;
pub use fixtures::RequestFactory;
pub use strategies::{
    CountingStrategy, EchoStrategy, FailingStrategy, JournalStrategy, StaticStrategy,
};
