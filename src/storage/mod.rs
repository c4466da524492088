//! Storage layer
//!
//! Database connectivity and the transaction contract used by the batch
//! coordinator.

pub mod database;

pub use database::Database;
