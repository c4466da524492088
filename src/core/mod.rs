//! Core batch orchestration engine
//!
//! The dependency resolver, parameter substitutor, strategy dispatcher,
//! execution engine, and transaction coordinator live here, independent of
//! the HTTP surface.

pub mod batch;
pub mod models;
pub mod strategy;
