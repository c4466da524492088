//! Core domain models shared across the engine

pub mod context;

pub use context::{CommandContext, DbHandle};
