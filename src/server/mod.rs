//! HTTP server implementation
//!
//! This module provides the HTTP server and routing functionality.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;

pub use builder::ServerBuilder;
pub use server::HttpServer;
pub use state::AppState;
