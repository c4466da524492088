//! batchgate - batch request orchestration gateway
//!
//! Executes dependency-ordered batch envelopes against registered command
//! strategies.

use batchgate::server;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Start server (auto-loads config/gateway.yaml, then environment)
    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
