//! Batch API endpoint
//!
//! One call carries the whole envelope: an ordered JSON array of
//! sub-requests in, an array of sub-responses out, ordered by `requestId`.
//! The read-only instance guard runs here, before the orchestrator is
//! invoked.

use crate::core::batch::types::{BatchRequest, Method};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::{debug, warn};

/// Query parameters of the batch endpoint
#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    /// Execute the whole envelope inside one database transaction
    #[serde(default, rename = "enclosingTransaction")]
    pub enclosing_transaction: bool,
}

/// Configure batch API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/v1").route("/batches", web::post().to(handle_batch)));
}

/// Batch endpoint
///
/// Accepts the envelope, runs the admission guard, and delegates to the
/// orchestrator. The orchestrator never fails; whole-batch problems come
/// back as a single synthesized sub-response.
pub async fn handle_batch(
    state: web::Data<AppState>,
    query: web::Query<BatchQuery>,
    requests: web::Json<Vec<BatchRequest>>,
) -> ActixResult<HttpResponse> {
    debug!(
        requests = requests.len(),
        enclosing_transaction = query.enclosing_transaction,
        "batch envelope received"
    );

    // Admission check: a read-only instance accepts only GET sub-requests.
    if state.config.batch().read_only {
        if let Some(blocked) = requests.iter().find(|r| r.method != Method::Get) {
            warn!(
                request_id = blocked.request_id,
                method = %blocked.method,
                "rejecting batch on read-only instance"
            );
            return Err(GatewayError::Forbidden(format!(
                "instance is read-only; request {} uses {}",
                blocked.request_id, blocked.method
            ))
            .into());
        }
    }

    let responses = state
        .orchestrator
        .process(
            requests.into_inner(),
            query.enclosing_transaction,
            &state.database,
        )
        .await;

    Ok(HttpResponse::Ok().json(responses))
}
