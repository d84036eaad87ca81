use axum::Json;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::types::{EchoResponse, HealthResponse};

/// Returns the body exactly as the handler received it, after the redaction
/// middleware has rewritten it.
#[instrument(skip_all)]
pub async fn echo(Json(payload): Json<Map<String, Value>>) -> Json<EchoResponse> {
    debug!(fields = payload.len(), "echoing request body");
    Json(EchoResponse { data: payload })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "redaction-gateway".to_string(),
    })
}
