use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use payload_redactor_engine::RedactionEngine;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::middleware::{redact_request_body, set_request_id};

mod handlers;
mod types;

pub use handlers::{echo, health_check};
pub use types::{EchoResponse, ErrorResponse, HealthResponse};

pub struct GatewayState {
    pub config: Arc<GatewayConfig>,
    pub engine: Arc<RedactionEngine>,
}

impl GatewayState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let policy = config
            .redaction_policy()
            .context("Invalid redaction configuration")?;
        let engine = RedactionEngine::new(policy).context("Failed to build redaction engine")?;

        Ok(Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        })
    }
}

pub fn create_router(state: Arc<GatewayState>) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(set_request_id))
        .layer(TimeoutLayer::new(state.config.request_timeout()));

    Router::new()
        .route("/api/middleware", post(echo))
        .route("/health", get(health_check))
        // The redaction middleware enforces the configured body limit.
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn_with_state(state, redact_request_body))
        .layer(layers)
}
