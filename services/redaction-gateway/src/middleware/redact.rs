use std::sync::Arc;

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::{
        header::{CONTENT_LENGTH, TRANSFER_ENCODING},
        request::Parts,
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use http_body_util::{LengthLimitError, Limited};
use payload_redactor_engine::RedactionError;
use tracing::{debug, info, warn};

use super::RequestId;
use crate::api::GatewayState;
use crate::config::ParseFailurePolicy;
use crate::error::GatewayError;

/// Rewrites the body of every request whose method is configured for
/// redaction, so that handlers further down only ever see the redacted
/// payload.
///
/// The body is buffered once. Whatever happens, the request handed to `next`
/// carries either the rewritten bytes or the original ones; a rejected request
/// never reaches `next`.
pub async fn redact_request_body(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.redact_methods.contains(request.method()) {
        let limit = state.config.max_body_size_bytes;
        return next
            .run(request.map(|body| Body::new(Limited::new(body, limit))))
            .await;
    }

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone());
    let (mut parts, body) = request.into_parts();

    match rewrite_body(&state, &mut parts, body).await {
        Ok(body) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => {
            warn!(
                error = %err,
                code = err.error_code(),
                method = %parts.method,
                path = %parts.uri.path(),
                "Request rejected by redaction middleware"
            );
            err.to_response(request_id.as_deref())
        }
    }
}

async fn rewrite_body(
    state: &GatewayState,
    parts: &mut Parts,
    body: Body,
) -> Result<Body, GatewayError> {
    let limit = state.config.max_body_size_bytes;
    let bytes = body::to_bytes(body, limit).await.map_err(|err| {
        let source = err.into_inner();
        if source.downcast_ref::<LengthLimitError>().is_some() {
            GatewayError::BodyTooLarge { limit }
        } else {
            GatewayError::BodyRead(source.to_string())
        }
    })?;

    if bytes.iter().copied().all(is_json_whitespace) {
        debug!("Request body is empty, skipping redaction");
        return Ok(Body::from(bytes));
    }

    match state.engine.redact_slice(&bytes) {
        Ok(payload) => {
            info!(
                fields_redacted = payload.fields_redacted,
                original_size = bytes.len(),
                redacted_size = payload.bytes.len(),
                mode = %state.engine.policy().mode(),
                "Request body redacted"
            );

            parts.headers.remove(TRANSFER_ENCODING);
            parts
                .headers
                .insert(CONTENT_LENGTH, HeaderValue::from(payload.bytes.len()));
            Ok(Body::from(payload.bytes))
        }
        Err(RedactionError::Parse(reason)) => match state.config.parse_failure_policy {
            ParseFailurePolicy::FailOpen => {
                warn!(
                    error = %reason,
                    "Request body is not valid JSON, forwarding unmodified"
                );
                Ok(Body::from(bytes))
            }
            ParseFailurePolicy::FailClosed => Err(GatewayError::InvalidJson(reason)),
        },
        Err(err @ RedactionError::DepthExceeded { .. }) => {
            Err(GatewayError::RejectedInput(err.to_string()))
        }
        Err(err) => Err(GatewayError::Redaction(err)),
    }
}

/// Insignificant whitespace as defined by RFC 8259.
fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_whitespace() {
        assert!(b" \t\r\n".iter().copied().all(is_json_whitespace));
        assert!(!is_json_whitespace(0x0C));
        assert!(!is_json_whitespace(0x0B));
        assert!(!is_json_whitespace(0xA0));
    }
}
