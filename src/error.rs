//! Failures surfaced to the caller of a scoring request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Terminal failure of one submit/poll session.
///
/// Every variant ends the request; nothing here is retried.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Gateway request failed: {0}")]
    GatewayUnreachable(#[source] reqwest::Error),

    #[error("Gateway returned {status}: {body}")]
    GatewayRejected { status: u16, body: String },

    #[error("Missing task id in gateway response")]
    MalformedAcknowledgement,

    #[error("Gateway returned an unreadable event history: {0}")]
    MalformedEvents(String),

    #[error("Task not found (may have expired or be on a different gateway).")]
    TaskNotFound,

    #[error("Task {status} without consolidated response.")]
    TaskEndedWithoutResult { status: String },

    #[error("Timed out waiting for agent response")]
    PollTimeout,
}

impl BridgeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::TaskNotFound => StatusCode::NOT_FOUND,
            BridgeError::PollTimeout => StatusCode::GATEWAY_TIMEOUT,
            BridgeError::GatewayUnreachable(_)
            | BridgeError::GatewayRejected { .. }
            | BridgeError::MalformedAcknowledgement
            | BridgeError::MalformedEvents(_)
            | BridgeError::TaskEndedWithoutResult { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(status = status.as_u16(), "Scoring request failed: {}", self);
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_failure_kind() {
        assert_eq!(BridgeError::TaskNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BridgeError::PollTimeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            BridgeError::GatewayRejected {
                status: 500,
                body: "boom".to_string()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            BridgeError::MalformedAcknowledgement.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn ended_without_result_names_status() {
        let err = BridgeError::TaskEndedWithoutResult {
            status: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "Task failed without consolidated response.");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn rejected_keeps_body_verbatim() {
        let err = BridgeError::GatewayRejected {
            status: 422,
            body: "{\"error\":\"bad envelope\"}".to_string(),
        };
        assert_eq!(err.to_string(), "Gateway returned 422: {\"error\":\"bad envelope\"}");
    }
}
