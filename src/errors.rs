// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure is reported in the response of the request that caused it
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    ServerMisconfigured(String),

    /// Upstream answered with an error status or an error-carrying body
    #[error("{message}")]
    UpstreamFailure { status: u16, message: String },

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl PlacesError {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        PlacesError::UpstreamFailure {
            status,
            message: message.into(),
        }
    }

    /// Summary and optional detail for the JSON body
    fn body_parts(&self) -> (String, Option<String>) {
        match self {
            PlacesError::InternalError(detail) => {
                ("Internal server error".to_string(), Some(detail.clone()))
            }
            other => (other.to_string(), None),
        }
    }
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and `{error, message?}` bodies
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let (error, message) = self.body_parts();

        let body = match message {
            Some(message) => json!({ "error": error, "message": message }),
            None => json!({ "error": error }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PlacesError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            PlacesError::ServerMisconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PlacesError::UpstreamFailure { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            PlacesError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: PlacesError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PlacesError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlacesError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            PlacesError::ServerMisconfigured("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PlacesError::upstream(403, "denied").status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_upstream_non_error_status_becomes_bad_gateway() {
        assert_eq!(
            PlacesError::upstream(302, "redirect").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            PlacesError::upstream(200, "body status").status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let body = body_json(PlacesError::BadRequest("Missing lat or lng parameters".into())).await;
        assert_eq!(body["error"], "Missing lat or lng parameters");
        assert!(body.get("message").is_none());

        let body = body_json(PlacesError::InternalError("connection reset".into())).await;
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "connection reset");
    }
}
