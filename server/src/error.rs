//! Error types for the arena server.
//!
//! [`ArenaError`] is what a request can fail with; it converts straight
//! into an HTTP response. [`ServerError`] covers binding and serving.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// Token missing or not the one issued for the agent.
    #[error("bad token")]
    Unauthorized,

    /// The agent id was never registered.
    #[error("agent gone")]
    UnknownAgent(String),
}

impl ArenaError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UnknownAgent(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ArenaError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bind error: {0}")]
    Bind(String),

    #[error("serve error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ArenaError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ArenaError::UnknownAgent("claw_1_a".to_string()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ArenaError::Unauthorized.to_string(), "bad token");
        assert_eq!(
            ArenaError::UnknownAgent("claw_1_a".to_string()).to_string(),
            "agent gone"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ArenaError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
