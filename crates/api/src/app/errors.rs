//! Consistent error responses.
//!
//! Every failure leaves the API as `{"error": true, "message": ...}` with
//! the status carrying the meaning. Auth failures are deliberately
//! cause-blind: from outside, every rejected token reads the same.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use thiserror::Error;

use freshmart_identity::DirectoryError;
use freshmart_store::StoreError;

/// Denial message for the admin gate.
pub const FORBIDDEN_ROLE: &str = "forbidden message";
/// Denial message for ownership checks.
pub const FORBIDDEN_OWNER: &str = "forbidden access";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, unverifiable, or expired bearer token.
    #[error("unauthorized access")]
    Unauthorized,

    /// Authenticated, but the role or ownership check said no.
    #[error("{0}")]
    Forbidden(&'static str),

    /// Unusable client input, such as a malformed document id.
    #[error("{0}")]
    BadRequest(String),

    /// Storage failed. The detail is logged, never put on the wire.
    #[error("internal server error")]
    Store(#[from] StoreError),

    #[error("internal server error")]
    Directory(#[from] DirectoryError),

    /// Server-side wiring or signing failure.
    #[error("internal server error")]
    Internal(&'static str),
}

impl ApiError {
    pub fn forbidden_role() -> Self {
        Self::Forbidden(FORBIDDEN_ROLE)
    }

    pub fn forbidden_owner() -> Self {
        Self::Forbidden(FORBIDDEN_OWNER)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Directory(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed server-side");
        }

        json_error(status, self.to_string())
    }
}

/// Build the uniform error envelope.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": true,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_share_one_message() {
        assert_eq!(ApiError::Unauthorized.to_string(), "unauthorized access");
    }

    #[test]
    fn forbidden_messages_distinguish_role_from_ownership() {
        assert_eq!(ApiError::forbidden_role().to_string(), "forbidden message");
        assert_eq!(ApiError::forbidden_owner().to_string(), "forbidden access");
    }

    #[test]
    fn backend_failures_never_leak_detail() {
        let err = ApiError::Store(StoreError::Backend("connection refused".to_string()));
        assert_eq!(err.to_string(), "internal server error");
    }
}
