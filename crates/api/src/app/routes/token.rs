use std::sync::Arc;

use axum::{extract::Extension, Json};
use serde_json::json;

use crate::app::dto::TokenRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// POST /jwt exchanges a signed-in identity for a bearer token.
///
/// Sign-in itself happens upstream (an OAuth provider in front of the
/// storefront), so the email is taken on faith here; the token just binds
/// it for the next hour. Issuance is pure computation, nothing is stored.
pub async fn issue_token(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = services
        .codec
        .issue(&body.email)
        .map_err(|_| ApiError::Internal("token signing failed"))?;

    Ok(Json(json!({ "token": token })))
}
