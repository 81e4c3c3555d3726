use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};
use serde_json::json;

use freshmart_identity::Registration;
use freshmart_store::DocumentId;

use crate::app::dto::RegisterUserRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::Caller;

/// POST /users records a signed-in user's profile.
///
/// Sign-in providers re-post the profile on every login, so registration is
/// idempotent: a known email answers with a sentinel body and changes
/// nothing.
pub async fn register_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match services.directory.register(body.into_profile()).await? {
        Registration::Created(record) => Ok(Json(record.to_json())),
        Registration::AlreadyExists => Ok(Json(json!({ "message": "user already exists" }))),
    }
}

/// GET /users lists the whole directory. Token plus admin role required.
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Caller,
) -> Result<Json<serde_json::Value>, ApiError> {
    authz::require_admin(&services.directory, &caller).await?;

    let users: Vec<_> = services
        .directory
        .list()
        .await?
        .iter()
        .map(|user| user.to_json())
        .collect();
    Ok(Json(json!(users)))
}

/// PATCH /users/admin/:key sets the admin role on a user document.
///
/// NOTE: open by contract with the current storefront, which promotes the
/// first admin from an unauthenticated session during setup. Gate this
/// behind `require_admin` once a seeded admin exists.
pub async fn promote_to_admin(
    Extension(services): Extension<Arc<AppServices>>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id: DocumentId = key
        .parse()
        .map_err(|_| ApiError::bad_request("invalid user id"))?;

    let outcome = services.directory.promote_to_admin(id).await?;
    Ok(Json(json!(outcome)))
}

/// GET /users/admin/:key answers whether this email is an admin.
///
/// Callers may only ask about themselves. Any other email answers
/// `{"admin": false}` without touching the directory, so the endpoint
/// cannot be used to probe other accounts.
pub async fn admin_status(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Caller,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if caller.email() != key {
        return Ok(Json(json!({ "admin": false })));
    }

    let admin = services.directory.is_admin(&key).await?;
    Ok(Json(json!({ "admin": admin })))
}
