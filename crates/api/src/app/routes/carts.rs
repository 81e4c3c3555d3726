use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde_json::json;

use freshmart_store::DocumentId;

use crate::app::dto::CartQuery;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::Caller;

pub const CARTS_COLLECTION: &str = "carts";

/// GET /carts?email= returns the cart items owned by `email`.
///
/// The caller must hold a token, and may only read their own cart. No
/// email at all is answered with an empty list before the ownership check;
/// the storefront calls it that way while a cart is still empty.
pub async fn list_cart_items(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Caller,
    Query(query): Query<CartQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(email) = query.email else {
        return Ok(Json(json!([])));
    };

    authz::ensure_owner(&caller, &email)?;

    let documents = services
        .store
        .find_by_field(CARTS_COLLECTION, "email", &email)
        .await?;
    let items: Vec<_> = documents.iter().map(|doc| doc.to_json()).collect();
    Ok(Json(serde_json::Value::Array(items)))
}

/// POST /carts adds a cart item, stored as sent.
///
/// NOTE: open by contract with the current storefront; the `email` field in
/// the body declares the owner unchecked. See the promotion note in
/// `users.rs`; both gates land together.
pub async fn add_cart_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(item): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let document = services.store.insert(CARTS_COLLECTION, item).await?;
    Ok(Json(document.to_json()))
}

/// DELETE /carts/:id drops one cart item by document id.
pub async fn delete_cart_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id: DocumentId = id
        .parse()
        .map_err(|_| ApiError::bad_request("invalid cart item id"))?;

    let outcome = services.store.delete(CARTS_COLLECTION, id).await?;
    Ok(Json(json!(outcome)))
}
