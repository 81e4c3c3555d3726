//! Open catalog reads: whole collections, served verbatim.
//!
//! The storefront renders these on public pages, so there is no auth here
//! on purpose.

use std::sync::Arc;

use axum::{extract::Extension, Json};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub const PRODUCTS_COLLECTION: &str = "products";
pub const DISCOUNT_COLLECTION: &str = "discount";
pub const CATEGORIES_COLLECTION: &str = "categories";
pub const POPULAR_COLLECTION: &str = "popular";

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    list_collection(&services, PRODUCTS_COLLECTION).await
}

pub async fn list_discounts(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    list_collection(&services, DISCOUNT_COLLECTION).await
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    list_collection(&services, CATEGORIES_COLLECTION).await
}

pub async fn list_popular(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    list_collection(&services, POPULAR_COLLECTION).await
}

async fn list_collection(
    services: &AppServices,
    collection: &str,
) -> Result<Json<serde_json::Value>, ApiError> {
    let documents = services.store.list(collection).await?;
    let items: Vec<_> = documents.iter().map(|doc| doc.to_json()).collect();
    Ok(Json(serde_json::Value::Array(items)))
}
