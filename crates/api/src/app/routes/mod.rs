//! Route table and handlers, one file per domain area.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub mod carts;
pub mod catalog;
pub mod system;
pub mod token;
pub mod users;

/// The full route table.
///
/// Auth is decided per handler (via the `Caller` extractor), not per route
/// group: `/users` is open for POST but admin-gated for GET, and the cart
/// paths mix open writes with guarded reads.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/jwt", post(token::issue_token))
        .route("/users", post(users::register_user).get(users::list_users))
        // One registration with one parameter name: PATCH reads it as a
        // document id, GET as an email. Two names on one segment would be
        // rejected by the router.
        .route(
            "/users/admin/:key",
            patch(users::promote_to_admin).get(users::admin_status),
        )
        .route("/products", get(catalog::list_products))
        .route("/discount", get(catalog::list_discounts))
        .route("/categories", get(catalog::list_categories))
        .route("/popular", get(catalog::list_popular))
        .route("/carts", get(carts::list_cart_items).post(carts::add_cart_item))
        .route("/carts/:id", delete(carts::delete_cart_item))
}
