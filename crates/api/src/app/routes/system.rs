use axum::http::StatusCode;

/// GET / serves the storefront greeting, doubling as a smoke check.
pub async fn root() -> &'static str {
    "Fresh Grocery!"
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
