//! Bearer-token authentication for handlers.
//!
//! Auth is enforced per handler rather than per route group because several
//! paths mix guarded and open methods (`/users` is open to POST, gated for
//! GET). A handler opts in by taking [`Caller`] as an extractor argument.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::Caller;

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let services = parts
            .extensions
            .get::<Arc<AppServices>>()
            .cloned()
            .ok_or(ApiError::Internal("services extension missing"))?;

        // No header means no verification attempt at all.
        let token = extract_bearer(&parts.headers)?;

        let claims = services.codec.verify(token).map_err(|err| {
            tracing::debug!(error = %err, "bearer token rejected");
            ApiError::Unauthorized
        })?;

        Ok(Caller::new(claims.sub))
    }
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized)?;

    let header = header.to_str().map_err(|_| ApiError::Unauthorized)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(ApiError::Unauthorized);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        let rejected = extract_bearer(&headers);
        assert!(matches!(rejected, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn non_bearer_schemes_are_unauthorized() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert!(matches!(extract_bearer(&headers), Err(ApiError::Unauthorized)));
    }

    #[test]
    fn empty_bearer_is_unauthorized() {
        let headers = headers_with_auth("Bearer   ");
        assert!(matches!(extract_bearer(&headers), Err(ApiError::Unauthorized)));
    }
}
