//! Request DTOs and JSON mapping helpers.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// POST /jwt body.
///
/// The identity was established upstream (the sign-in provider); anything
/// else in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// POST /users body: an email plus whatever profile fields the sign-in flow
/// sends. The profile is stored verbatim.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    #[serde(flatten)]
    pub profile: Map<String, JsonValue>,
}

impl RegisterUserRequest {
    /// Reassemble the full document body (email plus profile fields).
    pub fn into_profile(self) -> JsonValue {
        let mut body = self.profile;
        body.insert("email".to_string(), JsonValue::String(self.email));
        JsonValue::Object(body)
    }
}

/// GET /carts query string.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_request_keeps_extra_profile_fields() {
        let request: RegisterUserRequest = serde_json::from_value(json!({
            "email": "a@x.com",
            "name": "Ada",
            "photoURL": "https://example.com/a.png"
        }))
        .unwrap();

        let profile = request.into_profile();
        assert_eq!(profile["email"], json!("a@x.com"));
        assert_eq!(profile["name"], json!("Ada"));
        assert_eq!(profile["photoURL"], json!("https://example.com/a.png"));
    }

    #[test]
    fn register_request_requires_an_email() {
        let rejected = serde_json::from_value::<RegisterUserRequest>(json!({ "name": "Ada" }));
        assert!(rejected.is_err());
    }

    #[test]
    fn cart_query_email_is_optional() {
        let query: CartQuery = serde_json::from_value(json!({})).unwrap();
        assert!(query.email.is_none());
    }
}
