//! Token claims and their time-window validation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried inside a bearer token.
///
/// The subject is the caller's email, established by an upstream sign-in
/// flow and trusted here only after the signature checks out. Timestamps
/// are seconds since the Unix epoch, the JWT convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity claim (email).
    pub sub: String,
    /// Issued-at.
    pub iat: i64,
    /// Expiry. Tokens are dead at this instant, not after it.
    pub exp: i64,
}

impl Claims {
    pub fn new(identity: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: identity.into(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.sub
    }
}

/// Why a structurally valid, correctly signed token was still rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,
    #[error("token is not valid yet")]
    NotYetValid,
    #[error("token time window is inverted or empty")]
    InvalidTimeWindow,
}

/// Check the claims' time window against `now`.
///
/// Strict on purpose: no leeway on either edge, and `now == exp` already
/// counts as expired. Signature checking happens elsewhere; this function
/// is the only authority on token lifetime.
pub fn validate_claims(claims: &Claims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn claims_inside_their_window_validate() {
        let claims = Claims::new("u@example.com", now(), Duration::hours(1));
        assert_eq!(validate_claims(&claims, now()), Ok(()));
        assert_eq!(
            validate_claims(&claims, now() + Duration::minutes(59)),
            Ok(())
        );
    }

    #[test]
    fn expiry_is_exclusive() {
        let claims = Claims::new("u@example.com", now(), Duration::hours(1));
        assert_eq!(
            validate_claims(&claims, now() + Duration::hours(1)),
            Err(TokenValidationError::Expired)
        );
        assert_eq!(
            validate_claims(&claims, now() + Duration::hours(2)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn issuance_instant_is_inclusive() {
        let claims = Claims::new("u@example.com", now(), Duration::hours(1));
        assert_eq!(validate_claims(&claims, claims_issue_instant(&claims)), Ok(()));
    }

    fn claims_issue_instant(claims: &Claims) -> DateTime<Utc> {
        Utc.timestamp_opt(claims.iat, 0).unwrap()
    }

    #[test]
    fn tokens_from_the_future_are_rejected() {
        let claims = Claims::new("u@example.com", now() + Duration::hours(1), Duration::hours(1));
        assert_eq!(
            validate_claims(&claims, now()),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_or_empty_windows_are_rejected() {
        let mut claims = Claims::new("u@example.com", now(), Duration::hours(1));
        claims.exp = claims.iat;
        assert_eq!(
            validate_claims(&claims, now()),
            Err(TokenValidationError::InvalidTimeWindow)
        );
        claims.exp = claims.iat - 1;
        assert_eq!(
            validate_claims(&claims, now()),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig { cases: 1000, ..ProptestConfig::default() })]

            /// Claims validate exactly when `iat <= now < exp` and the
            /// window is non-empty, for any placement of `now`.
            #[test]
            fn claims_validate_exactly_inside_their_window(
                iat_offset in -3_600i64..3_600,
                ttl in -600i64..7_200,
                now_offset in -7_200i64..14_400,
            ) {
                let base = now().timestamp();
                let claims = Claims {
                    sub: "u@example.com".to_string(),
                    iat: base + iat_offset,
                    exp: base + iat_offset + ttl,
                };
                let at = Utc.timestamp_opt(base + now_offset, 0).unwrap();

                let expected_ok =
                    ttl > 0 && now_offset >= iat_offset && now_offset < iat_offset + ttl;
                prop_assert_eq!(validate_claims(&claims, at).is_ok(), expected_ok);
            }
        }
    }
}
