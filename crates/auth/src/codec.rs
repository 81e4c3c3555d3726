//! Signing and verifying bearer tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, Claims, TokenValidationError};

/// Tokens live for one hour unless a caller asks otherwise.
const DEFAULT_TTL_SECS: i64 = 3600;

/// Issues and verifies HS256 bearer tokens.
///
/// Stateless: verification needs only the shared secret and a clock, so any
/// replica can check tokens minted by any other. The trade-off is no
/// server-side revocation; the short expiry bounds the exposure of a leaked
/// token.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    /// Bad signature, or not a token at all.
    #[error("token rejected: {0}")]
    Verification(#[source] jsonwebtoken::errors::Error),
    /// Signed fine, but outside its validity window.
    #[error("token rejected: {0}")]
    Claims(#[from] TokenValidationError),
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::seconds(DEFAULT_TTL_SECS))
    }

    /// Codec with a custom token lifetime. Tests shorten it.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        // The library only checks the signature; expiry is handled by
        // `validate_claims` so the window stays strict (the built-in check
        // grants 60 seconds of leeway).
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Mint a token binding `identity`, valid from now for the configured
    /// lifetime.
    pub fn issue(&self, identity: &str) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(&self, identity: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(identity, now, self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }

    /// Verify a token and hand back its claims.
    ///
    /// Every failure mode lands in [`TokenError`]; callers are expected to
    /// present them identically and log the detail, nothing more.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(TokenError::Verification)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
