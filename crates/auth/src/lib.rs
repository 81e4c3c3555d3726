//! `freshmart-auth`: bearer-token issuance and verification.
//!
//! Deliberately free of HTTP and storage concerns: this crate knows how to
//! mint and check tokens, nothing about who may do what with them.

pub mod claims;
pub mod codec;

pub use claims::{validate_claims, Claims, TokenValidationError};
pub use codec::{TokenCodec, TokenError};
