//! Per-request context established by the auth extractor.

/// The authenticated caller for one request.
///
/// Built only after token verification, so the email here is the token's
/// identity claim, never something read from a path or query parameter.
/// Ownership and role checks in `authz` compare against this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    email: String,
}

impl Caller {
    pub(crate) fn new(email: String) -> Self {
        Self { email }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
