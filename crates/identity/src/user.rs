//! Typed view over stored user documents.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use freshmart_store::{Document, DocumentId};

/// A user's role.
///
/// Roles are open-ended strings on the wire; the only one with meaning to
/// the access checks is [`Role::ADMIN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub const ADMIN: &'static str = "admin";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn admin() -> Self {
        Self(Self::ADMIN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.0 == Self::ADMIN
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user document with its identity fields pulled out.
///
/// The rest of the profile stays as opaque JSON; sign-in providers send
/// whatever they send and the storefront displays it untouched.
#[derive(Debug, Clone)]
pub struct UserRecord {
    document: Document,
    email: String,
    role: Option<Role>,
}

impl UserRecord {
    /// Read a user record out of a raw document.
    ///
    /// Documents without a string `email` field are not user records;
    /// directory reads skip them.
    pub fn from_document(document: Document) -> Option<Self> {
        let email = document.body.get("email")?.as_str()?.to_string();
        let role = document
            .body
            .get("role")
            .and_then(JsonValue::as_str)
            .map(Role::new);
        Some(Self {
            document,
            email,
            role,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.document.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(Role::is_admin)
    }

    /// Wire shape: the full profile with the document id folded in.
    pub fn to_json(&self) -> JsonValue {
        self.document.to_json()
    }
}
