//! Authorization checks layered on top of the authenticated caller.
//!
//! Both checks take a [`Caller`], so they can only run after authentication
//! has succeeded; a handler cannot reach a 403 without having passed the
//! 401 gate first.

use freshmart_identity::UserDirectory;

use crate::app::errors::ApiError;
use crate::context::Caller;

/// Admit only callers whose directory record carries the admin role.
///
/// A caller with no record and a caller with a non-admin role are rejected
/// identically; the response leaks nothing about directory contents.
pub async fn require_admin(directory: &UserDirectory, caller: &Caller) -> Result<(), ApiError> {
    if directory.is_admin(caller.email()).await? {
        Ok(())
    } else {
        Err(ApiError::forbidden_role())
    }
}

/// Admit only requests whose declared resource owner is the caller.
pub fn ensure_owner(caller: &Caller, owner_email: &str) -> Result<(), ApiError> {
    if caller.email() == owner_email {
        Ok(())
    } else {
        Err(ApiError::forbidden_owner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use freshmart_identity::Registration;
    use freshmart_store::InMemoryDocumentStore;
    use serde_json::json;

    fn caller(email: &str) -> Caller {
        Caller::new(email.to_string())
    }

    #[test]
    fn owner_check_compares_the_token_identity() {
        assert!(ensure_owner(&caller("a@x.com"), "a@x.com").is_ok());

        let denied = ensure_owner(&caller("a@x.com"), "b@x.com");
        assert!(matches!(denied, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn admin_check_requires_the_admin_role() {
        let directory = UserDirectory::new(Arc::new(InMemoryDocumentStore::new()));

        // Unknown caller.
        assert!(require_admin(&directory, &caller("a@x.com")).await.is_err());

        let Registration::Created(record) = directory
            .register(json!({ "email": "a@x.com" }))
            .await
            .unwrap()
        else {
            panic!("expected a created record");
        };

        // Known, but not an admin.
        assert!(require_admin(&directory, &caller("a@x.com")).await.is_err());

        directory.promote_to_admin(record.id()).await.unwrap();
        assert!(require_admin(&directory, &caller("a@x.com")).await.is_ok());
    }
}
