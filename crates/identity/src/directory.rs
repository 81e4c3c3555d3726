//! The user directory: registration, role lookups, promotion.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

use freshmart_store::{DocumentId, DocumentStore, StoreError, UpdateOutcome};

use crate::user::{Role, UserRecord};

/// Collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

/// Storage-backed directory mapping identity claims (emails) to user
/// records.
///
/// The directory owns no policy. Who may register, list, or promote is the
/// caller's problem; this type only answers questions about what is stored.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn DocumentStore>,
}

/// Outcome of a registration attempt.
///
/// An existing email is deliberately not an error: sign-in providers re-post
/// the same profile on every login, and registration has to stay idempotent
/// under that.
#[derive(Debug, Clone)]
pub enum Registration {
    Created(UserRecord),
    AlreadyExists,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The profile carried no usable `email` field.
    #[error("user profile has no email")]
    MissingEmail,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Store a user profile, keyed by its `email` field.
    ///
    /// Lookup-then-insert is not transactional, so two concurrent first
    /// registrations of one email can both land. Reads resolve by first
    /// match and inserts are atomic, which keeps the race harmless.
    pub async fn register(&self, profile: JsonValue) -> Result<Registration, DirectoryError> {
        let email = profile
            .get("email")
            .and_then(JsonValue::as_str)
            .ok_or(DirectoryError::MissingEmail)?
            .to_string();

        if self
            .store
            .find_one_by_field(USERS_COLLECTION, "email", &email)
            .await?
            .is_some()
        {
            tracing::debug!(email = %email, "registration replay, keeping existing record");
            return Ok(Registration::AlreadyExists);
        }

        let document = self.store.insert(USERS_COLLECTION, profile).await?;
        match UserRecord::from_document(document) {
            Some(record) => Ok(Registration::Created(record)),
            // Unreachable: the email was checked above.
            None => Err(DirectoryError::MissingEmail),
        }
    }

    /// Set `role = "admin"` on the user document with the given id.
    ///
    /// Promoting an already-admin user matches without modifying; an
    /// unknown id matches nothing. Neither is an error.
    pub async fn promote_to_admin(&self, id: DocumentId) -> Result<UpdateOutcome, DirectoryError> {
        let outcome = self
            .store
            .set_field(
                USERS_COLLECTION,
                id,
                "role",
                JsonValue::String(Role::ADMIN.to_string()),
            )
            .await?;
        tracing::info!(user_id = %id, matched = outcome.matched, "admin promotion applied");
        Ok(outcome)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DirectoryError> {
        let document = self
            .store
            .find_one_by_field(USERS_COLLECTION, "email", email)
            .await?;
        Ok(document.and_then(UserRecord::from_document))
    }

    /// Role check behind the admin gate. Unknown emails are simply not
    /// admins.
    pub async fn is_admin(&self, email: &str) -> Result<bool, DirectoryError> {
        Ok(self
            .find_by_email(email)
            .await?
            .is_some_and(|user| user.is_admin()))
    }

    /// Every user record, oldest first.
    pub async fn list(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        let documents = self.store.list(USERS_COLLECTION).await?;
        Ok(documents
            .into_iter()
            .filter_map(UserRecord::from_document)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freshmart_store::InMemoryDocumentStore;
    use serde_json::json;

    fn directory() -> UserDirectory {
        UserDirectory::new(Arc::new(InMemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn register_then_find_round_trips_the_profile() {
        let directory = directory();
        let outcome = directory
            .register(json!({ "email": "a@x.com", "name": "Ada" }))
            .await
            .unwrap();

        let Registration::Created(record) = outcome else {
            panic!("expected a created record");
        };
        assert_eq!(record.email(), "a@x.com");

        let found = directory.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id(), record.id());
        assert_eq!(found.to_json()["name"], json!("Ada"));
    }

    #[tokio::test]
    async fn repeat_registration_keeps_one_record() {
        let directory = directory();
        directory
            .register(json!({ "email": "a@x.com", "name": "Ada" }))
            .await
            .unwrap();

        let replay = directory
            .register(json!({ "email": "a@x.com", "name": "Someone Else" }))
            .await
            .unwrap();
        let Registration::AlreadyExists = replay else {
            panic!("expected the existing-user sentinel");
        };

        let users = directory.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].to_json()["name"], json!("Ada"));
    }

    #[tokio::test]
    async fn registration_requires_an_email() {
        let directory = directory();
        let rejected = directory.register(json!({ "name": "No Email" })).await;
        let Err(DirectoryError::MissingEmail) = rejected else {
            panic!("expected a missing-email rejection, got {rejected:?}");
        };
    }

    #[tokio::test]
    async fn promotion_flips_the_admin_check() {
        let directory = directory();
        let Registration::Created(record) = directory
            .register(json!({ "email": "a@x.com" }))
            .await
            .unwrap()
        else {
            panic!("expected a created record");
        };

        assert!(!directory.is_admin("a@x.com").await.unwrap());

        let outcome = directory.promote_to_admin(record.id()).await.unwrap();
        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.modified, 1);

        assert!(directory.is_admin("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn promoting_an_unknown_id_matches_nothing() {
        let directory = directory();
        let outcome = directory.promote_to_admin(DocumentId::new()).await.unwrap();
        assert_eq!(outcome.matched, 0);
        assert_eq!(outcome.modified, 0);
    }

    #[tokio::test]
    async fn unknown_emails_are_not_admins() {
        let directory = directory();
        assert!(!directory.is_admin("ghost@x.com").await.unwrap());
    }
}
