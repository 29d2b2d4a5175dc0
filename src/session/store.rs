//! Concurrent in-memory store mapping local users to credentials.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Credential, Result, StoreError};

/// A caller-local identity that credentials are saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Generated unique identifier.
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A credential as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    /// Generated identifier of this record.
    pub id: String,
    /// The user the record was saved for.
    pub user_id: String,
    pub credential: Credential,
}

/// Record counts, orphaned credentials included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub users: usize,
    pub credentials: usize,
}

/// Process-lifetime store of users and their credentials.
///
/// Each user maps to at most one live credential. Saving again for the same
/// user replaces the mapping and leaves the previous record orphaned; it is
/// still counted by [`SessionStore::stats`] until [`SessionStore::clear`].
///
/// All methods take `&self` and are safe to call from many threads. Writes
/// to one user's mapping hold that entry's lock across the credential insert
/// or removal, so a reader never sees a mapping without its record.
#[derive(Debug, Default)]
pub struct SessionStore {
    users: DashMap<String, User>,
    credentials: DashMap<String, StoredCredential>,
    /// user id -> credential id
    user_credentials: DashMap<String, String>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user with a fresh unique ID.
    pub fn create_user(&self, name: &str) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        self.users.insert(user.id.clone(), user.clone());
        info!(user_id = %user.id, "Created user: {}", name);
        user
    }

    /// Look up a user by ID.
    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.value().clone())
    }

    /// Find the first user with the given name.
    pub fn find_user_by_name(&self, name: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.name == name)
            .map(|u| u.value().clone())
    }

    /// Save credentials for a user, replacing any previous mapping.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if `user_id` was not created by this
    /// store, or `StoreError::InvalidCredential` if validation fails.
    pub fn save_credential(&self, user_id: &str, credential: Credential) -> Result<StoredCredential> {
        if !self.users.contains_key(user_id) {
            return Err(StoreError::UserNotFound(user_id.to_string()));
        }
        credential.validate()?;

        let stored = StoredCredential {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            credential,
        };

        let mapping = self.user_credentials.entry(user_id.to_string());
        if let Entry::Occupied(previous) = &mapping {
            debug!(user_id, previous = %previous.get(), "Replacing credential mapping");
        }
        self.credentials.insert(stored.id.clone(), stored.clone());
        mapping.insert(stored.id.clone());

        info!(
            user_id,
            domain = %stored.credential.domain(),
            "Saved JIRA credentials"
        );
        Ok(stored)
    }

    /// Look up the credential currently mapped to a user.
    pub fn get_credential(&self, user_id: &str) -> Option<StoredCredential> {
        let credential_id = self.user_credentials.get(user_id)?;
        self.credentials
            .get(credential_id.value())
            .map(|c| c.value().clone())
    }

    /// Replace the contents of an existing record.
    ///
    /// The record keeps its ID, owner and creation time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CredentialNotFound` for an unknown record, or
    /// `StoreError::InvalidCredential` if validation fails.
    pub fn update_credential(
        &self,
        credential_id: &str,
        credential: Credential,
    ) -> Result<StoredCredential> {
        credential.validate()?;

        let mut existing = self
            .credentials
            .get_mut(credential_id)
            .ok_or_else(|| StoreError::CredentialNotFound(credential_id.to_string()))?;

        let created_at = existing.credential.created_at();
        existing.credential = credential.with_created_at(created_at);

        info!(credential_id, "Updated JIRA credentials");
        Ok(existing.value().clone())
    }

    /// Remove a user's credential mapping and its record.
    ///
    /// Returns whether anything was deleted.
    pub fn delete_credential(&self, user_id: &str) -> bool {
        match self.user_credentials.entry(user_id.to_string()) {
            Entry::Occupied(mapping) => {
                self.credentials.remove(mapping.get());
                mapping.remove();
                info!(user_id, "Deleted JIRA credentials");
                true
            }
            Entry::Vacant(_) => false,
        }
    }

    /// Whether a credential is mapped to the user.
    pub fn has_credential(&self, user_id: &str) -> bool {
        self.user_credentials.contains_key(user_id)
    }

    /// Count users and credential records.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            users: self.users.len(),
            credentials: self.credentials.len(),
        }
    }

    /// Drop every user and credential.
    pub fn clear(&self) {
        self.user_credentials.clear();
        self.credentials.clear();
        self.users.clear();
        info!("Cleared session store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn credential() -> Credential {
        Credential::new("test.atlassian.net", "test@example.com", "token123")
    }

    #[test]
    fn test_create_user() {
        let store = SessionStore::new();
        let user = store.create_user("testuser");

        assert!(!user.id.is_empty());
        assert_eq!(user.name, "testuser");
        assert_eq!(store.get_user(&user.id), Some(user));
    }

    #[test]
    fn test_create_user_ids_are_unique() {
        let store = SessionStore::new();
        let a = store.create_user("same");
        let b = store.create_user("same");
        assert_ne!(a.id, b.id);
        assert_eq!(store.stats().users, 2);
    }

    #[test]
    fn test_find_user_by_name() {
        let store = SessionStore::new();
        let user = store.create_user("alice");
        store.create_user("bob");

        assert_eq!(store.find_user_by_name("alice").map(|u| u.id), Some(user.id));
        assert!(store.find_user_by_name("carol").is_none());
    }

    #[test]
    fn test_save_credential_unknown_user() {
        let store = SessionStore::new();
        let result = store.save_credential("missing", credential());
        assert_eq!(result, Err(StoreError::UserNotFound("missing".to_string())));
        assert!(!store.has_credential("missing"));
    }

    #[test]
    fn test_save_invalid_credential_rejected() {
        let store = SessionStore::new();
        let user = store.create_user("testuser");

        let result = store.save_credential(&user.id, Credential::new("", "a@b.c", "t"));
        assert!(matches!(result, Err(StoreError::InvalidCredential(_))));
        assert!(!store.has_credential(&user.id));
    }

    #[test]
    fn test_save_and_get_credential() {
        let store = SessionStore::new();
        let user = store.create_user("testuser");

        let saved = store.save_credential(&user.id, credential()).unwrap();
        assert!(!saved.id.is_empty());
        assert_eq!(saved.user_id, user.id);

        assert!(store.has_credential(&user.id));
        let retrieved = store.get_credential(&user.id).unwrap();
        assert_eq!(retrieved.id, saved.id);
        assert_eq!(retrieved.credential.domain(), "test.atlassian.net");
    }

    #[test]
    fn test_second_save_replaces_mapping_and_orphans_previous() {
        let store = SessionStore::new();
        let user = store.create_user("testuser");

        let first = store.save_credential(&user.id, credential()).unwrap();
        let second = store
            .save_credential(
                &user.id,
                Credential::new("other.atlassian.net", "test@example.com", "token456"),
            )
            .unwrap();

        assert_ne!(first.id, second.id);
        let current = store.get_credential(&user.id).unwrap();
        assert_eq!(current.id, second.id);
        assert_eq!(current.credential.domain(), "other.atlassian.net");
        assert_eq!(store.stats().credentials, 2);
    }

    #[test]
    fn test_delete_credential_is_idempotent() {
        let store = SessionStore::new();
        let user = store.create_user("testuser");
        store.save_credential(&user.id, credential()).unwrap();

        assert!(store.delete_credential(&user.id));
        assert!(!store.has_credential(&user.id));
        assert!(store.get_credential(&user.id).is_none());
        assert_eq!(store.stats().credentials, 0);

        assert!(!store.delete_credential(&user.id));
    }

    #[test]
    fn test_update_credential_keeps_identity() {
        let store = SessionStore::new();
        let user = store.create_user("testuser");
        let saved = store.save_credential(&user.id, credential()).unwrap();

        let updated = store
            .update_credential(
                &saved.id,
                Credential::new("new.atlassian.net", "new@example.com", "t2").with_remember(true),
            )
            .unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.user_id, user.id);
        assert_eq!(updated.credential.domain(), "new.atlassian.net");
        assert!(updated.credential.remember());
        assert_eq!(
            updated.credential.created_at(),
            saved.credential.created_at()
        );
        assert_eq!(store.get_credential(&user.id), Some(updated));
    }

    #[test]
    fn test_update_unknown_credential() {
        let store = SessionStore::new();
        let result = store.update_credential("nope", credential());
        assert_eq!(result, Err(StoreError::CredentialNotFound("nope".to_string())));
    }

    #[test]
    fn test_clear() {
        let store = SessionStore::new();
        let user = store.create_user("testuser");
        store.save_credential(&user.id, credential()).unwrap();

        store.clear();
        assert_eq!(store.stats(), StoreStats { users: 0, credentials: 0 });
        assert!(!store.has_credential(&user.id));
    }

    #[test]
    fn test_concurrent_saves_and_reads() {
        let store = Arc::new(SessionStore::new());
        let users: Vec<User> = (0..8).map(|i| store.create_user(&format!("u{}", i))).collect();

        let handles: Vec<_> = users
            .iter()
            .cloned()
            .map(|user| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for round in 0..50 {
                        let domain = format!("site{}.atlassian.net", round);
                        store
                            .save_credential(&user.id, Credential::new(domain, "a@b.io", "t"))
                            .unwrap();
                        let current = store.get_credential(&user.id).unwrap();
                        assert_eq!(current.user_id, user.id);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        for user in &users {
            let current = store.get_credential(&user.id).unwrap();
            assert_eq!(current.credential.domain(), "site49.atlassian.net");
        }
        assert_eq!(store.stats().credentials, 8 * 50);
    }
}
