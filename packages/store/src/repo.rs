//! # Session repository over an abstract key-value store
//!
//! [`SessionRepository`] persists the signed-in identity so that a restarted
//! client comes back on the dashboard instead of the sign-in form. All reads and
//! writes go through the [`KeyValueStore`] trait, so the same logic works against
//! an in-memory map (tests, ephemeral runs) or the filesystem.
//!
//! ## [`KeyValueStore`] trait
//!
//! An async interface over string keys and string values: `get`, `set` and
//! `remove`. Implementations live in sibling modules ([`crate::memory`],
//! [`crate::file_store`]). Removing a key that does not exist is not an error.
//!
//! ## Persisted layout
//!
//! | Key | Value |
//! |-----|-------|
//! | [`USER_ID_KEY`] (`"userId"`) | server-assigned identity |
//! | [`USER_NAME_KEY`] (`"userName"`) | display name |
//!
//! The two fields are written individually. [`restore`](SessionRepository::restore)
//! only reports a session when both keys hold non-empty values; a half-written
//! record reads as "no session".

use crate::error::StoreError;
use crate::models::Session;

/// Key holding the server-assigned user id.
pub const USER_ID_KEY: &str = "userId";
/// Key holding the display name.
pub const USER_NAME_KEY: &str = "userName";

/// Async trait for storing and retrieving string values by key.
pub trait KeyValueStore {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>>;
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Persisted session identity backed by a KeyValueStore.
#[derive(Clone, Debug)]
pub struct SessionRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted identity, if a complete one exists.
    pub async fn restore(&self) -> Result<Option<Session>, StoreError> {
        let user_id = self.store.get(USER_ID_KEY).await?;
        let name = self.store.get(USER_NAME_KEY).await?;

        Ok(match (user_id, name) {
            (Some(user_id), Some(name)) => Session::new(user_id, name),
            _ => None,
        })
    }

    /// Persist both identity fields.
    pub async fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.store.set(USER_ID_KEY, session.user_id()).await?;
        self.store.set(USER_NAME_KEY, session.name()).await
    }

    /// Remove the persisted identity. Both keys are attempted even if the first
    /// removal fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let id_result = self.store.remove(USER_ID_KEY).await;
        let name_result = self.store.remove(USER_NAME_KEY).await;
        id_result.and(name_result)
    }
}
