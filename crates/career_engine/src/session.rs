//! Session persistence on top of a [`KeyValueStore`].
//!
//! The session lives under two keys: `token` holds the bearer string and
//! `user` holds the JSON-encoded [`SessionUser`]. Both are written and removed
//! together.

use std::sync::Arc;

use career_core::{Session, SessionUser, StoredSession};
use career_logging::{career_debug, career_warn};

use crate::store::{KeyValueStore, MemoryStore, StoreError};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn load(&self) -> Result<StoredSession, StoreError> {
        let token = self.store.get(TOKEN_KEY)?.filter(|token| !token.is_empty());
        let user = self.store.get(USER_KEY)?;
        let (Some(token), Some(user)) = (token, user) else {
            career_debug!("No stored session");
            return Ok(StoredSession::Missing);
        };
        match serde_json::from_str::<SessionUser>(&user) {
            Ok(user) => Ok(StoredSession::Present(Session { token, user })),
            Err(err) => {
                career_warn!("Stored user record does not decode: {}", err);
                Ok(StoredSession::Corrupt)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let user = serde_json::to_string(&session.user)
            .map_err(|err| StoreError::Encode(err.to_string()))?;
        self.store.write_batch(&[
            (TOKEN_KEY, Some(session.token.as_str())),
            (USER_KEY, Some(user.as_str())),
        ])
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.write_batch(&[(TOKEN_KEY, None), (USER_KEY, None)])
    }

    /// Bearer token if one is stored; read errors count as no token.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                career_warn!("Cannot read stored token: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "tok".to_string(),
            user: SessionUser {
                user_id: "u-1".to_string(),
                email: "ada@example.com".to_string(),
                full_name: None,
            },
        }
    }

    #[test]
    fn save_then_load_returns_session() {
        let store = SessionStore::in_memory();
        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), StoredSession::Present(session()));
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn user_is_stored_as_json() {
        let backing = Arc::new(MemoryStore::new());
        let store = SessionStore::new(backing.clone());
        store.save(&session()).unwrap();
        let raw = backing.get(USER_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["email"], "ada@example.com");
        assert_eq!(value["user_id"], "u-1");
    }

    #[test]
    fn token_without_user_is_missing() {
        let backing = Arc::new(MemoryStore::new());
        backing.set(TOKEN_KEY, "tok").unwrap();
        let store = SessionStore::new(backing);
        assert_eq!(store.load().unwrap(), StoredSession::Missing);
    }

    #[test]
    fn undecodable_user_is_corrupt() {
        let backing = Arc::new(MemoryStore::new());
        backing.set(TOKEN_KEY, "tok").unwrap();
        backing.set(USER_KEY, "{not json").unwrap();
        let store = SessionStore::new(backing);
        assert_eq!(store.load().unwrap(), StoredSession::Corrupt);
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = SessionStore::in_memory();
        store.save(&session()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), StoredSession::Missing);
        assert!(store.token().is_none());
    }
}
