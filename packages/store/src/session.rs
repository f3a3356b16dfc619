//! # Session store
//!
//! The authentication API returns a JWT, its expiry and the user id. They are
//! persisted as three independent keys (see [`crate::config::SessionConfig`]);
//! writes are not atomic across the keys, so every read treats a partially
//! written session as absent.
//!
//! A session is valid only while all three values are present and the expiry
//! lies in the future. Checking an expired (or unreadable) expiry clears the
//! stored session, so the next page load starts from the login screen.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::config::SessionConfig;
use crate::memory::MemoryStore;
use crate::storage::{KeyValueStore, StorageError};

/// The values returned by a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    /// Expiry exactly as the server sent it.
    pub expires_at: String,
    pub user_id: String,
}

impl Session {
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        parse_expiry(&self.expires_at)
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty()
            && !self.user_id.is_empty()
            && self.expiry().is_some_and(|expiry| now < expiry)
    }
}

/// Parse an expiry timestamp. Accepts RFC 3339 and offset-less ISO 8601
/// date-times; the latter are read in the local time zone, the way the
/// browser reads them.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| local_to_utc(&naive))
}

/// Offset-less times inside a DST gap have no local reading; ambiguous ones
/// take the earlier instant.
fn local_to_utc(naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Reads and writes the session keys on a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
    keys: SessionConfig,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, keys: SessionConfig) -> Self {
        Self { backend, keys }
    }

    /// A session held only in memory, with the default key names.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), SessionConfig::default())
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.backend.set(&self.keys.token_key, &session.token)?;
        self.backend.set(&self.keys.expiry_key, &session.expires_at)?;
        self.backend.set(&self.keys.user_id_key, &session.user_id)?;
        tracing::debug!(user_id = %session.user_id, expires_at = %session.expires_at, "session stored");
        Ok(())
    }

    /// The stored session, if all three values are present.
    pub fn load(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            expires_at: self.expiry()?,
            user_id: self.user_id()?,
        })
    }

    pub fn token(&self) -> Option<String> {
        self.read(&self.keys.token_key)
    }

    pub fn expiry(&self) -> Option<String> {
        self.read(&self.keys.expiry_key)
    }

    pub fn user_id(&self) -> Option<String> {
        self.read(&self.keys.user_id_key)
    }

    fn read(&self, key: &str) -> Option<String> {
        self.backend.get(key).filter(|v| !v.is_empty())
    }

    /// Remove all three keys. Failures are logged; a half-cleared session
    /// already reads as absent.
    pub fn clear(&self) {
        for key in [
            &self.keys.token_key,
            &self.keys.expiry_key,
            &self.keys.user_id_key,
        ] {
            if let Err(e) = self.backend.remove(key) {
                tracing::warn!("Failed to remove {key}: {e}");
            }
        }
        tracing::debug!("session cleared");
    }

    /// Whether a complete, unexpired session is stored at `now`. An expired or
    /// unparseable expiry clears the session.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        let Some(session) = self.load() else {
            return false;
        };
        if session.is_valid_at(now) {
            true
        } else {
            tracing::info!("session expired at {}", session.expires_at);
            self.clear();
            false
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn session(expires_at: &str) -> Session {
        Session {
            token: "jwt".into(),
            expires_at: expires_at.into(),
            user_id: "42".into(),
        }
    }

    #[test]
    fn test_parse_expiry_formats() {
        let expected = now();
        assert_eq!(parse_expiry("2025-03-01T12:00:00Z"), Some(expected));
        assert_eq!(parse_expiry("2025-03-01T09:00:00-03:00"), Some(expected));
        assert_eq!(parse_expiry("tomorrow"), None);
    }

    #[test]
    fn test_offsetless_expiry_is_local_time() {
        let local = Local
            .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
        assert!(local.is_some());
        assert_eq!(parse_expiry("2025-03-01T12:00:00"), local);
        assert_eq!(parse_expiry("2025-03-01T12:00:00.000"), local);
        assert_eq!(parse_expiry("2025-03-01 12:00:00"), local);
    }

    #[test]
    fn test_offsetless_expiry_one_hour_ahead_is_valid() {
        // A backend that omits the offset writes its own wall clock
        let expires = (Local::now() + Duration::hours(1))
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();
        let store = SessionStore::in_memory();
        store.save(&session(&expires)).unwrap();
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_valid_session_is_authenticated() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated_at(now()));

        store.save(&session("2025-03-01T13:00:00Z")).unwrap();
        assert!(store.is_authenticated_at(now()));
        assert_eq!(store.token().as_deref(), Some("jwt"));
        assert_eq!(store.user_id().as_deref(), Some("42"));
    }

    #[test]
    fn test_expired_session_is_cleared() {
        let store = SessionStore::in_memory();
        store.save(&session("2025-03-01T11:59:59Z")).unwrap();

        assert!(!store.is_authenticated_at(now()));
        assert!(store.load().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_expiry_equal_to_now_is_expired() {
        let s = session("2025-03-01T12:00:00Z");
        assert!(!s.is_valid_at(now()));
        assert!(s.is_valid_at(now() - Duration::seconds(1)));
    }

    #[test]
    fn test_partial_session_is_not_authenticated() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::new(backend.clone(), SessionConfig::default());
        backend.set("authToken", "jwt").unwrap();
        backend.set("authTokenExpiry", "2099-01-01T00:00:00Z").unwrap();

        // userId missing
        assert!(!store.is_authenticated_at(now()));
        // Partial sessions are left alone
        assert_eq!(backend.get("authToken").as_deref(), Some("jwt"));

        backend.set("userId", "7").unwrap();
        assert!(store.is_authenticated_at(now()));
    }

    #[test]
    fn test_unparseable_expiry_is_cleared() {
        let store = SessionStore::in_memory();
        store.save(&session("not a date")).unwrap();
        assert!(!store.is_authenticated_at(now()));
        assert!(store.expiry().is_none());
    }

    #[test]
    fn test_clear_removes_all_keys() {
        let backend = Arc::new(MemoryStore::new());
        let store = SessionStore::new(backend.clone(), SessionConfig::default());
        store.save(&session("2099-01-01T00:00:00Z")).unwrap();
        assert_eq!(backend.len(), 3);
        store.clear();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_custom_key_names() {
        let backend = Arc::new(MemoryStore::new());
        let keys = SessionConfig {
            token_key: "t".into(),
            expiry_key: "e".into(),
            user_id_key: "u".into(),
        };
        let store = SessionStore::new(backend.clone(), keys);
        store.save(&session("2099-01-01T00:00:00Z")).unwrap();
        assert_eq!(backend.get("t").as_deref(), Some("jwt"));
        assert_eq!(backend.get("u").as_deref(), Some("42"));
    }
}
