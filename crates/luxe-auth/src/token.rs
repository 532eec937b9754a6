//! Access token holder.
//!
//! The token is opaque: it is stored, read back and cleared, never parsed.
//! Expiry is whatever the store enforces.

use std::fmt;

use chrono::Duration;
use luxe_cache::{Cache, KeyValueStore, SameSite, SetOptions};
use serde::{Deserialize, Serialize};

use crate::error::DEFAULT_REJECTION;
use crate::{AuthError, AuthResponse};

/// Storage key for the access token.
pub const TOKEN_KEY: &str = "token";

/// Default token lifetime in days.
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token value. Empty values are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthError> {
        let value = value.into();
        if value.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// In-memory auth state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    access_token: Option<AccessToken>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, token: AccessToken) {
        self.access_token = Some(token);
    }

    pub fn clear(&mut self) {
        self.access_token = None;
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Token lifetime for `days`, if it is positive and representable.
pub fn token_lifetime(days: i64) -> Result<Duration, AuthError> {
    Duration::try_days(days)
        .filter(|d| *d > Duration::zero())
        .ok_or(AuthError::InvalidExpiry(days))
}

/// Keeps [`AuthState`] in step with durable storage.
///
/// Every write goes to the store first, so memory never holds a token the
/// store doesn't.
#[derive(Debug, Clone)]
pub struct TokenHolder<S> {
    cache: Cache<S>,
    state: AuthState,
    expiry_days: i64,
}

impl<S: KeyValueStore> TokenHolder<S> {
    /// Create a holder and read any persisted token.
    pub fn new(store: S) -> Self {
        Self::with_expiry_days(store, DEFAULT_EXPIRY_DAYS)
    }

    pub fn with_expiry_days(store: S, expiry_days: i64) -> Self {
        let mut holder = Self {
            cache: Cache::new(store),
            state: AuthState::new(),
            expiry_days,
        };
        holder.init_auth();
        holder
    }

    /// Cookie attributes the token is written with.
    ///
    /// Fails when the configured lifetime is not a positive number of days.
    pub fn set_options(&self) -> Result<SetOptions, AuthError> {
        Ok(SetOptions::default()
            .expires_in(token_lifetime(self.expiry_days)?)
            .secure()
            .same_site(SameSite::Strict))
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.state.access_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Persist a token and mark the session authenticated.
    pub fn set_access_token(&mut self, token: AccessToken) -> Result<(), AuthError> {
        let options = self.set_options()?;
        self.cache
            .store()
            .set(TOKEN_KEY, token.as_str(), &options)?;
        self.state.set(token);
        tracing::info!("access token stored");
        Ok(())
    }

    /// Remove the token from storage and memory.
    pub fn clear_access_token(&mut self) -> Result<(), AuthError> {
        self.cache.delete(TOKEN_KEY)?;
        self.state.clear();
        tracing::info!("access token cleared");
        Ok(())
    }

    /// Re-read the persisted token.
    ///
    /// A read failure is logged and treated as signed out.
    pub fn refresh_auth(&mut self) {
        let stored = match self.cache.store().get(TOKEN_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "could not read access token");
                None
            }
        };

        match stored.and_then(|v| AccessToken::new(v).ok()) {
            Some(token) => self.state.set(token),
            None => self.state.clear(),
        }
    }

    /// Startup read of the persisted token.
    pub fn init_auth(&mut self) {
        self.refresh_auth();
    }

    /// Apply a login or signup response.
    ///
    /// Only a successful response carrying a token signs in. Anything else
    /// leaves the state untouched and returns [`AuthError::Rejected`] with the
    /// server's message, or a default one.
    pub fn apply_response(
        &mut self,
        ok: bool,
        response: &AuthResponse,
    ) -> Result<AccessToken, AuthError> {
        let token = match (ok, response.token()) {
            (true, Some(token)) => AccessToken::new(token)?,
            _ => {
                let message = response
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
                tracing::info!(%message, "authentication rejected");
                return Err(AuthError::Rejected(message));
            }
        };

        self.set_access_token(token.clone())?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxe_cache::{FileStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_auth_state_transitions() {
        let mut state = AuthState::new();
        assert!(!state.is_authenticated());

        state.set(AccessToken::new("abc").unwrap());
        assert!(state.is_authenticated());
        assert_eq!(state.access_token().unwrap().as_str(), "abc");

        state.clear();
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(AccessToken::new(""), Err(AuthError::EmptyToken)));
    }

    #[test]
    fn test_debug_redacts() {
        let token = AccessToken::new("super-secret").unwrap();
        assert!(!format!("{:?}", token).contains("super-secret"));
    }

    #[test]
    fn test_set_persists_with_cookie_attributes() {
        let store = Arc::new(MemoryStore::new());
        let mut holder = TokenHolder::new(store.clone());

        holder
            .set_access_token(AccessToken::new("abc").unwrap())
            .unwrap();
        assert!(holder.is_authenticated());

        let entry = store.entry(TOKEN_KEY).unwrap().unwrap();
        assert_eq!(entry.value, "abc");
        assert!(entry.secure);
        assert_eq!(entry.same_site, SameSite::Strict);
        assert!(entry.expires_at.is_some());
    }

    #[test]
    fn test_clear_removes_from_store() {
        let store = Arc::new(MemoryStore::new());
        let mut holder = TokenHolder::new(store.clone());
        holder
            .set_access_token(AccessToken::new("abc").unwrap())
            .unwrap();

        holder.clear_access_token().unwrap();
        assert!(!holder.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_token_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut holder = TokenHolder::new(FileStore::open(dir.path()).unwrap());
            holder
                .set_access_token(AccessToken::new("abc").unwrap())
                .unwrap();
        }

        let holder = TokenHolder::new(FileStore::open(dir.path()).unwrap());
        assert_eq!(holder.access_token().unwrap().as_str(), "abc");
    }

    #[test]
    fn test_refresh_picks_up_external_changes() {
        let store = Arc::new(MemoryStore::new());
        let mut holder = TokenHolder::new(store.clone());
        assert!(!holder.is_authenticated());

        store
            .set(TOKEN_KEY, "from-elsewhere", &SetOptions::default())
            .unwrap();
        holder.refresh_auth();
        assert!(holder.is_authenticated());

        store.remove(TOKEN_KEY).unwrap();
        holder.refresh_auth();
        assert!(!holder.is_authenticated());
    }

    #[test]
    fn test_expired_token_reads_as_signed_out() {
        let store = Arc::new(MemoryStore::new());
        let mut holder = TokenHolder::new(store.clone());
        let expired = SetOptions::default().expires_in(Duration::seconds(-1));
        store.set(TOKEN_KEY, "abc", &expired).unwrap();

        holder.refresh_auth();
        assert!(!holder.is_authenticated());
    }

    #[test]
    fn test_bad_expiry_refuses_to_store() {
        for days in [0, -1, 1_000_000_000, i64::MAX] {
            let store = Arc::new(MemoryStore::new());
            let mut holder = TokenHolder::with_expiry_days(store.clone(), days);

            let result = holder.set_access_token(AccessToken::new("abc").unwrap());
            assert!(result.is_err(), "{days} days should be rejected");
            assert!(!holder.is_authenticated());
            assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        }
    }

    #[test]
    fn test_apply_successful_response() {
        let mut holder = TokenHolder::new(MemoryStore::new());
        let response = AuthResponse {
            access_token: Some("abc".to_string()),
            message: Some("Welcome back!".to_string()),
        };

        let token = holder.apply_response(true, &response).unwrap();
        assert_eq!(token.as_str(), "abc");
        assert!(holder.is_authenticated());
    }

    #[test]
    fn test_apply_rejected_response() {
        let mut holder = TokenHolder::new(MemoryStore::new());

        let err = holder
            .apply_response(false, &AuthResponse::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Login failed. Please try again.");

        let response = AuthResponse {
            access_token: None,
            message: Some("Invalid credentials".to_string()),
        };
        let err = holder.apply_response(false, &response).unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!holder.is_authenticated());
    }

    #[test]
    fn test_ok_without_token_is_rejected() {
        let mut holder = TokenHolder::new(MemoryStore::new());
        let err = holder
            .apply_response(true, &AuthResponse::default())
            .unwrap_err();
        assert!(err.is_rejection());
        assert!(!holder.is_authenticated());
    }
}
