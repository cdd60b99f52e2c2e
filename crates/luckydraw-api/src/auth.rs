//! Admin sessions: login, bearer token checks and logout.
//!
//! Only SHA-256 digests of issued tokens are kept. The draw engine never
//! sees a token; handlers reduce it to an `is_admin` flag first.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use chrono::{DateTime, TimeDelta, Utc};
use luckydraw_core::clock::Clock;
use luckydraw_core::error::DrawError;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AdminCredentials;

/// Issued admin tokens and the credentials that mint them.
pub struct AdminSessions {
    username_digest: String,
    password_digest: String,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    tokens: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl std::fmt::Debug for AdminSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSessions")
            .field("ttl", &self.ttl)
            .field("live_tokens", &self.lock().len())
            .finish_non_exhaustive()
    }
}

impl AdminSessions {
    /// Creates a session registry accepting `credentials`, issuing tokens
    /// that expire `ttl` after login.
    #[must_use]
    pub fn new(credentials: &AdminCredentials, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            username_digest: digest(&credentials.username),
            password_digest: digest(&credentials.password),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
            tokens: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues a bearer token for matching credentials.
    ///
    /// # Errors
    ///
    /// Returns `DrawError::Unauthorized` if the username or password is wrong.
    pub fn login(&self, username: &str, password: &str) -> Result<String, DrawError> {
        let username_ok = digest(username) == self.username_digest;
        let password_ok = digest(password) == self.password_digest;
        if !(username_ok && password_ok) {
            warn!("admin login rejected");
            return Err(DrawError::Unauthorized("invalid credentials".to_owned()));
        }

        let token = Uuid::new_v4().simple().to_string();
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.lock().insert(digest(&token), expires_at);
        info!(%expires_at, "admin session opened");
        Ok(token)
    }

    /// Whether `token` is live. An expired token is forgotten on the spot.
    pub fn is_valid(&self, token: &str) -> bool {
        let key = digest(token);
        let mut tokens = self.lock();
        match tokens.get(&key) {
            Some(expires_at) if *expires_at > self.clock.now() => true,
            Some(_) => {
                tokens.remove(&key);
                debug!("expired admin session evicted");
                false
            }
            None => false,
        }
    }

    /// Revokes `token`. Returns whether it was live.
    pub fn logout(&self, token: &str) -> bool {
        let removed = self.lock().remove(&digest(token)).is_some();
        if removed {
            info!("admin session closed");
        }
        removed
    }

    /// Reduces the request's `Authorization` header to the admin capability.
    pub fn is_admin(&self, headers: &HeaderMap) -> bool {
        bearer_token(headers).is_some_and(|token| self.is_valid(token))
    }
}

/// Extracts a non-empty bearer token from the `Authorization` header.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn digest(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
