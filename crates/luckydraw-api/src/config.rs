//! Server configuration read from the environment.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use luckydraw_draw::application::draw_service::DrawPolicy;

use crate::error::AppError;

/// Credentials accepted by the admin login endpoint.
#[derive(Clone)]
pub struct AdminCredentials {
    /// Admin login name.
    pub username: String,
    /// Admin password.
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fully parsed server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Admin login credentials.
    pub admin: AdminCredentials,
    /// Lifetime of an admin bearer token.
    pub session_ttl: Duration,
    /// Draw engine tunables.
    pub policy: DrawPolicy,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is malformed or
    /// `ADMIN_PASSWORD` is missing.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, applying defaults for unset
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is malformed or
    /// `ADMIN_PASSWORD` is missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = DrawPolicy::default();

        let password = lookup("ADMIN_PASSWORD")
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                AppError::Config("ADMIN_PASSWORD environment variable must be set".to_owned())
            })?;

        let policy = DrawPolicy {
            max_count: positive(&lookup, "DRAW_MAX_COUNT", defaults.max_count)?,
            frames: positive(&lookup, "DRAW_FRAMES", defaults.frames)?,
            frame_interval: Duration::from_millis(parse_or(
                &lookup,
                "DRAW_FRAME_MS",
                u64::try_from(defaults.frame_interval.as_millis()).unwrap_or(50),
            )?),
            history_capacity: positive(&lookup, "HISTORY_CAPACITY", defaults.history_capacity)?,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_or(&lookup, "PORT", 3000)?,
            admin: AdminCredentials {
                username: lookup("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_owned()),
                password,
            },
            session_ttl: Duration::from_secs(parse_or(&lookup, "ADMIN_SESSION_TTL_SECS", 86_400)?),
            policy,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
    }
}

fn positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr + PartialOrd + From<u8>,
    T::Err: Display,
{
    let value = parse_or(lookup, key, default)?;
    if value < T::from(1) {
        return Err(AppError::Config(format!("{key} must be at least 1")));
    }
    Ok(value)
}
