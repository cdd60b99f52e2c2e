//! Recorded draw outcomes.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Who triggered a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    /// An ordinary end user.
    User,
    /// A caller holding a valid admin credential.
    Admin,
}

impl Actor {
    /// Maps the admin capability fact onto an actor tag.
    #[must_use]
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::User }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// One line of the draw history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The drawn sequence, rendered for display.
    pub value: String,
    /// Who triggered the draw.
    pub actor: Actor,
    /// ISO-8601 timestamp of the draw.
    pub timestamp: String,
}

impl HistoryEntry {
    /// Builds an entry from drawn values.
    #[must_use]
    pub fn new(values: &[i64], actor: Actor, at: DateTime<Utc>) -> Self {
        Self {
            value: render_values(values),
            actor,
            timestamp: format_timestamp(at),
        }
    }
}

/// Formats `at` as ISO-8601 with millisecond precision, e.g.
/// `"2026-01-15T10:00:00.000Z"`.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders a sequence as a comma-separated list, e.g. `"3, 7, 9"`.
#[must_use]
pub fn render_values(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
