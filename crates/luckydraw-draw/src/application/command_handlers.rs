//! Command handlers for the draw context.
//!
//! Draws themselves run through [`DrawEngine::draw`]; this module handles the
//! administrative side that stages override values.
//!
//! [`DrawEngine::draw`]: crate::application::draw_service::DrawEngine::draw

use luckydraw_core::command::Command;
use luckydraw_core::error::DrawError;
use luckydraw_core::store::OverrideStore;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::commands::StageOverride;

/// State of the override queue after staging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedOverride {
    /// The value the next draw will return.
    pub value: Option<i64>,
    /// Number of values queued.
    pub queued: usize,
}

/// Handles the `StageOverride` command: checks the admin capability and
/// replaces the pending queue.
///
/// # Errors
///
/// Returns `DrawError::Unauthorized` without touching the queue if the caller
/// is not an admin, `DrawError::Validation` if no values were given, and
/// propagates `DrawError::OverrideUnavailable` from the store.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id(), values = command.values.len()))]
pub async fn handle_stage_override(
    command: &StageOverride,
    store: &dyn OverrideStore,
) -> Result<StagedOverride, DrawError> {
    if !command.is_admin {
        warn!("override rejected: caller is not an admin");
        return Err(DrawError::Unauthorized(
            "admin credential required".to_owned(),
        ));
    }
    if command.values.is_empty() {
        return Err(DrawError::Validation(
            "at least one override value is required".to_owned(),
        ));
    }

    store.replace(command.values.clone()).await?;
    info!(command_type = command.command_type(), "override staged");

    Ok(StagedOverride {
        value: command.values.first().copied(),
        queued: command.values.len(),
    })
}
