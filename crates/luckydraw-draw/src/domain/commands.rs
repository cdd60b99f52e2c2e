//! Commands for the draw context.

use luckydraw_core::command::Command;
use luckydraw_core::entry::Actor;
use uuid::Uuid;

/// Command to perform one draw.
///
/// Bounds and count are raw caller input; the engine validates them.
#[derive(Debug, Clone)]
pub struct RequestDraw {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// One end of the inclusive range.
    pub min: i64,
    /// The other end of the inclusive range.
    pub max: i64,
    /// Requested sequence length.
    pub count: i64,
    /// Whether values must be distinct.
    pub unique: bool,
    /// Who is drawing.
    pub actor: Actor,
    /// Draw session the reveal belongs to. Only one reveal animates per
    /// session at a time.
    pub session: String,
}

impl Command for RequestDraw {
    fn command_type(&self) -> &'static str {
        "draw.request_draw"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace the pending override queue.
#[derive(Debug, Clone)]
pub struct StageOverride {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Values to queue, consumed one per draw in order.
    pub values: Vec<i64>,
    /// Whether the caller passed the admin capability check.
    pub is_admin: bool,
}

impl Command for StageOverride {
    fn command_type(&self) -> &'static str {
        "draw.stage_override"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
