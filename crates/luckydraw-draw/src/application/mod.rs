//! Application layer: orchestrates domain rules against collaborators.

pub mod command_handlers;
pub mod draw_service;
pub mod query_handlers;
