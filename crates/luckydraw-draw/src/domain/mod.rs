//! Domain layer: pure draw rules with no I/O.

pub mod commands;
pub mod generator;
pub mod ledger;
pub mod range_spec;
pub mod resolver;
pub mod reveal;
