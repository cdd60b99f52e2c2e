//! Luckydraw Core — shared abstractions.
//!
//! This crate defines the traits and types the draw engine and its
//! collaborators agree on: time, randomness, reveal cadence, errors,
//! history entries and the external store ports. It contains no HTTP code.

pub mod clock;
pub mod command;
pub mod entry;
pub mod error;
pub mod rng;
pub mod store;
pub mod ticker;
