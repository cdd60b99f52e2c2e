//! Luckydraw — override-aware draw engine.
//!
//! Responsible for validating draw ranges, generating integer sequences,
//! reconciling them with administratively pinned values, pacing the reveal
//! animation and keeping the bounded draw history.

pub mod application;
pub mod domain;
