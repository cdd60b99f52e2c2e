//! Shared test mocks and utilities for the luckydraw engine.

mod clock;
mod rng;
mod store;
mod ticker;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng, unit_for};
pub use store::{
    FailingHistoryStore, FailingOverrideStore, ReadOnlyHistoryStore, RecordingHistoryStore,
};
pub use ticker::{StallingTicker, YieldTicker};
