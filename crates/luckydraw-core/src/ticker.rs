//! Tick source abstraction for the reveal animation.
//!
//! The reveal advances one frame per tick. Production code waits on a
//! `tokio` interval; tests inject tickers that resolve immediately.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// A source of discrete animation ticks.
#[async_trait]
pub trait Ticker: Send {
    /// Waits until the next tick is due.
    async fn tick(&mut self);
}

/// Ticker that fires once per fixed period using `tokio::time`.
///
/// A zero period yields to the runtime instead of sleeping.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Option<Interval>,
}

impl IntervalTicker {
    /// Creates a ticker whose first tick is one `period` from now.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        if period.is_zero() {
            return Self { interval: None };
        }
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval: Some(interval),
        }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => tokio::task::yield_now().await,
        }
    }
}
