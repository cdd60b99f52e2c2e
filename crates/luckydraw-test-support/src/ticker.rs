//! Test tickers — `Ticker` implementations that never touch the wall clock.

use async_trait::async_trait;
use luckydraw_core::ticker::Ticker;

/// A ticker that yields to the runtime once per tick and counts ticks.
#[derive(Debug, Default)]
pub struct YieldTicker {
    /// Number of ticks delivered so far.
    pub ticks: usize,
}

#[async_trait]
impl Ticker for YieldTicker {
    async fn tick(&mut self) {
        self.ticks += 1;
        tokio::task::yield_now().await;
    }
}

/// A ticker that delivers `remaining` ticks and then never ticks again.
/// Used to hold a reveal mid-animation.
#[derive(Debug)]
pub struct StallingTicker {
    remaining: usize,
}

impl StallingTicker {
    /// Create a ticker that stalls after `ticks` ticks.
    #[must_use]
    pub fn after(ticks: usize) -> Self {
        Self { remaining: ticks }
    }
}

#[async_trait]
impl Ticker for StallingTicker {
    async fn tick(&mut self) {
        if self.remaining == 0 {
            std::future::pending::<()>().await;
        }
        self.remaining -= 1;
        tokio::task::yield_now().await;
    }
}
