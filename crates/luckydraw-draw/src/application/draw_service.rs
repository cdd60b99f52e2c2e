//! The draw engine: validation, reveal, override resolution, recording.
//!
//! A draw validates its range, runs the reveal animation one tick at a time,
//! and on the final tick resolves the real sequence against the pending
//! override queue before recording it. Reveals are tracked per draw session.
//! Collaborator failures degrade to local behavior and are only logged.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use luckydraw_core::clock::Clock;
use luckydraw_core::command::Command;
use luckydraw_core::entry::HistoryEntry;
use luckydraw_core::error::DrawError;
use luckydraw_core::rng::DeterministicRng;
use luckydraw_core::store::{HistoryStore, OverrideStore};
use luckydraw_core::ticker::Ticker;
use tracing::{debug, info, instrument, warn};

use crate::domain::commands::RequestDraw;
use crate::domain::generator::{generate_for, teaser_for};
use crate::domain::ledger::{DEFAULT_CAPACITY, HistoryLedger};
use crate::domain::range_spec::{DEFAULT_MAX_COUNT, RangeSpec};
use crate::domain::resolver::{DrawResult, resolve};
use crate::domain::reveal::{DEFAULT_FRAMES, RevealPhase, RevealRegistry, RevealRun, RevealStep};

/// Tunables for draws. `Default` holds the stock settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPolicy {
    /// Ceiling that requested counts are clamped to.
    pub max_count: u32,
    /// Ticks per reveal, including the settling tick.
    pub frames: u32,
    /// Wall-clock time between reveal ticks.
    pub frame_interval: Duration,
    /// Entries kept in the history ledger.
    pub history_capacity: usize,
}

impl Default for DrawPolicy {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            frames: DEFAULT_FRAMES,
            frame_interval: Duration::from_millis(50),
            history_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// How a draw request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The reveal finished and the result was recorded.
    Settled(DrawResult),
    /// Another reveal was animating; nothing happened.
    Busy,
    /// The reveal was torn down before settling; nothing was recorded.
    Cancelled,
}

/// Ends the owning draw's reveal when the draw stops, including when its
/// future is dropped mid-animation. An unsettled reveal returns to `Idle`.
struct RevealGuard<'a> {
    reveals: &'a Mutex<RevealRegistry>,
    session: &'a str,
    run: RevealRun,
}

impl Drop for RevealGuard<'_> {
    fn drop(&mut self) {
        let abandoned = self
            .reveals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .finish(self.session, self.run);
        if abandoned {
            debug!(session = self.session, "reveal torn down before settling");
        }
    }
}

/// Owns the shared draw state: RNG, pending override source and history,
/// plus one reveal scheduler per draw session.
pub struct DrawEngine {
    policy: DrawPolicy,
    clock: Arc<dyn Clock>,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    overrides: Arc<dyn OverrideStore>,
    ledger: HistoryLedger,
    remote_history: Option<Arc<dyn HistoryStore>>,
    history_diverged: AtomicBool,
    reveals: Mutex<RevealRegistry>,
}

impl std::fmt::Debug for DrawEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawEngine")
            .field("policy", &self.policy)
            .field("ledger", &self.ledger)
            .field("remote_history", &self.remote_history.is_some())
            .field("history_diverged", &self.history_diverged())
            .field("animating_sessions", &self.animating_sessions())
            .finish_non_exhaustive()
    }
}

impl DrawEngine {
    /// Creates an engine with an empty local ledger and no history
    /// collaborator.
    #[must_use]
    pub fn new(
        policy: DrawPolicy,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        overrides: Arc<dyn OverrideStore>,
    ) -> Self {
        Self {
            ledger: HistoryLedger::new(policy.history_capacity),
            reveals: Mutex::new(RevealRegistry::new(policy.frames)),
            policy,
            clock,
            rng,
            overrides,
            remote_history: None,
            history_diverged: AtomicBool::new(false),
        }
    }

    /// Mirrors every recorded draw to `store` and serves history from it.
    #[must_use]
    pub fn with_history_store(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.remote_history = Some(store);
        self
    }

    /// The policy this engine runs with.
    #[must_use]
    pub fn policy(&self) -> &DrawPolicy {
        &self.policy
    }

    /// The pending override source.
    #[must_use]
    pub fn override_store(&self) -> &dyn OverrideStore {
        self.overrides.as_ref()
    }

    /// The local history ledger.
    #[must_use]
    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    fn remote_history(&self) -> Option<&dyn HistoryStore> {
        self.remote_history.as_deref()
    }

    /// The history collaborator, as long as it holds every recorded draw.
    /// After a failed write the local ledger is the only complete log.
    pub(crate) fn authoritative_history(&self) -> Option<&dyn HistoryStore> {
        if self.history_diverged() {
            return None;
        }
        self.remote_history()
    }

    /// Whether a history write has failed since startup.
    #[must_use]
    pub fn history_diverged(&self) -> bool {
        self.history_diverged.load(Ordering::Acquire)
    }

    /// Current reveal phase of `session`.
    #[must_use]
    pub fn reveal_phase(&self, session: &str) -> RevealPhase {
        self.reveals().phase(session)
    }

    /// Number of sessions with a reveal in flight.
    #[must_use]
    pub fn animating_sessions(&self) -> usize {
        self.reveals().animating()
    }

    fn reveals(&self) -> MutexGuard<'_, RevealRegistry> {
        self.reveals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn rng(&self) -> MutexGuard<'_, dyn DeterministicRng + Send + 'static> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds the local ledger from the history collaborator, if any. On
    /// failure the ledger is left as it was.
    pub async fn hydrate(&self) {
        let Some(store) = self.remote_history() else {
            return;
        };
        match store.load().await {
            Ok(entries) => {
                debug!(entries = entries.len(), "hydrating history ledger");
                self.ledger.hydrate(entries);
            }
            Err(err) => warn!(error = %err, "history unavailable; starting with local ledger"),
        }
    }

    /// Tears down `session`'s animating reveal, if any. The interrupted draw
    /// ends as [`DrawOutcome::Cancelled`] on its next tick without recording.
    pub fn cancel_reveal(&self, session: &str) -> bool {
        let cancelled = self.reveals().cancel(session);
        if cancelled {
            info!(session, "reveal cancelled");
        }
        cancelled
    }

    /// Runs one draw.
    ///
    /// Each tick of `ticker` advances the reveal of the command's session;
    /// teaser frames are passed to `on_frame` and never recorded. The final
    /// tick pops a pending override or, if none is queued, generates the real
    /// sequence, then records the result. Draws in other sessions run
    /// alongside; a second draw in the same session while one animates is
    /// [`DrawOutcome::Busy`].
    ///
    /// # Errors
    ///
    /// Returns `DrawError::Validation` or `DrawError::RangeExhausted` if the
    /// requested range is invalid. No animation starts in that case.
    #[instrument(skip_all, fields(correlation_id = %command.correlation_id(), session = %command.session, actor = %command.actor))]
    pub async fn draw(
        &self,
        command: &RequestDraw,
        ticker: &mut dyn Ticker,
        on_frame: &mut (dyn FnMut(u32, &[i64]) + Send),
    ) -> Result<DrawOutcome, DrawError> {
        let spec = RangeSpec::validate(
            command.min,
            command.max,
            command.count,
            command.unique,
            self.policy.max_count,
        )?;

        let session = command.session.as_str();
        let Some(run) = self.reveals().begin(session) else {
            info!("draw ignored: this session is already animating a reveal");
            return Ok(DrawOutcome::Busy);
        };
        let _guard = RevealGuard {
            reveals: &self.reveals,
            session,
            run,
        };

        loop {
            ticker.tick().await;
            let step = self.reveals().advance(session, run);
            match step {
                Some(RevealStep::Teaser { frame }) => {
                    let teaser = teaser_for(&spec, &mut *self.rng());
                    on_frame(frame, &teaser);
                }
                Some(RevealStep::Settle) => break,
                None => return Ok(DrawOutcome::Cancelled),
            }
        }

        let pending = match self.overrides.take_next().await {
            Ok(pending) => pending,
            Err(err) => {
                warn!(error = %err, "override source unavailable; using generated values");
                None
            }
        };
        let fresh = if pending.is_some() {
            Vec::new()
        } else {
            generate_for(&spec, &mut *self.rng())
        };
        let (values, source) = resolve(pending, fresh);
        let result = DrawResult {
            values,
            source,
            timestamp: self.clock.now(),
        };

        let entry = HistoryEntry::new(&result.values, command.actor, result.timestamp);
        self.ledger.record(entry.clone());
        if let Some(store) = self.remote_history() {
            if let Err(err) = store.append(entry).await {
                self.history_diverged.store(true, Ordering::Release);
                warn!(error = %err, "history write skipped; serving local ledger from now on");
            }
        }

        info!(source = %result.source, count = result.values.len(), "draw settled");
        Ok(DrawOutcome::Settled(result))
    }
}
