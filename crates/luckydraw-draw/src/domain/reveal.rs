//! Reveal scheduler: the timed animation that precedes a settled draw.
//!
//! This is a plain state machine. Something outside (a [`Ticker`]) decides
//! when each tick happens; the scheduler decides what each tick means.
//!
//! [`Ticker`]: luckydraw_core::ticker::Ticker

use std::collections::HashMap;

/// Default frames per reveal.
pub const DEFAULT_FRAMES: u32 = 15;

/// Reveal state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// No reveal has started, or the last one was cancelled.
    Idle,
    /// A reveal is running and the next tick shows `frame`.
    Animating {
        /// Index of the frame the next tick lands on.
        frame: u32,
    },
    /// The last reveal reached its final frame.
    Settled,
}

/// What a tick asks the caller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Show a throwaway teaser frame.
    Teaser {
        /// Zero-based teaser index.
        frame: u32,
    },
    /// Produce the real draw.
    Settle,
}

/// Handle identifying one reveal run. A run cancelled or superseded stops
/// receiving steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealRun(u64);

/// Drives `Idle -> Animating(0..frames-1) -> Settled`.
#[derive(Debug)]
pub struct RevealScheduler {
    phase: RevealPhase,
    frames: u32,
    current: u64,
}

impl RevealScheduler {
    /// Creates an idle scheduler. `frames` below one is treated as one, which
    /// settles on the first tick.
    #[must_use]
    pub fn new(frames: u32) -> Self {
        Self {
            phase: RevealPhase::Idle,
            frames: frames.max(1),
            current: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Whether a reveal is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, RevealPhase::Animating { .. })
    }

    /// Starts a reveal. Returns `None` while another reveal is animating.
    pub fn begin(&mut self) -> Option<RevealRun> {
        if self.is_animating() {
            return None;
        }
        self.current = self.current.wrapping_add(1);
        self.phase = RevealPhase::Animating { frame: 0 };
        Some(RevealRun(self.current))
    }

    /// Advances `run` by one tick.
    ///
    /// Every tick before the last yields a teaser; the last tick moves the
    /// scheduler to `Settled`. Returns `None` if `run` is no longer the live
    /// reveal.
    pub fn advance(&mut self, run: RevealRun) -> Option<RevealStep> {
        if run.0 != self.current {
            return None;
        }
        let RevealPhase::Animating { frame } = self.phase else {
            return None;
        };

        if frame + 1 < self.frames {
            self.phase = RevealPhase::Animating { frame: frame + 1 };
            Some(RevealStep::Teaser { frame })
        } else {
            self.phase = RevealPhase::Settled;
            Some(RevealStep::Settle)
        }
    }

    /// Tears down whatever reveal is animating. Returns whether one was.
    pub fn cancel(&mut self) -> bool {
        if self.is_animating() {
            self.phase = RevealPhase::Idle;
            true
        } else {
            false
        }
    }

    /// Tears down `run` if it is still animating; a newer run is untouched.
    pub fn abandon(&mut self, run: RevealRun) -> bool {
        run.0 == self.current && self.cancel()
    }
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMES)
    }
}

/// One reveal scheduler per draw session.
///
/// Sessions animate independently; the re-entrancy guard only applies within
/// a session. A session is forgotten once it has no reveal in flight. Run
/// tokens are unique across the registry so a stale run can never match a
/// scheduler recreated for the same session.
#[derive(Debug)]
pub struct RevealRegistry {
    frames: u32,
    last_run: u64,
    sessions: HashMap<String, RevealScheduler>,
}

impl RevealRegistry {
    /// Creates an empty registry whose schedulers run `frames` ticks.
    #[must_use]
    pub fn new(frames: u32) -> Self {
        Self {
            frames,
            last_run: 0,
            sessions: HashMap::new(),
        }
    }

    /// Phase of `session`'s reveal. Unknown sessions are idle.
    #[must_use]
    pub fn phase(&self, session: &str) -> RevealPhase {
        self.sessions
            .get(session)
            .map_or(RevealPhase::Idle, RevealScheduler::phase)
    }

    /// Number of sessions with a reveal in flight.
    #[must_use]
    pub fn animating(&self) -> usize {
        self.sessions
            .values()
            .filter(|s| s.is_animating())
            .count()
    }

    /// Starts a reveal for `session`. Returns `None` while that session is
    /// already animating.
    pub fn begin(&mut self, session: &str) -> Option<RevealRun> {
        let scheduler = self
            .sessions
            .entry(session.to_owned())
            .or_insert_with(|| RevealScheduler::new(self.frames));
        scheduler.current = scheduler.current.max(self.last_run);
        let run = scheduler.begin()?;
        self.last_run = run.0;
        Some(run)
    }

    /// Advances `run` within `session`.
    pub fn advance(&mut self, session: &str, run: RevealRun) -> Option<RevealStep> {
        self.sessions.get_mut(session)?.advance(run)
    }

    /// Tears down `session`'s animating reveal. Returns whether one was.
    pub fn cancel(&mut self, session: &str) -> bool {
        self.sessions
            .get_mut(session)
            .is_some_and(RevealScheduler::cancel)
    }

    /// Ends `run`: tears it down if it is still animating, then forgets the
    /// session if nothing else is animating there. Returns whether `run` was
    /// torn down.
    pub fn finish(&mut self, session: &str, run: RevealRun) -> bool {
        let Some(scheduler) = self.sessions.get_mut(session) else {
            return false;
        };
        let abandoned = scheduler.abandon(run);
        if !scheduler.is_animating() {
            self.sessions.remove(session);
        }
        abandoned
    }
}

impl Default for RevealRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMES)
    }
}
