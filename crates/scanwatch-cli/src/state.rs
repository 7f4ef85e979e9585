/// Watch state management.
///
/// Centralises the mutable state the terminal front end reads. The watch
/// thread communicates via a channel; state updates happen in
/// `process_events()`, which runs once per render tick.
///
/// The animator is fed from derived progress but never read back into
/// derivation: `progress` always reflects the latest snapshot verbatim.
use scanwatch_core::model::{ScanDetails, ScanStatus};
use scanwatch_core::progress::{ProgressAnimator, ProgressResult};
use scanwatch_core::watcher::{WatchEvent, WatchHandle};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Where the watch currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchPhase {
    /// No watch started.
    Idle,
    /// Polling; updates may arrive.
    Watching,
    /// The scan reached a terminal status.
    Finished(ScanStatus),
    /// The watcher gave up.
    Failed(String),
    /// Watching was cancelled locally.
    Cancelled,
}

/// Maximum events drained from the channel per tick.
///
/// Prevents a backlog (e.g. after the terminal was suspended) from stalling
/// a single render tick.
pub const MAX_EVENTS_PER_TICK: usize = 64;

/// Maximum poll errors retained for display.
pub const MAX_POLL_ERRORS: usize = 20;

/// All watch state.
pub struct WatchState {
    pub phase: WatchPhase,
    pub handle: Option<WatchHandle>,
    /// Latest record received from the backend.
    pub details: Option<ScanDetails>,
    /// Progress derived from `details`.
    pub progress: Option<ProgressResult>,
    pub animator: ProgressAnimator,
    /// Recent poll failures, oldest first (capped at [`MAX_POLL_ERRORS`]).
    pub poll_errors: VecDeque<String>,
    pub elapsed: Option<Duration>,
}

impl Default for WatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchState {
    pub fn new() -> Self {
        Self::with_animator(ProgressAnimator::new())
    }

    pub fn with_animator(animator: ProgressAnimator) -> Self {
        Self {
            phase: WatchPhase::Idle,
            handle: None,
            details: None,
            progress: None,
            animator,
            poll_errors: VecDeque::new(),
            elapsed: None,
        }
    }

    /// Take ownership of a running watch and reset per-watch state.
    pub fn attach(&mut self, handle: WatchHandle) {
        self.phase = WatchPhase::Watching;
        self.details = None;
        self.progress = None;
        self.poll_errors.clear();
        self.elapsed = None;
        self.handle = Some(handle);
    }

    /// Cancel the running watch, if any.
    pub fn cancel(&mut self) {
        if let Some(ref handle) = self.handle {
            handle.cancel();
        }
    }

    pub fn is_done(&self) -> bool {
        !matches!(self.phase, WatchPhase::Idle | WatchPhase::Watching)
    }

    /// Drain pending watch events. Returns `true` if anything changed.
    pub fn process_events(&mut self, now: Instant) -> bool {
        let Some(handle) = &self.handle else {
            return false;
        };

        let mut changed = false;
        let mut drained = 0usize;
        let mut events = Vec::new();
        while drained < MAX_EVENTS_PER_TICK {
            match handle.events_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(_) => break,
            }
            drained += 1;
        }

        for event in events {
            changed = true;
            match event {
                WatchEvent::Update { details, progress } => {
                    self.animator.set_target(progress.percentage, now);
                    self.details = Some(details);
                    self.progress = Some(progress);
                }
                WatchEvent::Error { message, .. } => self.push_error(message),
                WatchEvent::Finished { status, elapsed } => {
                    self.phase = WatchPhase::Finished(status);
                    self.elapsed = Some(elapsed);
                }
                WatchEvent::Failed { message } => {
                    self.push_error(message.clone());
                    self.phase = WatchPhase::Failed(message);
                }
                WatchEvent::Cancelled => self.phase = WatchPhase::Cancelled,
            }
        }

        if self.is_done() {
            self.handle = None;
        }
        changed
    }

    fn push_error(&mut self, message: String) {
        if self.poll_errors.len() >= MAX_POLL_ERRORS {
            self.poll_errors.pop_front();
        }
        self.poll_errors.push_back(message);
    }

    /// Percentage to show at `now`, after animation.
    pub fn displayed_percent(&self, now: Instant) -> u8 {
        self.animator.sample_rounded(now)
    }
}
