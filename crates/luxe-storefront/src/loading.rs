//! The splash-screen loading sequence.
//!
//! A fixed script of progress steps played once per session:
//!
//! ```text
//! Idle --start--> Stepping(0) --interval--> Stepping(1) ... Stepping(5)
//!      --interval--> Finishing --completion delay--> Completed
//! ```
//!
//! The sequencer holds no thread or task. Hosts call [`LoadingSequencer::poll`]
//! whenever they like (typically at [`LoadingSequencer::next_deadline`]) and
//! every transition that has come due is applied in order.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock, TimerHandle};

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingStep {
    pub progress: u8,
    pub message: &'static str,
}

/// Message shown before the first step lands.
pub const INITIAL_MESSAGE: &str = "Initializing LUXE Collection...";

/// The script, in order.
pub const LOADING_STEPS: [LoadingStep; 5] = [
    LoadingStep {
        progress: 20,
        message: "Initializing LUXE Collection...",
    },
    LoadingStep {
        progress: 40,
        message: "Loading luxury fragrances...",
    },
    LoadingStep {
        progress: 60,
        message: "Preparing your experience...",
    },
    LoadingStep {
        progress: 80,
        message: "Crafting perfection...",
    },
    LoadingStep {
        progress: 100,
        message: "Welcome to LUXE...",
    },
];

/// Timing of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingSchedule {
    step_interval: Duration,
    completion_delay: Duration,
}

impl LoadingSchedule {
    pub fn new(step_interval: Duration, completion_delay: Duration) -> Self {
        Self {
            step_interval,
            completion_delay,
        }
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn completion_delay(&self) -> Duration {
        self.completion_delay
    }

    /// Time from `start` until the sequence completes.
    pub fn total(&self) -> Duration {
        self.step_interval * (LOADING_STEPS.len() as u32 + 1) + self.completion_delay
    }
}

impl Default for LoadingSchedule {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(1))
    }
}

/// What a splash screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingState {
    pub is_loading: bool,
    pub progress: u8,
    pub message: String,
    /// Once set, later starts skip the sequence.
    pub has_initially_loaded: bool,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            is_loading: true,
            progress: 0,
            message: INITIAL_MESSAGE.to_string(),
            has_initially_loaded: false,
        }
    }
}

/// Where the sequencer is in its script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Idle,
    /// The number of steps already applied.
    Stepping(usize),
    Finishing,
    Completed,
}

/// Drives [`LoadingState`] through the scripted steps.
#[derive(Debug)]
pub struct LoadingSequencer<C = SystemClock> {
    clock: C,
    schedule: LoadingSchedule,
    state: LoadingState,
    phase: LoadingPhase,
    started_at: Option<Instant>,
    timer: Option<TimerHandle>,
}

impl LoadingSequencer<SystemClock> {
    pub fn new(schedule: LoadingSchedule) -> Self {
        Self::with_clock(SystemClock, schedule)
    }
}

impl<C: Clock> LoadingSequencer<C> {
    pub fn with_clock(clock: C, schedule: LoadingSchedule) -> Self {
        Self {
            clock,
            schedule,
            state: LoadingState::default(),
            phase: LoadingPhase::Idle,
            started_at: None,
            timer: None,
        }
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn schedule(&self) -> LoadingSchedule {
        self.schedule
    }

    /// Begin the sequence.
    ///
    /// After a completed first load this only clears `is_loading` and returns
    /// `None`. Otherwise the state resets to 0% and the returned handle can
    /// cancel the run. Starting while a run is active replaces it.
    pub fn start(&mut self) -> Option<TimerHandle> {
        if self.state.has_initially_loaded {
            self.state.is_loading = false;
            return None;
        }

        self.stop_timer();
        self.state.is_loading = true;
        self.state.progress = 0;
        self.state.message = INITIAL_MESSAGE.to_string();

        let handle = TimerHandle::new();
        self.started_at = Some(self.clock.now());
        self.timer = Some(handle.clone());
        self.phase = LoadingPhase::Stepping(0);
        tracing::debug!("loading sequence started");
        Some(handle)
    }

    /// When the next transition is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        let started = self.started_at?;
        if self.is_cancelled() {
            return None;
        }

        let interval = self.schedule.step_interval;
        match self.phase {
            LoadingPhase::Idle | LoadingPhase::Completed => None,
            LoadingPhase::Stepping(applied) => Some(started + interval * (applied as u32 + 1)),
            LoadingPhase::Finishing => Some(
                started
                    + interval * (LOADING_STEPS.len() as u32 + 1)
                    + self.schedule.completion_delay,
            ),
        }
    }

    /// Apply every transition due at the clock's current time.
    ///
    /// Returns `true` if the state changed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let mut changed = false;
        while let Some(due) = self.next_deadline() {
            if due > now {
                break;
            }
            self.advance();
            changed = true;
        }
        changed
    }

    fn advance(&mut self) {
        match self.phase {
            LoadingPhase::Stepping(applied) if applied < LOADING_STEPS.len() => {
                let step = LOADING_STEPS[applied];
                self.state.progress = step.progress;
                self.state.message = step.message.to_string();
                self.phase = LoadingPhase::Stepping(applied + 1);
                tracing::debug!(progress = step.progress, "loading step");
            }
            LoadingPhase::Stepping(_) => {
                self.phase = LoadingPhase::Finishing;
            }
            LoadingPhase::Finishing => {
                self.state.is_loading = false;
                self.state.has_initially_loaded = true;
                self.phase = LoadingPhase::Completed;
                self.timer = None;
                tracing::debug!("loading sequence completed");
            }
            LoadingPhase::Idle | LoadingPhase::Completed => {}
        }
    }

    /// Stop the running sequence where it is.
    pub fn cancel(&mut self) {
        if let Some(timer) = &self.timer {
            timer.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.timer.as_ref().is_some_and(TimerHandle::is_cancelled)
    }

    /// Jump straight to the loaded state.
    pub fn complete_loading(&mut self) {
        self.stop_timer();
        self.state.is_loading = false;
        self.state.progress = 100;
        self.state.has_initially_loaded = true;
        self.phase = LoadingPhase::Completed;
    }

    /// Forget the first load so the next `start` plays the full sequence.
    pub fn reset_loading(&mut self) {
        self.stop_timer();
        self.state = LoadingState::default();
        self.phase = LoadingPhase::Idle;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
    }

    /// Set progress, capped at 100.
    pub fn set_progress(&mut self, progress: u8) {
        self.state.progress = progress.min(100);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.state.message = message.into();
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.started_at = None;
    }
}
