//! Per-session playback state and the report produced when it ends.

use std::fmt;
use std::time::{Duration, Instant};

use crate::error::PlayerError;

/// Lifecycle of one playback call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Opening,
    Playing,
    Completed,
    Interrupted,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Interrupted | Phase::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Opening => "opening",
            Phase::Playing => "playing",
            Phase::Completed => "completed",
            Phase::Interrupted => "interrupted",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum PlaybackOutcome {
    /// The stream ran out of frames
    Completed,
    /// Ctrl+C (or another stop request) arrived between frames
    Interrupted,
    /// Decoding, rendering or output failed
    Failed(PlayerError),
}

impl PlaybackOutcome {
    pub fn phase(&self) -> Phase {
        match self {
            PlaybackOutcome::Completed => Phase::Completed,
            PlaybackOutcome::Interrupted => Phase::Interrupted,
            PlaybackOutcome::Failed(_) => Phase::Failed,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PlaybackOutcome::Failed(_))
    }
}

/// Summary of a finished session.
#[derive(Debug)]
pub struct PlaybackReport {
    pub outcome: PlaybackOutcome,
    /// Frames drawn to the terminal
    pub frames_rendered: u64,
    /// Wall-clock time from the first frame request to finalization
    pub elapsed: Duration,
    /// Rate the session was paced to
    pub target_fps: f64,
}

impl PlaybackReport {
    /// Observed frame rate: frames / elapsed seconds, 0 if no time passed.
    pub fn average_fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames_rendered as f64 / secs
        } else {
            0.0
        }
    }
}

/// Mutable counters owned by the scheduler for one call.
#[derive(Debug)]
pub struct SessionState {
    phase: Phase,
    frames_rendered: u64,
    started: Option<Instant>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            frames_rendered: 0,
            started: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transition(&mut self, next: Phase) {
        log::debug!("Playback {} -> {}", self.phase, next);
        self.phase = next;
    }

    /// Enter `Playing` and start the session clock.
    pub fn start(&mut self, now: Instant) {
        self.transition(Phase::Playing);
        self.started = Some(now);
        self.frames_rendered = 0;
    }

    pub fn record_frame(&mut self) -> u64 {
        self.frames_rendered += 1;
        self.frames_rendered
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Time since [`start`](Self::start), zero if never started.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.started
            .map(|s| now.saturating_duration_since(s))
            .unwrap_or(Duration::ZERO)
    }
}
