//! Frame pacing: how long to wait after each frame.
//!
//! Pacing is drift-tolerant. When a frame finishes early the loop sleeps
//! until the frame's scheduled time; when it finishes late the loop moves on
//! immediately and never skips frames to catch up.

use std::thread;
use std::time::{Duration, Instant};

use crate::terminal::InterruptFlag;

/// Rate used when neither the caller nor the stream supplies one.
pub const DEFAULT_FPS: f64 = 30.0;

/// Longest single sleep between interrupt checks.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Pick the session rate: requested, else native, else [`DEFAULT_FPS`].
///
/// Zero, negative and non-finite rates count as absent.
pub fn resolve_target_fps(requested: Option<f64>, native: Option<f64>) -> f64 {
    let usable = |fps: &f64| fps.is_finite() && *fps > 0.0;
    requested
        .filter(usable)
        .or_else(|| native.filter(usable))
        .unwrap_or(DEFAULT_FPS)
}

/// Delay owed after `frames_rendered` frames at `target_fps`, given `elapsed`
/// wall-clock time since the session started.
///
/// `None` when the session is on or behind schedule.
pub fn pacing_delay(frames_rendered: u64, target_fps: f64, elapsed: Duration) -> Option<Duration> {
    let expected = Duration::try_from_secs_f64(frames_rendered as f64 / target_fps).ok()?;
    expected.checked_sub(elapsed).filter(|d| !d.is_zero())
}

/// Sleep until `deadline`, waking every few milliseconds to check `interrupt`.
///
/// Returns `true` if the sleep was cut short by an interrupt.
pub fn sleep_until(deadline: Instant, interrupt: &InterruptFlag) -> bool {
    loop {
        if interrupt.is_set() {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}
