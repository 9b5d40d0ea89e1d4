//! Ctrl+C handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "stop requested" flag.
///
/// Set from the Ctrl+C handler, polled by the playback loop between frames.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check if a stop has been requested.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag before a new session.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Set up the Ctrl+C handler.
///
/// This should be called once at program startup; later Ctrl+C presses set `flag`.
pub fn install_ctrlc_handler(flag: &InterruptFlag) -> Result<(), ctrlc::Error> {
    let flag = flag.clone();
    ctrlc::set_handler(move || {
        flag.trigger();
        log::debug!("Received Ctrl+C");
    })
}
