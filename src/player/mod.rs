//! Playback scheduling.
//!
//! A session moves through [`Phase`]s:
//!
//! ```text
//! Idle -> Opening -> Playing -> Completed | Interrupted | Failed
//! ```
//!
//! [`Player`] pulls frames from a [`FrameSource`](crate::video::FrameSource),
//! renders them, draws them through a [`TerminalSink`](crate::terminal::TerminalSink)
//! and sleeps between frames so output tracks the target rate. Every exit
//! path releases the source and yields a [`PlaybackReport`].

mod pacing;
mod scheduler;
mod session;

pub use pacing::{pacing_delay, resolve_target_fps, sleep_until, DEFAULT_FPS};
pub use scheduler::{PlaybackSettings, Player};
pub use session::{Phase, PlaybackOutcome, PlaybackReport, SessionState};
