//! Error types shared by the decoder, renderer, sink and scheduler.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Everything that can stop a playback session.
///
/// Interruption is deliberately absent: a Ctrl+C is a normal way for a
/// session to end and is reported through
/// [`PlaybackOutcome::Interrupted`](crate::player::PlaybackOutcome::Interrupted).
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// The video path does not exist
    #[error("Video file '{}' not found", path.display())]
    SourceNotFound { path: PathBuf },

    /// The path exists but no video stream could be opened from it
    #[error("Could not open video file '{}': {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    /// Render dimensions with zero area
    #[error("Invalid render geometry: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    /// A glyph ramp with fewer than 2 or more than 256 characters
    #[error("Glyph ramp must contain between 2 and 256 characters, got {len}")]
    InvalidRamp { len: usize },

    /// The decoder failed mid-stream
    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    /// The terminal stream is closed or broken
    #[error("Failed to write to terminal: {0}")]
    OutputWriteFailure(#[source] std::io::Error),

    /// A width, fps or other setting outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read or parsed
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PlayerError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PlayerError::SourceUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
