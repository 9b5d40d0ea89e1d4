//! Video decoding: frame types, the [`FrameSource`] seam, and the ffmpeg adapter.
//!
//! - Frame and stream types via [`Frame`] and [`VideoInfo`]
//! - Stream probing via [`probe_video`]
//! - Decoding via [`FfmpegDecoder`]
//! - Generated frames via [`SyntheticSource`]

mod ffmpeg;
mod probe;
mod source;
mod types;

pub use ffmpeg::FfmpegDecoder;
pub use probe::{parse_frame_rate, probe_video};
pub use source::{FrameSource, SyntheticSource};
pub use types::{Frame, PixelFormat, VideoInfo};
