//! The decoder seam used by the playback scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::types::{Frame, VideoInfo};
use crate::error::PlayerError;

/// A sequential supplier of decoded frames.
///
/// Dropping the source releases whatever it holds (child process, file
/// handle). The scheduler relies on that for cleanup.
pub trait FrameSource {
    /// Decode the next frame. `Ok(None)` means end of stream.
    fn next_frame(&mut self) -> Result<Option<Frame>, PlayerError>;

    /// Stream properties as known when the source was opened.
    fn info(&self) -> VideoInfo;

    /// Native frame rate of the stream, if known.
    fn native_fps(&self) -> Option<f64> {
        self.info().fps
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<Frame>, PlayerError> {
        (**self).next_frame()
    }

    fn info(&self) -> VideoInfo {
        (**self).info()
    }
}

/// Generated frames for demos and tests.
///
/// Produces `frame_count` horizontal gradients that shift one step per frame.
/// A clone of [`released`](Self::released_flag) flips to `true` on drop.
#[derive(Debug)]
pub struct SyntheticSource {
    info: VideoInfo,
    frame_count: u64,
    produced: u64,
    decode_delay: Duration,
    fail_at: Option<u64>,
    released: Arc<AtomicBool>,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32, frame_count: u64) -> Self {
        Self {
            info: VideoInfo {
                width,
                height,
                fps: None,
            },
            frame_count,
            produced: 0,
            decode_delay: Duration::ZERO,
            fail_at: None,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Report `fps` as the stream's native rate.
    pub fn with_native_fps(mut self, fps: f64) -> Self {
        self.info.fps = Some(fps);
        self
    }

    /// Block for `delay` inside every `next_frame` call.
    pub fn with_decode_delay(mut self, delay: Duration) -> Self {
        self.decode_delay = delay;
        self
    }

    /// Return a decode failure when frame number `index` (0-based) is requested.
    pub fn failing_at(mut self, index: u64) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Flag set once the source has been dropped.
    pub fn released_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.released)
    }

    fn gradient(&self, shift: u64) -> Frame {
        let width = self.info.width;
        let height = self.info.height;
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);
        for _y in 0..height {
            for x in 0..width {
                let v = ((x as u64 + shift) * 255 / width.max(1) as u64 % 256) as u8;
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::rgb(data, width, height)
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, PlayerError> {
        if self.fail_at == Some(self.produced) {
            return Err(PlayerError::DecodeFailure(format!(
                "synthetic failure at frame {}",
                self.produced
            )));
        }
        if self.produced >= self.frame_count {
            return Ok(None);
        }
        if !self.decode_delay.is_zero() {
            std::thread::sleep(self.decode_delay);
        }
        let frame = self.gradient(self.produced);
        self.produced += 1;
        Ok(Some(frame))
    }

    fn info(&self) -> VideoInfo {
        self.info
    }
}

impl Drop for SyntheticSource {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_source_yields_exact_count() {
        let mut source = SyntheticSource::new(8, 4, 3);
        let mut seen = 0;
        while let Some(frame) = source.next_frame().unwrap() {
            assert_eq!(frame.width, 8);
            assert_eq!(frame.height, 4);
            assert_eq!(frame.data.len(), frame.expected_len());
            seen += 1;
        }
        assert_eq!(seen, 3);
        // End of stream is sticky
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_synthetic_source_release_flag() {
        let source = SyntheticSource::new(2, 2, 1);
        let released = source.released_flag();
        assert!(!released.load(Ordering::SeqCst));
        drop(source);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_synthetic_source_failure() {
        let mut source = SyntheticSource::new(2, 2, 5).failing_at(1);
        assert!(source.next_frame().unwrap().is_some());
        let err = source.next_frame().unwrap_err();
        assert!(matches!(err, PlayerError::DecodeFailure(_)));
    }

    #[test]
    fn test_native_fps_from_info() {
        let source = SyntheticSource::new(2, 2, 1);
        assert_eq!(source.native_fps(), None);
        let source = source.with_native_fps(25.0);
        assert_eq!(source.native_fps(), Some(25.0));
    }
}
