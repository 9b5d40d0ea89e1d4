//! The playback loop: decode, render, draw, pace.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use super::pacing::{pacing_delay, resolve_target_fps, sleep_until};
use super::session::{Phase, PlaybackOutcome, PlaybackReport, SessionState};
use crate::ascii::{AsciiRenderer, CharSet};
use crate::config::DecoderConfig;
use crate::error::PlayerError;
use crate::terminal::{InterruptFlag, TerminalSink};
use crate::video::{FfmpegDecoder, FrameSource};

/// What the CLI hands the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    /// Render width in characters
    pub width: u32,
    /// Requested frame rate; `None` uses the stream's own
    pub fps: Option<f64>,
    pub charset: CharSet,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            width: 80,
            fps: None,
            charset: CharSet::default(),
        }
    }
}

/// Result of one loop iteration that did not fail.
enum Step {
    Drawn,
    EndOfStream,
    Interrupted,
}

/// Plays frame sources to a terminal sink at a steady rate.
///
/// A `Player` can run several sessions; each call to [`play`](Self::play)
/// starts from fresh counters. An interrupt is consumed by the session that
/// ends on it, so the next session starts clear.
#[derive(Debug)]
pub struct Player {
    settings: PlaybackSettings,
    renderer: AsciiRenderer,
    interrupt: InterruptFlag,
    text: String,
}

impl Player {
    /// # Errors
    /// * `PlayerError::InvalidGeometry` - `settings.width` is 0
    pub fn new(settings: PlaybackSettings, interrupt: InterruptFlag) -> Result<Self, PlayerError> {
        if settings.width == 0 {
            return Err(PlayerError::InvalidGeometry {
                width: 0,
                height: 0,
            });
        }
        Ok(Self {
            renderer: AsciiRenderer::new(settings.charset),
            settings,
            interrupt,
            text: String::new(),
        })
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    /// Open `path` with ffmpeg, ready for [`play`](Self::play).
    ///
    /// Nothing is drawn when this fails.
    ///
    /// # Errors
    /// * `PlayerError::SourceNotFound` - the path does not exist
    /// * `PlayerError::SourceUnreadable` - the video stream could not be opened
    pub fn open(&self, path: &Path, decoder: &DecoderConfig) -> Result<FfmpegDecoder, PlayerError> {
        FfmpegDecoder::open(path, decoder).map_err(|e| {
            log::error!("Failed to open {}: {}", path.display(), e);
            e
        })
    }

    /// Play an already opened source until it ends, fails or is interrupted.
    ///
    /// The source is dropped (and its resources released) before this returns.
    pub fn play<S: FrameSource, W: Write>(
        &mut self,
        source: S,
        sink: &mut TerminalSink<W>,
    ) -> PlaybackReport {
        let mut state = SessionState::new();
        state.transition(Phase::Opening);
        self.run(source, sink, state)
    }

    /// Rate a session with `source` would be paced to.
    pub fn target_fps_for<S: FrameSource>(&self, source: &S) -> f64 {
        resolve_target_fps(self.settings.fps, source.native_fps())
    }

    fn run<S: FrameSource, W: Write>(
        &mut self,
        mut source: S,
        sink: &mut TerminalSink<W>,
        mut state: SessionState,
    ) -> PlaybackReport {
        let target_fps = self.target_fps_for(&source);
        log::info!(
            "Playing {} at width {} and {:.1} fps",
            source.info(),
            self.settings.width,
            target_fps
        );

        state.start(Instant::now());
        let outcome = loop {
            match self.step(&mut source, sink, &mut state, target_fps) {
                Ok(Step::Drawn) => continue,
                Ok(Step::EndOfStream) => break PlaybackOutcome::Completed,
                Ok(Step::Interrupted) => break PlaybackOutcome::Interrupted,
                Err(e) => break PlaybackOutcome::Failed(e),
            }
        };

        self.finish(source, state, outcome, target_fps)
    }

    /// Decode, render and draw one frame, then wait out its time slot.
    fn step<S: FrameSource, W: Write>(
        &mut self,
        source: &mut S,
        sink: &mut TerminalSink<W>,
        state: &mut SessionState,
        target_fps: f64,
    ) -> Result<Step, PlayerError> {
        if self.interrupt.is_set() {
            return Ok(Step::Interrupted);
        }

        // A Ctrl+C while blocked in the decoder can surface as a failed or
        // truncated stream; the interrupt wins
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) if self.interrupt.is_set() => return Ok(Step::Interrupted),
            Ok(None) => return Ok(Step::EndOfStream),
            Err(_) if self.interrupt.is_set() => return Ok(Step::Interrupted),
            Err(e) => return Err(e),
        };

        let ascii = self.renderer.render(&frame, self.settings.width)?;
        ascii.write_text(&mut self.text);
        sink.clear_and_draw(&self.text)?;

        let frames = state.record_frame();
        let now = Instant::now();
        if let Some(delay) = pacing_delay(frames, target_fps, state.elapsed(now)) {
            if sleep_until(now + delay, &self.interrupt) {
                return Ok(Step::Interrupted);
            }
        }

        Ok(Step::Drawn)
    }

    /// Single exit path: release the source, then summarise.
    fn finish<S: FrameSource>(
        &self,
        source: S,
        mut state: SessionState,
        outcome: PlaybackOutcome,
        target_fps: f64,
    ) -> PlaybackReport {
        drop(source);
        self.interrupt.reset();

        let elapsed = state.elapsed(Instant::now());
        state.transition(outcome.phase());

        let report = PlaybackReport {
            outcome,
            frames_rendered: state.frames_rendered(),
            elapsed,
            target_fps,
        };

        match &report.outcome {
            PlaybackOutcome::Failed(e) => log::error!(
                "Playback failed after {} frames: {}",
                report.frames_rendered,
                e
            ),
            outcome => log::info!(
                "Playback {} after {} frames ({:.1} fps)",
                outcome.phase(),
                report.frames_rendered,
                report.average_fps()
            ),
        }

        report
    }
}
