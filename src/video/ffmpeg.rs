//! Frame decoding through an `ffmpeg` child process.
//!
//! ffmpeg writes raw `rgb24` frames to its stdout at the stream's native
//! resolution; each call to [`FfmpegDecoder::next_frame`] reads exactly one.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};

use super::probe::probe_video;
use super::source::FrameSource;
use super::types::{Frame, PixelFormat, VideoInfo};
use crate::config::DecoderConfig;
use crate::error::PlayerError;

/// A running ffmpeg decode of one video file.
///
/// The child process is killed and reaped when the decoder is dropped,
/// whether playback finished, failed or was interrupted.
pub struct FfmpegDecoder {
    path: PathBuf,
    info: VideoInfo,
    child: Child,
    stdout: BufReader<ChildStdout>,
    stderr_thread: Option<JoinHandle<Vec<String>>>,
    frame_len: usize,
    finished: bool,
}

impl std::fmt::Debug for FfmpegDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegDecoder")
            .field("path", &self.path)
            .field("info", &self.info)
            .field("pid", &self.child.id())
            .finish_non_exhaustive()
    }
}

impl FfmpegDecoder {
    /// Open `path` for decoding.
    ///
    /// # Errors
    /// * `PlayerError::SourceNotFound` - the path does not exist; nothing is spawned
    /// * `PlayerError::SourceUnreadable` - probing failed or ffmpeg could not start
    pub fn open(path: &Path, decoder: &DecoderConfig) -> Result<Self, PlayerError> {
        if !path.exists() {
            return Err(PlayerError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        let info = probe_video(path, &decoder.ffprobe)?;
        log::debug!("Probed {}: {}", path.display(), info);

        let mut command = Command::new(&decoder.ffmpeg);
        command
            .args(["-hide_banner", "-nostdin", "-loglevel", "error", "-i"])
            .arg(path)
            .args(["-map", "0:v:0", "-an", "-sn"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group: Ctrl+C in the terminal reaches the player only,
        // which then stops ffmpeg itself on drop
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PlayerError::unreadable(path, format!("'{}' not found on PATH", decoder.ffmpeg))
                } else {
                    PlayerError::unreadable(path, format!("failed to spawn ffmpeg: {}", e))
                }
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(PlayerError::unreadable(path, "failed to capture ffmpeg stdout"));
        };

        // Drain stderr so ffmpeg never blocks on a full pipe
        let stderr_thread = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                let reader = BufReader::new(stderr);
                let mut lines = Vec::new();
                for line in reader.lines() {
                    match line {
                        Ok(l) => {
                            log::debug!("[ffmpeg] {}", l);
                            lines.push(l);
                        }
                        Err(_) => break,
                    }
                }
                lines
            })
        });

        let frame_len = (info.width as usize) * (info.height as usize) * PixelFormat::Rgb24.bytes_per_pixel();

        Ok(Self {
            path: path.to_path_buf(),
            info,
            child,
            stdout: BufReader::with_capacity(frame_len.max(8192), stdout),
            stderr_thread,
            frame_len,
            finished: false,
        })
    }

    /// Called once stdout hit EOF: a failed exit means the stream was cut short.
    fn check_exit(&mut self) -> Result<(), PlayerError> {
        let status = self
            .child
            .wait()
            .map_err(|e| PlayerError::DecodeFailure(format!("failed to wait for ffmpeg: {}", e)))?;
        if status.success() {
            return Ok(());
        }
        let stderr = self.take_stderr_output().join("\n");
        Err(PlayerError::DecodeFailure(format!(
            "ffmpeg exited with code {:?}: {}",
            status.code(),
            stderr.trim()
        )))
    }

    fn take_stderr_output(&mut self) -> Vec<String> {
        self.stderr_thread
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or_default()
    }
}

impl FrameSource for FfmpegDecoder {
    fn next_frame(&mut self) -> Result<Option<Frame>, PlayerError> {
        if self.finished {
            return Ok(None);
        }

        let mut data = vec![0u8; self.frame_len];
        let filled = read_full(&mut self.stdout, &mut data)
            .map_err(|e| PlayerError::DecodeFailure(format!("failed to read from ffmpeg: {}", e)))?;

        if filled == self.frame_len {
            return Ok(Some(Frame::rgb(data, self.info.width, self.info.height)));
        }

        self.finished = true;
        self.check_exit()?;
        if filled == 0 {
            Ok(None)
        } else {
            Err(PlayerError::DecodeFailure(format!(
                "truncated frame: got {} of {} bytes",
                filled, self.frame_len
            )))
        }
    }

    fn info(&self) -> VideoInfo {
        self.info
    }
}

impl Drop for FfmpegDecoder {
    fn drop(&mut self) {
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                let _ = self.child.kill();
                let _ = self.child.wait();
            }
        }
        let _ = self.take_stderr_output();
        log::debug!("Released decoder for {}", self.path.display());
    }
}

/// Fill `buf` from `reader`, stopping early only at EOF.
///
/// Returns the number of bytes read; less than `buf.len()` means EOF.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
