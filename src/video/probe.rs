//! Stream probing with `ffprobe`.

use serde::Deserialize;
use std::path::Path;
use std::process::{Command, Stdio};

use super::types::VideoInfo;
use crate::error::PlayerError;

#[derive(Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    #[serde(default)]
    tags: Option<ProbeTags>,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
}

#[derive(Deserialize)]
struct ProbeTags {
    rotate: Option<String>,
}

#[derive(Deserialize)]
struct ProbeSideData {
    rotation: Option<f64>,
}

impl ProbeStream {
    /// Display rotation in degrees, from the display matrix or the legacy tag.
    fn rotation(&self) -> Option<f64> {
        self.side_data_list
            .iter()
            .find_map(|d| d.rotation)
            .or_else(|| {
                self.tags
                    .as_ref()
                    .and_then(|t| t.rotate.as_deref())
                    .and_then(|r| r.trim().parse().ok())
            })
    }
}

#[derive(Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

/// Query the first video stream of `path`.
///
/// Any failure (missing ffprobe, unrecognised container, no video stream)
/// is reported as [`PlayerError::SourceUnreadable`].
pub fn probe_video(path: &Path, ffprobe: &str) -> Result<VideoInfo, PlayerError> {
    let out = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-print_format",
            "json",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::unreadable(path, format!("'{}' not found on PATH", ffprobe))
            } else {
                PlayerError::unreadable(path, format!("failed to run ffprobe: {}", e))
            }
        })?;

    if !out.status.success() {
        return Err(PlayerError::unreadable(
            path,
            String::from_utf8_lossy(&out.stderr).trim().to_string(),
        ));
    }

    parse_probe_output(&out.stdout).map_err(|reason| PlayerError::unreadable(path, reason))
}

fn parse_probe_output(json: &[u8]) -> Result<VideoInfo, String> {
    let parsed: ProbeOutput =
        serde_json::from_slice(json).map_err(|e| format!("ffprobe json parse failed: {}", e))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| "no video stream found".to_string())?;

    let width = stream.width.filter(|w| *w > 0);
    let height = stream.height.filter(|h| *h > 0);
    let (width, height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err("video stream has no dimensions".to_string()),
    };

    // ffmpeg auto-rotates on decode, so quarter turns come out transposed
    let quarter_turn = stream
        .rotation()
        .map(|deg| (deg.round() as i64).rem_euclid(180) == 90)
        .unwrap_or(false);
    let (width, height) = if quarter_turn {
        (height, width)
    } else {
        (width, height)
    };

    let fps = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_frame_rate));

    Ok(VideoInfo { width, height, fps })
}

/// Parse an ffmpeg rate such as `30000/1001` or `25`.
///
/// Returns `None` for `0/0` and anything else that is not a positive rate.
pub fn parse_frame_rate(s: &str) -> Option<f64> {
    let s = s.trim();
    let rate = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => s.parse().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}
