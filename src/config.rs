//! Configuration file handling for ascii-video.
//!
//! Loads configuration from `<config dir>/ascii-video/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::PlayerError;

/// Widest render the player accepts, in characters.
pub const MAX_WIDTH: u16 = 200;

/// Pause between the banner and the first frame.
pub const DEFAULT_INTRO_DELAY_MS: u64 = 1500;

/// Configuration file structure for ascii-video.
/// Loaded from <config dir>/ascii-video/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub ascii: AsciiConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Render width in characters (default: terminal width, capped at 200)
    #[serde(default)]
    pub width: Option<u16>,
    /// Target frame rate (default: the video's own rate)
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default = "default_intro_delay_ms")]
    pub intro_delay_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            width: None,
            fps: None,
            intro_delay_ms: DEFAULT_INTRO_DELAY_MS,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct AsciiConfig {
    #[serde(default)]
    pub charset: Option<String>,
}

/// Locations of the external decoding tools.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DecoderConfig {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

fn default_intro_delay_ms() -> u64 {
    DEFAULT_INTRO_DELAY_MS
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ascii-video").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ascii-video/config.toml")
        })
}

/// Check a render width against the accepted range `1..=MAX_WIDTH`.
pub fn validate_width(width: u16) -> Result<u16, PlayerError> {
    if !(1..=MAX_WIDTH).contains(&width) {
        return Err(PlayerError::InvalidConfig(format!(
            "Width must be between 1 and {}, got {}",
            MAX_WIDTH, width
        )));
    }
    Ok(width)
}

/// Check a requested frame rate is a positive, finite number.
pub fn validate_fps(fps: f64) -> Result<f64, PlayerError> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(PlayerError::InvalidConfig(format!(
            "FPS must be a positive number, got {}",
            fps
        )));
    }
    Ok(fps)
}

/// Width used when neither the CLI nor the config file sets one.
pub fn default_width(terminal_width: u16) -> u16 {
    terminal_width.clamp(1, MAX_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.playback.intro_delay_ms, DEFAULT_INTRO_DELAY_MS);
        assert_eq!(config.decoder.ffmpeg, "ffmpeg");
        assert_eq!(config.decoder.ffprobe, "ffprobe");
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[playback]
width = 120
fps = 24.0
intro_delay_ms = 0

[ascii]
charset = "blocks"

[decoder]
ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.playback.width, Some(120));
        assert_eq!(config.playback.fps, Some(24.0));
        assert_eq!(config.playback.intro_delay_ms, 0);
        assert_eq!(config.ascii.charset.as_deref(), Some("blocks"));
        assert_eq!(config.decoder.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.decoder.ffprobe, "ffprobe");
    }

    #[test]
    fn test_parse_error_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[playback]\nwidth = \"wide\"").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_validate_width_bounds() {
        assert_eq!(validate_width(1).unwrap(), 1);
        assert_eq!(validate_width(200).unwrap(), 200);
        assert!(validate_width(0).is_err());
        assert!(validate_width(201).is_err());
    }

    #[test]
    fn test_validate_fps() {
        assert_eq!(validate_fps(29.97).unwrap(), 29.97);
        assert!(validate_fps(0.0).is_err());
        assert!(validate_fps(-5.0).is_err());
        assert!(validate_fps(f64::NAN).is_err());
        assert!(validate_fps(f64::INFINITY).is_err());
    }

    #[test]
    fn test_default_width_caps_terminal() {
        assert_eq!(default_width(80), 80);
        assert_eq!(default_width(320), 200);
        assert_eq!(default_width(0), 1);
    }
}
