//! Subcommand handlers and the glue between parsed arguments and the player.

use std::path::Path;

use super::args::{Args, ConfigAction};
use crate::ascii::CharSet;
use crate::config::{self, Config, ConfigError};
use crate::error::PlayerError;
use crate::player::{PlaybackOutcome, PlaybackReport, PlaybackSettings};

const DEFAULT_CONFIG: &str = r#"# ascii-video configuration

[playback]
# Render width in characters, 1-200 (default: terminal width)
# width = 80
# Target frames per second (default: the video's own rate)
# fps = 24.0
# Pause between the banner and the first frame, in milliseconds
intro_delay_ms = 1500

[ascii]
# Character set: standard, blocks, minimal
charset = "standard"

[decoder]
# Paths to the ffmpeg tools (default: looked up on PATH)
ffmpeg = "ffmpeg"
ffprobe = "ffprobe"
"#;

/// Merge settings: CLI args > config file > built-in defaults.
///
/// `terminal_width` is only consulted when neither source sets a width.
///
/// # Errors
/// * `PlayerError::InvalidConfig` - the config file holds an out-of-range
///   width, a non-positive fps or an unknown charset
pub fn resolve_settings(
    args: &Args,
    config: &Config,
    terminal_width: u16,
) -> Result<PlaybackSettings, PlayerError> {
    let width = match args.width.or(config.playback.width) {
        Some(width) => config::validate_width(width)?,
        None => config::default_width(terminal_width),
    };

    let fps = args
        .fps
        .or(config.playback.fps)
        .map(config::validate_fps)
        .transpose()?;

    let charset = match (args.charset, config.ascii.charset.as_deref()) {
        (Some(charset), _) => CharSet::from(charset),
        (None, Some(name)) => name.parse::<CharSet>().map_err(PlayerError::InvalidConfig)?,
        (None, None) => CharSet::default(),
    };

    Ok(PlaybackSettings {
        width: u32::from(width),
        fps,
        charset,
    })
}

/// Lines printed before the first frame.
pub fn format_banner(path: &Path, width: u32, target_fps: f64) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    format!(
        "Playing: {}\nResolution: {} chars, FPS: {:.1}\nPress Ctrl+C to stop...",
        name, width, target_fps
    )
}

/// Lines printed after playback ends, whatever the outcome.
pub fn format_summary(report: &PlaybackReport) -> String {
    let mut out = String::new();
    match &report.outcome {
        PlaybackOutcome::Completed => {}
        PlaybackOutcome::Interrupted => out.push_str("\n\nVideo playback interrupted by user.\n"),
        PlaybackOutcome::Failed(e) => out.push_str(&format!("\n\nAn error occurred: {}\n", e)),
    }
    out.push_str(&format!(
        "\nPlayback completed:\nFrames processed: {}\nActual FPS: {:.1}",
        report.frames_rendered,
        report.average_fps()
    ));
    out
}

/// Handle config subcommand actions.
///
/// `config_path` is the `--config` override; the default location is used
/// otherwise.
pub fn handle_config_action(
    action: ConfigAction,
    config_path: Option<&Path>,
) -> Result<(), PlayerError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_path);

    match action {
        ConfigAction::Show => {
            let cfg = Config::load(Some(&path))?;
            println!("Current configuration:");
            println!("{}", describe_config(&cfg));
            println!();
            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
        }
        ConfigAction::Init => {
            write_default_config(&path)?;
            println!("Created config file: {}", path.display());
        }
    }
    Ok(())
}

fn describe_config(cfg: &Config) -> String {
    let width = cfg
        .playback
        .width
        .map(|w| w.to_string())
        .unwrap_or_else(|| "terminal width".to_string());
    let fps = cfg
        .playback
        .fps
        .map(|f| format!("{:.1}", f))
        .unwrap_or_else(|| "video rate".to_string());
    let charset = cfg.ascii.charset.as_deref().unwrap_or("standard");

    format!(
        "  Width: {}\n  FPS: {}\n  Intro delay: {} ms\n  Charset: {}\n  ffmpeg: {}\n  ffprobe: {}",
        width,
        fps,
        cfg.playback.intro_delay_ms,
        charset,
        cfg.decoder.ffmpeg,
        cfg.decoder.ffprobe
    )
}

/// Write the commented default config to `path`, refusing to overwrite.
fn write_default_config(path: &Path) -> Result<(), PlayerError> {
    if path.exists() {
        return Err(PlayerError::InvalidConfig(format!(
            "Config file already exists: {}. Use 'ascii-video config show' to view current settings.",
            path.display()
        )));
    }

    let io_error = |source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CharacterSet;
    use clap::Parser;
    use std::time::Duration;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["ascii-video", "clip.mp4"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    // ==== Settings resolution ====

    #[test]
    fn test_resolve_defaults_use_terminal_width() {
        let settings = resolve_settings(&args(&[]), &Config::default(), 132).unwrap();
        assert_eq!(settings.width, 132);
        assert_eq!(settings.fps, None);
        assert_eq!(settings.charset, CharSet::Standard);
    }

    #[test]
    fn test_resolve_caps_wide_terminal() {
        let settings = resolve_settings(&args(&[]), &Config::default(), 300).unwrap();
        assert_eq!(settings.width, 200);
    }

    #[test]
    fn test_resolve_cli_overrides_config() {
        let mut cfg = Config::default();
        cfg.playback.width = Some(60);
        cfg.playback.fps = Some(24.0);
        cfg.ascii.charset = Some("minimal".to_string());

        let settings =
            resolve_settings(&args(&["-w", "100", "-f", "12", "--charset", "blocks"]), &cfg, 80)
                .unwrap();
        assert_eq!(settings.width, 100);
        assert_eq!(settings.fps, Some(12.0));
        assert_eq!(settings.charset, CharSet::from(CharacterSet::Blocks));
    }

    #[test]
    fn test_resolve_config_used_when_cli_silent() {
        let mut cfg = Config::default();
        cfg.playback.width = Some(60);
        cfg.playback.fps = Some(24.0);
        cfg.ascii.charset = Some("minimal".to_string());

        let settings = resolve_settings(&args(&[]), &cfg, 80).unwrap();
        assert_eq!(settings.width, 60);
        assert_eq!(settings.fps, Some(24.0));
        assert_eq!(settings.charset, CharSet::Minimal);
    }

    #[test]
    fn test_resolve_rejects_bad_config_values() {
        let mut cfg = Config::default();
        cfg.playback.width = Some(500);
        assert!(matches!(
            resolve_settings(&args(&[]), &cfg, 80),
            Err(PlayerError::InvalidConfig(_))
        ));

        let mut cfg = Config::default();
        cfg.playback.fps = Some(0.0);
        assert!(matches!(
            resolve_settings(&args(&[]), &cfg, 80),
            Err(PlayerError::InvalidConfig(_))
        ));

        let mut cfg = Config::default();
        cfg.ascii.charset = Some("braille".to_string());
        assert!(matches!(
            resolve_settings(&args(&[]), &cfg, 80),
            Err(PlayerError::InvalidConfig(_))
        ));
    }

    // ==== Banner and summary ====

    #[test]
    fn test_banner_uses_file_name() {
        let banner = format_banner(Path::new("/videos/holiday/beach.mp4"), 80, 29.97);
        assert_eq!(
            banner,
            "Playing: beach.mp4\nResolution: 80 chars, FPS: 30.0\nPress Ctrl+C to stop..."
        );
    }

    #[test]
    fn test_summary_completed() {
        let report = PlaybackReport {
            outcome: PlaybackOutcome::Completed,
            frames_rendered: 48,
            elapsed: Duration::from_secs(2),
            target_fps: 24.0,
        };
        assert_eq!(
            format_summary(&report),
            "\nPlayback completed:\nFrames processed: 48\nActual FPS: 24.0"
        );
    }

    #[test]
    fn test_summary_interrupted() {
        let report = PlaybackReport {
            outcome: PlaybackOutcome::Interrupted,
            frames_rendered: 3,
            elapsed: Duration::from_millis(300),
            target_fps: 10.0,
        };
        let summary = format_summary(&report);
        assert!(summary.starts_with("\n\nVideo playback interrupted by user.\n"));
        assert!(summary.contains("Frames processed: 3"));
        assert!(summary.ends_with("Actual FPS: 10.0"));
    }

    #[test]
    fn test_summary_failed() {
        let report = PlaybackReport {
            outcome: PlaybackOutcome::Failed(PlayerError::DecodeFailure("truncated".into())),
            frames_rendered: 0,
            elapsed: Duration::ZERO,
            target_fps: 30.0,
        };
        let summary = format_summary(&report);
        assert!(summary.contains("An error occurred:"));
        assert!(summary.contains("truncated"));
        assert!(summary.ends_with("Actual FPS: 0.0"));
    }

    // ==== Config subcommand ====

    #[test]
    fn test_config_init_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        handle_config_action(ConfigAction::Init, Some(&path)).unwrap();
        assert!(path.exists());

        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.playback.width, None);
        assert_eq!(cfg.ascii.charset.as_deref(), Some("standard"));
        assert_eq!(cfg, {
            let mut expected = Config::default();
            expected.ascii.charset = Some("standard".to_string());
            expected
        });
    }

    #[test]
    fn test_config_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let err = handle_config_action(ConfigAction::Init, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
    }

    #[test]
    fn test_config_show_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[playback\n").unwrap();

        let err = handle_config_action(ConfigAction::Show, Some(&path)).unwrap_err();
        assert!(matches!(err, PlayerError::Config(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_describe_config_defaults() {
        let text = describe_config(&Config::default());
        assert!(text.contains("Width: terminal width"));
        assert!(text.contains("FPS: video rate"));
        assert!(text.contains("Intro delay: 1500 ms"));
        assert!(text.contains("Charset: standard"));
    }
}
