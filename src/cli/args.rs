//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CharacterSet;
use crate::config::MAX_WIDTH;

/// Parse and validate render width (1-200)
fn parse_width(s: &str) -> Result<u16, String> {
    let width: u16 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    if !(1..=MAX_WIDTH).contains(&width) {
        return Err(format!(
            "Width must be between 1 and {}, got {}",
            MAX_WIDTH, width
        ));
    }
    Ok(width)
}

/// Parse and validate frame rate (positive)
fn parse_fps(s: &str) -> Result<f64, String> {
    let fps: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !fps.is_finite() || fps <= 0.0 {
        return Err(format!("FPS must be a positive number, got {}", fps));
    }
    Ok(fps)
}

/// Play video files as ASCII art in the terminal
#[derive(Parser, Debug)]
#[command(name = "ascii-video")]
#[command(version, about = "Play video files as ASCII art in the terminal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Video file to play
    pub path: Option<PathBuf>,

    /// Render width in characters, 1-200 (default: terminal width)
    #[arg(short, long, value_parser = parse_width)]
    pub width: Option<u16>,

    /// Target frames per second (default: the video's own rate)
    #[arg(short, long, value_parser = parse_fps)]
    pub fps: Option<f64>,

    /// ASCII character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Skip the pause between the banner and the first frame
    #[arg(long)]
    pub no_intro: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
