//! Glyph ramps for ASCII rendering.

use std::str::FromStr;
use std::sync::OnceLock;

use super::lookup::LookupTable;

/// Standard ASCII density ramp (10 levels).
/// Characters ordered from darkest (space) to brightest (@).
/// Works well on dark terminals.
pub const STANDARD_CHARSET: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Block character set (5 levels).
/// Uses Unicode block characters for higher perceived resolution.
pub const BLOCKS_CHARSET: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Minimal character set (4 levels).
/// Clean, less noisy look.
pub const MINIMAL_CHARSET: &[char] = &[' ', '.', ':', '#'];

static STANDARD_LOOKUP: OnceLock<LookupTable> = OnceLock::new();
static BLOCKS_LOOKUP: OnceLock<LookupTable> = OnceLock::new();
static MINIMAL_LOOKUP: OnceLock<LookupTable> = OnceLock::new();

/// Built-in glyph ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// Standard ASCII density ramp (10 levels)
    #[default]
    Standard,
    /// Block character set (5 levels) using Unicode blocks
    Blocks,
    /// Minimal character set (4 levels) for a clean look
    Minimal,
}

impl CharSet {
    /// Get the character slice for this charset.
    pub fn chars(&self) -> &'static [char] {
        match self {
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
        }
    }

    /// Lookup table for this charset, built on first use and shared afterwards.
    pub fn lookup(&self) -> &'static LookupTable {
        let cell = match self {
            CharSet::Standard => &STANDARD_LOOKUP,
            CharSet::Blocks => &BLOCKS_LOOKUP,
            CharSet::Minimal => &MINIMAL_LOOKUP,
        };
        cell.get_or_init(|| LookupTable::from_builtin(self.chars()))
    }

    /// Get a human-readable name for the charset.
    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Standard => "standard",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
        }
    }
}

impl FromStr for CharSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(CharSet::Standard),
            "blocks" => Ok(CharSet::Blocks),
            "minimal" => Ok(CharSet::Minimal),
            other => Err(format!(
                "Unknown charset '{}'. Available charsets: standard, blocks, minimal",
                other
            )),
        }
    }
}
