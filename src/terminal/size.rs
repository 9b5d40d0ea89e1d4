//! Terminal width discovery.

/// Width assumed when nothing better is known.
pub const FALLBACK_COLUMNS: u16 = 80;

/// Current terminal width in columns.
///
/// Asks the terminal first, then the `COLUMNS` variable, then falls back
/// to 80.
pub fn terminal_width() -> u16 {
    let queried = crossterm::terminal::size().ok().map(|(cols, _rows)| cols);
    pick_width(queried, std::env::var("COLUMNS").ok().as_deref())
}

fn pick_width(queried: Option<u16>, columns_env: Option<&str>) -> u16 {
    queried
        .filter(|&cols| cols > 0)
        .or_else(|| columns_from_env(columns_env))
        .unwrap_or(FALLBACK_COLUMNS)
}

/// Parse a `COLUMNS`-style value; zero and garbage are ignored.
pub fn columns_from_env(value: Option<&str>) -> Option<u16> {
    value
        .and_then(|v| v.trim().parse::<u16>().ok())
        .filter(|&cols| cols > 0)
}
