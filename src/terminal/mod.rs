//! Terminal plumbing: the frame output sink, width discovery and Ctrl+C handling.

mod signal;
mod sink;
mod size;

pub use signal::{install_ctrlc_handler, InterruptFlag};
pub use sink::{TerminalSink, CLEAR_AND_HOME};
pub use size::{columns_from_env, terminal_width, FALLBACK_COLUMNS};
