//! ascii-video library crate.
//!
//! Plays video files as ASCII art in the terminal. The modules are exposed
//! for the binary and for integration testing.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod error;
pub mod player;
pub mod terminal;
pub mod video;

pub use error::PlayerError;
