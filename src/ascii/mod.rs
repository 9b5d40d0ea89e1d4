//! ASCII renderer module for converting video frames to ASCII art.
//!
//! Each frame goes through the same steps:
//!
//! 1. **Geometry** - pick the row count that keeps the aspect ratio
//! 2. **Resampling** - area-average down (or up) to the character grid
//! 3. **Luma** - collapse RGB to one intensity per cell (BT.601)
//! 4. **Lookup** - index the precomputed intensity table for each glyph
//!
//! # Character Sets
//!
//! Built-in ramps are available via [`CharSet`]:
//! - `Standard` - 10-level ASCII density ramp
//! - `Blocks` - Unicode block characters
//! - `Minimal` - 4-level clean look

mod charset;
mod dimensions;
mod downsample;
mod frame;
mod grayscale;
mod lookup;
mod render;

pub use charset::{CharSet, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET};
pub use dimensions::{target_height, target_height_with_aspect, DEFAULT_CHAR_ASPECT_RATIO};
pub use downsample::{downsample, AreaResampler};
pub use frame::AsciiFrame;
pub use grayscale::{luma, to_intensity, to_intensity_into};
pub use lookup::{build_lookup, LookupTable};
pub use render::{render_frame, AsciiRenderer};
