//! Frame to text rendering: geometry, resample, luma, lookup, assemble.

use std::borrow::Cow;

use super::charset::CharSet;
use super::dimensions::target_height;
use super::downsample::AreaResampler;
use super::frame::AsciiFrame;
use super::grayscale::to_intensity_into;
use super::lookup::LookupTable;
use crate::error::PlayerError;
use crate::video::Frame;

/// Converts decoded frames into fixed-width glyph grids.
///
/// Scratch buffers live on the renderer and are reused frame to frame.
#[derive(Debug)]
pub struct AsciiRenderer {
    table: Cow<'static, LookupTable>,
    resampler: AreaResampler,
    samples: Vec<f32>,
    intensities: Vec<u8>,
}

impl AsciiRenderer {
    /// Renderer using one of the built-in ramps.
    pub fn new(charset: CharSet) -> Self {
        Self::from_cow(Cow::Borrowed(charset.lookup()))
    }

    /// Renderer using a caller-supplied table, e.g. from [`build_lookup`](super::build_lookup).
    pub fn with_table(table: LookupTable) -> Self {
        Self::from_cow(Cow::Owned(table))
    }

    fn from_cow(table: Cow<'static, LookupTable>) -> Self {
        Self {
            table,
            resampler: AreaResampler::new(),
            samples: Vec::new(),
            intensities: Vec::new(),
        }
    }

    /// Render `frame` as `target_width` columns of glyphs.
    ///
    /// The row count comes from [`target_height`]. Output is a pure function
    /// of the frame, width and table.
    ///
    /// # Errors
    /// * `PlayerError::InvalidGeometry` - `target_width` is 0 or the frame has no pixels
    /// * `PlayerError::DecodeFailure` - the frame's data does not match its dimensions
    pub fn render(&mut self, frame: &Frame, target_width: u32) -> Result<AsciiFrame, PlayerError> {
        if frame.is_empty() {
            return Err(PlayerError::InvalidGeometry {
                width: frame.width,
                height: frame.height,
            });
        }
        if target_width == 0 {
            return Err(PlayerError::InvalidGeometry {
                width: 0,
                height: 0,
            });
        }
        if frame.data.len() != frame.expected_len() {
            return Err(PlayerError::DecodeFailure(format!(
                "frame data is {} bytes, expected {} for {}x{}",
                frame.data.len(),
                frame.expected_len(),
                frame.width,
                frame.height
            )));
        }

        let height = target_height(frame.width, frame.height, target_width);

        self.resampler.resample_into(
            &frame.data,
            frame.width as usize,
            frame.height as usize,
            frame.bytes_per_pixel(),
            target_width as usize,
            height as usize,
            &mut self.samples,
        );
        to_intensity_into(&self.samples, frame.format, &mut self.intensities);

        let mut chars = Vec::with_capacity(self.intensities.len());
        for &intensity in &self.intensities {
            chars.push(self.table.glyph(intensity));
        }

        Ok(AsciiFrame::from_chars(chars, target_width, height))
    }

    /// Render straight to the newline-joined text form.
    pub fn render_to_string(&mut self, frame: &Frame, target_width: u32) -> Result<String, PlayerError> {
        Ok(self.render(frame, target_width)?.to_text())
    }
}

/// One-shot render with the standard ramp.
pub fn render_frame(frame: &Frame, target_width: u32) -> Result<String, PlayerError> {
    AsciiRenderer::new(CharSet::Standard).render_to_string(frame, target_width)
}
