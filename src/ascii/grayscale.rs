//! Sample to intensity conversion using the ITU-R BT.601 luma weights.

use crate::video::PixelFormat;

/// BT.601 luma: `Y = 0.299 R + 0.587 G + 0.114 B`.
///
/// These are the weights ffmpeg (and most decoders) use for RGB to gray.
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Round and clamp an averaged sample into the 8-bit intensity range.
#[inline]
pub fn to_intensity(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Collapse interleaved samples of `format` to one intensity per pixel.
///
/// Single-channel samples pass through (rounded and clamped); RGB samples
/// go through [`luma`]. Returns the number of intensities written.
pub fn to_intensity_into(samples: &[f32], format: PixelFormat, buffer: &mut Vec<u8>) -> usize {
    buffer.clear();

    match format {
        PixelFormat::Gray8 => {
            buffer.reserve(samples.len());
            buffer.extend(samples.iter().map(|&v| to_intensity(v)));
        }
        PixelFormat::Rgb24 => {
            buffer.reserve(samples.len() / 3);
            for rgb in samples.chunks_exact(3) {
                buffer.push(to_intensity(luma(rgb[0], rgb[1], rgb[2])));
            }
        }
    }

    buffer.len()
}
