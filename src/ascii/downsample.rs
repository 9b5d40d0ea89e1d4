//! Area-averaging resampling of pixel data to a character grid.
//!
//! Each output cell covers the continuous source rectangle
//! `[x * sx, (x + 1) * sx) x [y * sy, (y + 1) * sy)` where `sx`, `sy` are the
//! source-to-output scale factors. Every source pixel contributes in
//! proportion to how much of it falls inside that rectangle, so shrinking
//! averages whole neighbourhoods and growing spreads pixels over several
//! cells. The filter is separable and runs as a horizontal then a vertical
//! pass.

/// One source pixel's contribution to an output cell.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    src: usize,
    weight: f32,
}

/// Precomputed taps for one axis.
#[derive(Debug, Default)]
struct AxisTaps {
    /// `(first tap, tap count)` for each output position
    spans: Vec<(usize, usize)>,
    taps: Vec<Tap>,
}

impl AxisTaps {
    fn rebuild(&mut self, src_len: usize, dst_len: usize) {
        self.spans.clear();
        self.taps.clear();

        let scale = src_len as f64 / dst_len as f64;
        for i in 0..dst_len {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);
            let first = self.taps.len();

            let mut s = start.floor() as usize;
            while s < src_len && (s as f64) < end {
                let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                if overlap > 0.0 {
                    self.taps.push(Tap {
                        src: s,
                        weight: (overlap / scale) as f32,
                    });
                }
                s += 1;
            }

            self.spans.push((first, self.taps.len() - first));
        }
    }

    fn taps_for(&self, i: usize) -> &[Tap] {
        let (first, count) = self.spans[i];
        &self.taps[first..first + count]
    }
}

/// Reusable area-averaging resampler.
///
/// Keeps its tap tables and intermediate buffer between calls so the
/// per-frame hot path does not allocate once dimensions settle.
#[derive(Debug, Default)]
pub struct AreaResampler {
    x_taps: AxisTaps,
    y_taps: AxisTaps,
    tap_key: Option<(usize, usize, usize, usize)>,
    horizontal: Vec<f32>,
}

impl AreaResampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resample interleaved `channels`-per-pixel data into `out`.
    ///
    /// `out` receives `dst_width * dst_height * channels` averaged samples
    /// (row-major, channels interleaved). Returns the number of samples written.
    /// Zero-sized input or output writes nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn resample_into(
        &mut self,
        src: &[u8],
        src_width: usize,
        src_height: usize,
        channels: usize,
        dst_width: usize,
        dst_height: usize,
        out: &mut Vec<f32>,
    ) -> usize {
        out.clear();

        if src_width == 0
            || src_height == 0
            || dst_width == 0
            || dst_height == 0
            || channels == 0
            || src.len() < src_width * src_height * channels
        {
            return 0;
        }

        let key = (src_width, src_height, dst_width, dst_height);
        if self.tap_key != Some(key) {
            self.x_taps.rebuild(src_width, dst_width);
            self.y_taps.rebuild(src_height, dst_height);
            self.tap_key = Some(key);
        }

        // Horizontal pass: src_height rows of dst_width cells
        let row_stride = src_width * channels;
        self.horizontal.clear();
        self.horizontal.resize(src_height * dst_width * channels, 0.0);
        for y in 0..src_height {
            let row = &src[y * row_stride..(y + 1) * row_stride];
            let out_row = &mut self.horizontal[y * dst_width * channels..(y + 1) * dst_width * channels];
            for x in 0..dst_width {
                let cell = &mut out_row[x * channels..(x + 1) * channels];
                for tap in self.x_taps.taps_for(x) {
                    let px = &row[tap.src * channels..(tap.src + 1) * channels];
                    for (acc, &v) in cell.iter_mut().zip(px) {
                        *acc += v as f32 * tap.weight;
                    }
                }
            }
        }

        // Vertical pass: dst_height rows from the horizontal result
        let mid_stride = dst_width * channels;
        out.resize(dst_height * mid_stride, 0.0);
        for y in 0..dst_height {
            let out_row = &mut out[y * mid_stride..(y + 1) * mid_stride];
            for tap in self.y_taps.taps_for(y) {
                let mid_row = &self.horizontal[tap.src * mid_stride..(tap.src + 1) * mid_stride];
                for (acc, &v) in out_row.iter_mut().zip(mid_row) {
                    *acc += v * tap.weight;
                }
            }
        }

        out.len()
    }
}

/// Resample a single-channel image to a `char_width x char_height` grid.
///
/// Convenience wrapper around [`AreaResampler`] returning rounded bytes.
///
/// # Example
/// ```
/// use ascii_video::ascii::downsample;
/// // 2x2 checkerboard averaged into one cell
/// assert_eq!(downsample(&[0, 255, 255, 0], 2, 2, 1, 1), vec![128]);
/// ```
pub fn downsample(
    gray: &[u8],
    img_width: u32,
    img_height: u32,
    char_width: u32,
    char_height: u32,
) -> Vec<u8> {
    let mut samples = Vec::new();
    AreaResampler::new().resample_into(
        gray,
        img_width as usize,
        img_height as usize,
        1,
        char_width as usize,
        char_height as usize,
        &mut samples,
    );
    samples
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights_sum(taps: &AxisTaps, i: usize) -> f32 {
        taps.taps_for(i).iter().map(|t| t.weight).sum()
    }

    #[test]
    fn test_taps_integer_shrink() {
        let mut taps = AxisTaps::default();
        taps.rebuild(4, 2);
        assert_eq!(
            taps.taps_for(0),
            &[Tap { src: 0, weight: 0.5 }, Tap { src: 1, weight: 0.5 }]
        );
        assert_eq!(
            taps.taps_for(1),
            &[Tap { src: 2, weight: 0.5 }, Tap { src: 3, weight: 0.5 }]
        );
    }

    #[test]
    fn test_taps_fractional_shrink() {
        // 3 -> 2: each cell covers 1.5 source pixels
        let mut taps = AxisTaps::default();
        taps.rebuild(3, 2);
        let first = taps.taps_for(0);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].src, 0);
        assert!((first[0].weight - 2.0 / 3.0).abs() < 1e-6);
        assert!((first[1].weight - 1.0 / 3.0).abs() < 1e-6);
        for i in 0..2 {
            assert!((weights_sum(&taps, i) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_taps_upscale_weights_sum_to_one() {
        let mut taps = AxisTaps::default();
        taps.rebuild(3, 7);
        for i in 0..7 {
            assert!((weights_sum(&taps, i) - 1.0).abs() < 1e-5, "cell {}", i);
        }
    }

    #[test]
    fn test_downsample_uniform_image() {
        let gray = vec![100u8; 64 * 48];
        let result = downsample(&gray, 64, 48, 10, 7);
        assert_eq!(result.len(), 70);
        assert!(result.iter().all(|&v| v == 100));
    }

    #[test]
    fn test_downsample_halves() {
        // Left half dark, right half bright
        let mut gray = Vec::new();
        for _y in 0..4 {
            gray.extend_from_slice(&[0, 0, 200, 200]);
        }
        assert_eq!(downsample(&gray, 4, 4, 2, 1), vec![0, 200]);
    }

    #[test]
    fn test_downsample_fractional_mix() {
        // 3 -> 2 columns: first cell = (2/3)*0 + (1/3)*90 = 30
        let gray = [0u8, 90, 240];
        assert_eq!(downsample(&gray, 3, 1, 2, 1), vec![30, 190]);
    }

    #[test]
    fn test_downsample_upscale_replicates() {
        let gray = [10u8, 250];
        assert_eq!(downsample(&gray, 2, 1, 4, 1), vec![10, 10, 250, 250]);
    }

    #[test]
    fn test_resample_multichannel() {
        let rgb = [255u8, 0, 0, 0, 0, 255];
        let mut out = Vec::new();
        let written = AreaResampler::new().resample_into(&rgb, 2, 1, 3, 1, 1, &mut out);
        assert_eq!(written, 3);
        assert!((out[0] - 127.5).abs() < 1e-3);
        assert!(out[1].abs() < 1e-3);
        assert!((out[2] - 127.5).abs() < 1e-3);
    }

    #[test]
    fn test_resample_rejects_short_input() {
        let mut out = vec![1.0];
        let written = AreaResampler::new().resample_into(&[0u8; 3], 2, 2, 1, 1, 1, &mut out);
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_resampler_reuse_across_sizes() {
        let mut resampler = AreaResampler::new();
        let mut out = Vec::new();
        resampler.resample_into(&[50u8; 16], 4, 4, 1, 2, 2, &mut out);
        assert_eq!(out.len(), 4);
        resampler.resample_into(&[50u8; 9], 3, 3, 1, 3, 1, &mut out);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|v| (v - 50.0).abs() < 1e-3));
    }
}
