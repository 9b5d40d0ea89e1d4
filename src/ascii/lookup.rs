//! Intensity to glyph lookup table.

use crate::error::PlayerError;

/// Maps every 8-bit intensity to one glyph of a ramp.
///
/// Entry `i` holds `ramp[i * (N - 1) / 255]`, i.e. `floor(i / 255 * (N - 1))`,
/// so brighter intensities never map to an earlier glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    glyphs: [char; 256],
    indices: [u8; 256],
    ramp: Vec<char>,
}

/// Build the lookup table for `ramp`, ordered from least to most dense.
///
/// # Errors
/// * `PlayerError::InvalidRamp` - fewer than 2 glyphs, or more than 256
pub fn build_lookup(ramp: &[char]) -> Result<LookupTable, PlayerError> {
    if ramp.len() < 2 || ramp.len() > 256 {
        return Err(PlayerError::InvalidRamp { len: ramp.len() });
    }
    Ok(LookupTable::quantize(ramp))
}

impl LookupTable {
    /// Table for one of the compiled-in ramps, which are known to be valid.
    pub(super) fn from_builtin(ramp: &[char]) -> Self {
        debug_assert!((2..=256).contains(&ramp.len()));
        Self::quantize(ramp)
    }

    fn quantize(ramp: &[char]) -> Self {
        let levels = ramp.len();
        let mut glyphs = [' '; 256];
        let mut indices = [0u8; 256];
        for intensity in 0..256usize {
            let idx = intensity * (levels - 1) / 255;
            glyphs[intensity] = ramp[idx];
            indices[intensity] = idx as u8;
        }
        Self {
            glyphs,
            indices,
            ramp: ramp.to_vec(),
        }
    }

    /// Glyph for an intensity.
    #[inline]
    pub fn glyph(&self, intensity: u8) -> char {
        self.glyphs[intensity as usize]
    }

    /// Ramp position of the glyph chosen for an intensity.
    #[inline]
    pub fn index_of(&self, intensity: u8) -> usize {
        self.indices[intensity as usize] as usize
    }

    /// The ramp this table was built from.
    pub fn ramp(&self) -> &[char] {
        &self.ramp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    #[test]
    fn test_lookup_endpoints() {
        let table = build_lookup(RAMP).unwrap();
        assert_eq!(table.glyph(0), ' ');
        assert_eq!(table.glyph(255), '@');
        assert_eq!(table.index_of(255), 9);
    }

    #[test]
    fn test_lookup_matches_floor_formula() {
        let table = build_lookup(RAMP).unwrap();
        for i in 0..=255u8 {
            let expected = ((i as f64 / 255.0) * 9.0).floor() as usize;
            assert_eq!(table.index_of(i), expected, "intensity {}", i);
        }
    }

    #[test]
    fn test_lookup_bucket_boundaries() {
        // 255 / 9 = 28.33, so index 1 starts at 29
        let table = build_lookup(RAMP).unwrap();
        assert_eq!(table.glyph(28), ' ');
        assert_eq!(table.glyph(29), '.');
        assert_eq!(table.glyph(254), '%');
    }

    #[test]
    fn test_two_glyph_ramp() {
        let table = build_lookup(&['a', 'b']).unwrap();
        assert_eq!(table.glyph(0), 'a');
        assert_eq!(table.glyph(254), 'a');
        assert_eq!(table.glyph(255), 'b');
    }

    #[test]
    fn test_short_ramp_rejected() {
        assert!(matches!(
            build_lookup(&['x']),
            Err(PlayerError::InvalidRamp { len: 1 })
        ));
        assert!(matches!(
            build_lookup(&[]),
            Err(PlayerError::InvalidRamp { len: 0 })
        ));
    }

    #[test]
    fn test_ramp_is_kept() {
        let table = build_lookup(RAMP).unwrap();
        assert_eq!(table.ramp(), RAMP);
    }
}
