//! Dimension calculation for aspect-ratio-correct ASCII rendering.

/// Default terminal character aspect ratio.
/// Terminal characters are typically ~2x taller than wide.
pub const DEFAULT_CHAR_ASPECT_RATIO: f64 = 2.0;

/// Number of text rows needed to show a `img_width x img_height` image
/// `char_width` characters wide without vertical stretching.
///
/// `max(1, round(img_height * char_width / img_width / 2))`.
///
/// # Example
/// ```
/// use ascii_video::ascii::target_height;
/// assert_eq!(target_height(100, 50, 80), 20);
/// ```
pub fn target_height(img_width: u32, img_height: u32, char_width: u32) -> u32 {
    target_height_with_aspect(img_width, img_height, char_width, DEFAULT_CHAR_ASPECT_RATIO)
}

/// Same as [`target_height`] with a custom character aspect ratio
/// (height / width) for non-standard terminal fonts.
pub fn target_height_with_aspect(
    img_width: u32,
    img_height: u32,
    char_width: u32,
    char_aspect: f64,
) -> u32 {
    if img_width == 0 || img_height == 0 || char_width == 0 || char_aspect <= 0.0 {
        return 1;
    }

    let rows = img_height as f64 * char_width as f64 / img_width as f64 / char_aspect;
    (rows.round().min(u32::MAX as f64) as u32).max(1)
}
