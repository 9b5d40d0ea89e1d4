//! The rendered glyph grid.

/// ASCII-rendered frame.
///
/// Holds the character grid produced by the renderer in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiFrame {
    /// Character data for the frame (row-major order)
    pub chars: Vec<char>,
    /// Width in characters
    pub width: u32,
    /// Height in characters
    pub height: u32,
}

impl Default for AsciiFrame {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl AsciiFrame {
    /// Create a blank frame with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            chars: vec![' '; size],
            width,
            height,
        }
    }

    /// Create a frame from a character vector.
    pub fn from_chars(chars: Vec<char>, width: u32, height: u32) -> Self {
        debug_assert_eq!(chars.len(), (width as usize) * (height as usize));
        Self {
            chars,
            width,
            height,
        }
    }

    /// Iterate over rows of glyphs.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.chars.chunks(self.width.max(1) as usize)
    }

    /// Text form of the frame: rows joined by `\n`, no trailing newline.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Write the text form into `out`, replacing its contents.
    pub fn write_text(&self, out: &mut String) {
        out.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }

        out.reserve(self.chars.len() + self.height as usize);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter());
        }
    }
}
