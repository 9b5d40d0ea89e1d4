//! Decoded frame types and stream metadata.

use std::fmt;

/// Pixel layout of a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Single 8-bit intensity channel
    Gray8,
    /// Packed RGB, 3 bytes per pixel
    Rgb24,
}

impl PixelFormat {
    /// Number of bytes (channels) per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 => 3,
        }
    }
}

/// A decoded video frame.
///
/// Pixels are row-major and tightly packed: row `y` starts at byte
/// `y * width * bytes_per_pixel`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Raw pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: PixelFormat,
}

impl Frame {
    /// Create an RGB frame.
    pub fn rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            format: PixelFormat::Rgb24,
        }
    }

    /// Create a grayscale frame.
    pub fn gray(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            format: PixelFormat::Gray8,
        }
    }

    /// Get the number of bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Number of bytes a frame of these dimensions must carry.
    pub fn expected_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * self.bytes_per_pixel()
    }

    /// True when the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Properties of the video stream reported by the prober.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Native frame rate, if the container declares a usable one
    pub fps: Option<f64>,
}

impl fmt::Display for VideoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fps {
            Some(fps) => write!(f, "{}x{} @ {:.2} fps", self.width, self.height, fps),
            None => write!(f, "{}x{} @ unknown fps", self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_bytes_per_pixel() {
        let rgb = Frame::rgb(vec![0; 6], 2, 1);
        assert_eq!(rgb.bytes_per_pixel(), 3);
        assert_eq!(rgb.expected_len(), 6);

        let gray = Frame::gray(vec![0; 2], 2, 1);
        assert_eq!(gray.bytes_per_pixel(), 1);
        assert_eq!(gray.expected_len(), 2);
    }

    #[test]
    fn test_frame_is_empty() {
        assert!(Frame::gray(Vec::new(), 0, 10).is_empty());
        assert!(Frame::gray(Vec::new(), 10, 0).is_empty());
        assert!(!Frame::gray(vec![0], 1, 1).is_empty());
    }

    #[test]
    fn test_video_info_display() {
        let info = VideoInfo {
            width: 640,
            height: 480,
            fps: Some(29.97),
        };
        assert_eq!(format!("{}", info), "640x480 @ 29.97 fps");

        let unknown = VideoInfo { fps: None, ..info };
        assert_eq!(format!("{}", unknown), "640x480 @ unknown fps");
    }
}
