// Data structures for camera frames handed to the hand detector

use image::RgbImage;

/// One captured camera image
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub timestamp: i64,
    pub image: RgbImage,
}

impl CapturedFrame {
    pub fn new(image: RgbImage) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Packed RGB8 bytes, row major
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Error types for frame acquisition
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Not supported on this platform")]
    NotSupported,
}

pub type CaptureResult<T> = Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_frame_dimensions() {
        let frame = CapturedFrame::new(RgbImage::new(64, 48));
        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 48);
        assert_eq!(frame.as_bytes().len(), 64 * 48 * 3);
        assert!(frame.timestamp > 0);
    }
}
