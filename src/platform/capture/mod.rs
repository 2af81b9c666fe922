// Frame acquisition
// Real camera capture lives outside this crate; it plugs in through `FrameSource`.

use crate::models::capture::{CaptureResult, CapturedFrame};
use image::RgbImage;

/// Frame source trait
pub trait FrameSource {
    /// Next frame, or `None` once the stream has ended
    fn next_frame(&mut self) -> CaptureResult<Option<CapturedFrame>>;

    fn describe(&self) -> String;
}

/// Produces black frames of a fixed size, optionally a limited number of them.
/// Pairs with a replayed detector that ignores pixels.
pub struct BlankFrameSource {
    width: u32,
    height: u32,
    remaining: Option<u64>,
}

impl BlankFrameSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            remaining: None,
        }
    }

    pub fn with_limit(width: u32, height: u32, frames: u64) -> Self {
        Self {
            width,
            height,
            remaining: Some(frames),
        }
    }
}

impl FrameSource for BlankFrameSource {
    fn next_frame(&mut self) -> CaptureResult<Option<CapturedFrame>> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Ok(None);
            }
            *remaining -= 1;
        }
        Ok(Some(CapturedFrame::new(RgbImage::new(self.width, self.height))))
    }

    fn describe(&self) -> String {
        match self.remaining {
            Some(n) => format!("Blank {}x{} frames ({} left)", self.width, self.height, n),
            None => format!("Blank {}x{} frames (unbounded)", self.width, self.height),
        }
    }
}
