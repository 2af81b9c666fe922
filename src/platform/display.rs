// Preview rendering
// Drawing and window display live outside this crate; a renderer receives the
// frame plus overlay primitives and may report that the user asked to quit.

use crate::core::overlay::Overlay;
use crate::models::capture::CapturedFrame;
use crate::models::control::ControlResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderFeedback {
    /// The user asked to stop (e.g. pressed `q` in the preview window)
    pub quit_requested: bool,
}

pub trait FrameRenderer {
    fn render(&mut self, frame: &CapturedFrame, overlays: &[Overlay]) -> ControlResult<RenderFeedback>;
}

/// Draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl FrameRenderer for NullRenderer {
    fn render(&mut self, _frame: &CapturedFrame, _overlays: &[Overlay]) -> ControlResult<RenderFeedback> {
        Ok(RenderFeedback::default())
    }
}

/// Logs each overlay at trace level instead of drawing
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, frame: &CapturedFrame, overlays: &[Overlay]) -> ControlResult<RenderFeedback> {
        self.frames += 1;
        tracing::trace!(
            frame = self.frames,
            timestamp = frame.timestamp,
            overlays = overlays.len(),
            "render"
        );
        for overlay in overlays {
            if let Overlay::Text { text, .. } = overlay {
                tracing::trace!(%text, "overlay text");
            }
        }
        Ok(RenderFeedback::default())
    }
}
