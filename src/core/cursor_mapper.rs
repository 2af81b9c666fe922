use crate::models::control::CursorLocus;
use crate::models::hand::PixelPoint;
use crate::models::input::ScreenSize;
use serde::{Deserialize, Serialize};

/// Sub-rectangle of the camera image that maps onto the whole screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveRegion {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ActiveRegion {
    /// The capture frame inset by `margin` pixels on every side
    pub fn inset(capture_width: u32, capture_height: u32, margin: u32) -> Self {
        Self {
            left: margin as f64,
            top: margin as f64,
            right: capture_width as f64 - margin as f64,
            bottom: capture_height as f64 - margin as f64,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Linear map from the active region to `[0, width] x [0, height]` of the screen.
/// Points outside the region extrapolate past the screen edges.
pub fn interpolate(point: PixelPoint, region: &ActiveRegion, screen: ScreenSize) -> CursorLocus {
    let tx = (point.x as f64 - region.left) / region.width();
    let ty = (point.y as f64 - region.top) / region.height();
    CursorLocus::new(tx * screen.width as f64, ty * screen.height as f64)
}

/// Single-pole low-pass step, per axis: `prev + (target - prev) / factor`
pub fn smooth(previous: CursorLocus, target: CursorLocus, smoothing_factor: f64) -> CursorLocus {
    CursorLocus::new(
        previous.x + (target.x - previous.x) / smoothing_factor,
        previous.y + (target.y - previous.y) / smoothing_factor,
    )
}

pub fn map_and_smooth(
    point: PixelPoint,
    region: &ActiveRegion,
    screen: ScreenSize,
    previous: CursorLocus,
    smoothing_factor: f64,
) -> CursorLocus {
    smooth(previous, interpolate(point, region, screen), smoothing_factor)
}

// ==============================================================================
// Cursor Mapper
// ==============================================================================

/// Owns the only state that lives across cycles: the last committed cursor locus.
///
/// A move is computed with [`CursorMapper::propose`] and only becomes the new
/// locus once [`CursorMapper::commit`] is called, so a failed injection leaves
/// the locus at its last good value.
#[derive(Debug, Clone)]
pub struct CursorMapper {
    region: ActiveRegion,
    screen: ScreenSize,
    smoothing_factor: f64,
    locus: CursorLocus,
}

impl CursorMapper {
    pub fn new(region: ActiveRegion, screen: ScreenSize, smoothing_factor: f64) -> Self {
        Self {
            region,
            screen,
            smoothing_factor,
            locus: CursorLocus::default(),
        }
    }

    pub fn locus(&self) -> CursorLocus {
        self.locus
    }

    pub fn region(&self) -> &ActiveRegion {
        &self.region
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn propose(&self, point: PixelPoint) -> CursorLocus {
        map_and_smooth(
            point,
            &self.region,
            self.screen,
            self.locus,
            self.smoothing_factor,
        )
    }

    pub fn commit(&mut self, locus: CursorLocus) {
        self.locus = locus;
    }

    /// Back to (0, 0), as at loop start
    pub fn reset(&mut self) {
        self.locus = CursorLocus::default();
    }
}
