// Detection plus geometry as a single step: one image in, one hand's landmarks,
// bounding box, and finger states out. Nothing is cached between calls.

use crate::core::geometry;
use crate::models::capture::CapturedFrame;
use crate::models::control::{ControlError, ControlResult};
use crate::models::hand::{BoundingBox, DetectionResult, FingerStates, LandmarkFrame};
use crate::platform::pose::HandLandmarker;

/// Geometry of the hand that drives the cursor this cycle
#[derive(Debug, Clone, PartialEq)]
pub struct HandAnalysis {
    pub landmarks: LandmarkFrame,
    pub bbox: BoundingBox,
    pub fingers: FingerStates,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl HandAnalysis {
    pub fn from_frame(landmarks: LandmarkFrame, frame_width: u32, frame_height: u32) -> ControlResult<Self> {
        let bbox = geometry::bounding_box(landmarks.landmarks())
            .ok_or(ControlError::MalformedLandmarkFrame { count: 0 })?;
        let fingers = geometry::finger_states(&landmarks);
        Ok(Self {
            landmarks,
            bbox,
            fingers,
            frame_width,
            frame_height,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    /// Hands the detector reported; only the first one is analyzed
    pub hands_reported: usize,
    pub hand: Option<HandAnalysis>,
    pub processing_time_ms: u64,
}

/// Analyze a detection result for an image of `width` x `height` pixels
pub fn analyze_detection(result: &DetectionResult, width: u32, height: u32) -> ControlResult<FrameAnalysis> {
    let hand = match result.primary_hand() {
        Some(pose) => {
            let landmarks = LandmarkFrame::from_hand(pose, width, height)?;
            Some(HandAnalysis::from_frame(landmarks, width, height)?)
        }
        None => None,
    };

    Ok(FrameAnalysis {
        hands_reported: result.hands.len(),
        hand,
        processing_time_ms: result.processing_time_ms,
    })
}

/// Owns the detector and threads each frame's result straight into geometry
pub struct FrameAnalyzer {
    landmarker: Box<dyn HandLandmarker>,
}

impl FrameAnalyzer {
    pub fn new(landmarker: Box<dyn HandLandmarker>) -> Self {
        Self { landmarker }
    }

    pub fn analyze(&mut self, frame: &CapturedFrame) -> ControlResult<FrameAnalysis> {
        let result = self.landmarker.detect(frame)?;
        if result.hands.len() > 1 {
            tracing::debug!(
                hands = result.hands.len(),
                "multiple hands reported, using the first"
            );
        }
        analyze_detection(&result, frame.width(), frame.height())
    }

    pub fn model_info(&self) -> String {
        self.landmarker.model_info()
    }
}
