// Data models for hand tracking: detector output, pixel-space landmark frames,
// and the per-frame geometry derived from them

use crate::models::control::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of landmarks the hand detector reports per hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Normalized coordinates outside this band are treated as detector garbage
const NORMALIZED_MIN: f32 = -1.0;
const NORMALIZED_MAX: f32 = 2.0;

// ==============================================================================
// Detector Output (normalized coordinates)
// ==============================================================================

/// A 3D keypoint as reported by the detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint3D {
    pub x: f32, // Normalized [0, 1] for image coordinates
    pub y: f32, // Normalized [0, 1] for image coordinates
    #[serde(default)]
    pub z: f32, // Depth relative to the wrist, unused by the control core
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

impl Keypoint3D {
    pub fn new(x: f32, y: f32, z: f32, confidence: f32) -> Self {
        Self {
            x,
            y,
            z,
            confidence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

/// One detected hand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandPose {
    pub handedness: Handedness,
    pub landmarks: Vec<Keypoint3D>, // 21 hand landmarks
    #[serde(default)]
    pub confidence: f32,
}

/// Everything the detector reported for one image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(default)]
    pub hands: Vec<HandPose>,
    #[serde(default)]
    pub processing_time_ms: u64,
}

impl DetectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The hand that drives the cursor: deterministically the first one reported
    pub fn primary_hand(&self) -> Option<&HandPose> {
        self.hands.first()
    }
}

/// MediaPipe hand landmark indices (21 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

// ==============================================================================
// Landmark Frame (pixel coordinates)
// ==============================================================================

/// A point in pixel coordinates of the source frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One landmark of the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: u8,
    pub x: i32,
    pub y: i32,
}

impl Landmark {
    pub fn new(id: u8, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    pub fn point(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }
}

/// Exactly 21 landmarks of a single hand, ids 0..=20 in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkFrame {
    landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    /// Build a frame, rejecting anything that is not the full 21-point topology
    pub fn new(landmarks: Vec<Landmark>) -> ControlResult<Self> {
        if landmarks.len() != HAND_LANDMARK_COUNT {
            return Err(ControlError::MalformedLandmarkFrame {
                count: landmarks.len(),
            });
        }
        if landmarks
            .iter()
            .enumerate()
            .any(|(i, lm)| lm.id as usize != i)
        {
            return Err(ControlError::MalformedLandmarkFrame {
                count: landmarks.len(),
            });
        }
        Ok(Self { landmarks })
    }

    /// Build a frame from pixel positions; ids are assigned by position
    pub fn from_points(points: &[(i32, i32)]) -> ControlResult<Self> {
        let landmarks = points
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Landmark::new(id as u8, x, y))
            .collect();
        Self::new(landmarks)
    }

    /// Convert a detected hand from normalized to pixel coordinates.
    /// Coordinates are truncated toward zero, matching `int(x * width)`.
    ///
    /// Keypoints that are not finite or lie far outside the image (beyond one
    /// frame width or height past either edge) are rejected.
    pub fn from_hand(hand: &HandPose, width: u32, height: u32) -> ControlResult<Self> {
        let in_range = |v: f32| (NORMALIZED_MIN..=NORMALIZED_MAX).contains(&v);
        if let Some(id) = hand
            .landmarks
            .iter()
            .position(|kp| !in_range(kp.x) || !in_range(kp.y))
        {
            return Err(ControlError::LandmarkOutOfFrame { id });
        }

        let landmarks = hand
            .landmarks
            .iter()
            .enumerate()
            .map(|(id, kp)| {
                Landmark::new(
                    id as u8,
                    (kp.x * width as f32) as i32,
                    (kp.y * height as f32) as i32,
                )
            })
            .collect();
        Self::new(landmarks)
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn get(&self, landmark: HandLandmark) -> &Landmark {
        &self.landmarks[landmark.index()]
    }

    pub fn by_id(&self, id: usize) -> Option<&Landmark> {
        self.landmarks.get(id)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

// ==============================================================================
// Derived Geometry
// ==============================================================================

/// Min/max extent of all landmarks in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// Grow the box on every side; only used for drawing
    pub fn expanded(&self, margin: i32) -> Self {
        Self {
            x_min: self.x_min.saturating_sub(margin),
            y_min: self.y_min.saturating_sub(margin),
            x_max: self.x_max.saturating_add(margin),
            y_max: self.y_max.saturating_add(margin),
        }
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }
}

/// Distance between two landmarks plus the segment used to draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub length: f64,
    pub start: PixelPoint,
    pub end: PixelPoint,
    pub midpoint: PixelPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn tip(self) -> HandLandmark {
        match self {
            Finger::Thumb => HandLandmark::ThumbTip,
            Finger::Index => HandLandmark::IndexFingerTip,
            Finger::Middle => HandLandmark::MiddleFingerTip,
            Finger::Ring => HandLandmark::RingFingerTip,
            Finger::Pinky => HandLandmark::PinkyTip,
        }
    }

    /// Joint the tip is compared against: IP for the thumb, PIP for the rest
    pub fn reference_joint(self) -> HandLandmark {
        match self {
            Finger::Thumb => HandLandmark::ThumbIp,
            Finger::Index => HandLandmark::IndexFingerPip,
            Finger::Middle => HandLandmark::MiddleFingerPip,
            Finger::Ring => HandLandmark::RingFingerPip,
            Finger::Pinky => HandLandmark::PinkyPip,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Extended/retracted flags ordered thumb, index, middle, ring, pinky
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FingerStates([bool; 5]);

impl FingerStates {
    pub fn new(flags: [bool; 5]) -> Self {
        Self(flags)
    }

    /// Accept a vector from an untyped source; anything but 5 entries is rejected
    pub fn from_slice(flags: &[bool]) -> ControlResult<Self> {
        let flags: [bool; 5] = flags
            .try_into()
            .map_err(|_| ControlError::InvalidGestureInput { len: flags.len() })?;
        Ok(Self(flags))
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger.slot()]
    }

    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }

    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }
}

impl fmt::Display for FingerStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for up in self.0 {
            f.write_str(if up { "1" } else { "0" })?;
        }
        Ok(())
    }
}

// ==============================================================================
// Detector Configuration
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkerConfig {
    pub max_hands: u32,
    pub model_complexity: ModelComplexity,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelComplexity {
    Lite = 0,
    Full = 1,
}

impl Default for LandmarkerConfig {
    fn default() -> Self {
        Self {
            max_hands: 1,
            model_complexity: ModelComplexity::Full,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Hand landmarker not initialized")]
    NotInitialized,

    #[error("Model loading failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Replay failed: {0}")]
    ReplayFailed(String),

    #[error("Not supported on this platform")]
    NotSupported,
}

pub type PoseResult<T> = Result<T, PoseError>;
