// Data models for the gesture control loop: modes, cursor state, per-cycle outcomes

use crate::models::capture::CaptureError;
use crate::models::hand::{PoseError, Segment};
use crate::models::input::{PointerCommand, PointerError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// Mode
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Idle,
    Move,
    Click,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Move => "move",
            Mode::Click => "click",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==============================================================================
// Cursor Locus
// ==============================================================================

/// Smoothed cursor position in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorLocus {
    pub x: f64,
    pub y: f64,
}

impl CursorLocus {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ==============================================================================
// Cycle Outcomes
// ==============================================================================

/// Tip-to-tip measurement taken in click mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickCheck {
    pub segment: Segment,
    pub threshold: f64,
    pub fired: bool,
}

/// What the state machine decided for one hand in one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDecision {
    pub mode: Mode,
    pub command: Option<PointerCommand>,
    pub click: Option<ClickCheck>,
}

impl GestureDecision {
    pub fn idle() -> Self {
        Self {
            mode: Mode::Idle,
            command: None,
            click: None,
        }
    }
}

/// Result of one control-loop iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// No hand in view; nothing emitted
    NoHand,
    Gesture(GestureDecision),
}

impl CycleOutcome {
    pub fn mode(&self) -> Mode {
        match self {
            CycleOutcome::NoHand => Mode::Idle,
            CycleOutcome::Gesture(decision) => decision.mode,
        }
    }

    pub fn command(&self) -> Option<PointerCommand> {
        match self {
            CycleOutcome::NoHand => None,
            CycleOutcome::Gesture(decision) => decision.command,
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Malformed landmark frame: expected 21 ordered landmarks, got {count}")]
    MalformedLandmarkFrame { count: usize },

    #[error("Invalid gesture input: expected 5 finger states, got {len}")]
    InvalidGestureInput { len: usize },

    #[error("Landmark id out of range: {0}")]
    LandmarkOutOfRange(usize),

    #[error("Landmark {id} lies far outside the frame or is not a number")]
    LandmarkOutOfFrame { id: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pointer injection failed: {0}")]
    InjectionFailure(#[from] PointerError),

    #[error("Detection failed: {0}")]
    Detection(#[from] PoseError),

    #[error("Frame capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Rendering failed: {0}")]
    Render(String),
}

pub type ControlResult<T> = Result<T, ControlError>;
