// Data models for pointer output

use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A single command for the OS pointer. At most one is emitted per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerCommand {
    /// Absolute move in screen coordinates
    Move { x: f64, y: f64 },
    /// Single left click at the current position
    Click,
}

impl PointerCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointerCommand::Move { .. } => "move",
            PointerCommand::Click => "click",
        }
    }
}

impl fmt::Display for PointerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerCommand::Move { x, y } => write!(f, "move({:.1}, {:.1})", x, y),
            PointerCommand::Click => f.write_str("click"),
        }
    }
}

/// Error types for pointer injection
#[derive(Debug, thiserror::Error)]
pub enum PointerError {
    #[error("Pointer backend initialization failed: {0}")]
    InitFailed(String),

    #[error("Pointer command failed: {0}")]
    CommandFailed(String),

    #[error("Screen size unavailable: {0}")]
    ScreenUnavailable(String),

    #[error("Not supported on this platform")]
    NotSupported,
}

pub type PointerResult<T> = Result<T, PointerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_command_display() {
        assert_eq!(
            PointerCommand::Move { x: 10.0, y: 2.5 }.to_string(),
            "move(10.0, 2.5)"
        );
        assert_eq!(PointerCommand::Click.to_string(), "click");
        assert_eq!(PointerCommand::Click.as_str(), "click");
    }

    #[test]
    fn test_pointer_command_serialization() {
        let json = serde_json::to_string(&PointerCommand::Move { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(json, r#"{"type":"move","x":1.0,"y":2.0}"#);
        let back: PointerCommand = serde_json::from_str(r#"{"type":"click"}"#).unwrap();
        assert_eq!(back, PointerCommand::Click);
    }
}
