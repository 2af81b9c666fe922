use crate::core::cursor_mapper::ActiveRegion;
use crate::models::hand::{LandmarkerConfig, ModelComplexity};
use crate::models::input::ScreenSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Gesture control configuration. Thresholds are fixed for a run; nothing here
/// is tuned at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Reference capture width the active region and click threshold assume
    pub capture_width: u32,
    /// Reference capture height
    pub capture_height: u32,
    /// Inset (pixels) of the active region on every side of the capture frame
    pub active_region_margin: u32,
    /// Smoothing divisor, must be > 1. Higher is smoother but lags more.
    pub smoothing_factor: f64,
    /// Index-to-middle tip distance (pixels) under which a click fires
    pub click_threshold: f64,
    /// Scale the click threshold by the actual frame diagonal
    pub normalize_click_threshold: bool,
    /// Hands requested from the detector; the control core handles exactly one
    pub max_hands: u32,
    /// Send `screen_width - x` to the OS, for a camera that is not mirrored
    pub mirror_x: bool,
    /// Screen size override; queried from the pointer backend when unset
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    /// Produce overlay primitives for the renderer
    pub draw_overlays: bool,
    /// Detector confidence thresholds (0.0-1.0)
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture_width: 640,
            capture_height: 480,
            active_region_margin: 100,
            smoothing_factor: 17.0,
            click_threshold: 45.0,
            normalize_click_threshold: false,
            max_hands: 1,
            mirror_x: false,
            screen_width: None,
            screen_height: None,
            draw_overlays: true,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

impl Config {
    /// Load configuration from `path`, creating it with defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.capture_width == 0 || self.capture_height == 0 {
            return Err(format!(
                "Invalid capture size: {}x{}. Both dimensions must be positive",
                self.capture_width, self.capture_height
            )
            .into());
        }

        // Active region must keep a positive area
        let inset = self.active_region_margin.saturating_mul(2);
        if inset >= self.capture_width || inset >= self.capture_height {
            return Err(format!(
                "Invalid active region margin: {}. Leaves no active region inside {}x{}",
                self.active_region_margin, self.capture_width, self.capture_height
            )
            .into());
        }

        if !self.smoothing_factor.is_finite() || self.smoothing_factor <= 1.0 {
            return Err(format!(
                "Invalid smoothing factor: {}. Must be greater than 1",
                self.smoothing_factor
            )
            .into());
        }

        if !self.click_threshold.is_finite() || self.click_threshold <= 0.0 {
            return Err(format!(
                "Invalid click threshold: {}. Must be positive",
                self.click_threshold
            )
            .into());
        }

        if self.max_hands != 1 {
            return Err(format!(
                "Invalid max hands: {}. Gesture control tracks exactly 1 hand",
                self.max_hands
            )
            .into());
        }

        if self.screen_width == Some(0) || self.screen_height == Some(0) {
            return Err("Screen size override must be positive".into());
        }

        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(format!(
                "Invalid detection confidence: {}. Must be between 0.0 and 1.0",
                self.min_detection_confidence
            )
            .into());
        }

        if !(0.0..=1.0).contains(&self.min_tracking_confidence) {
            return Err(format!(
                "Invalid tracking confidence: {}. Must be between 0.0 and 1.0",
                self.min_tracking_confidence
            )
            .into());
        }

        Ok(())
    }

    pub fn active_region(&self) -> ActiveRegion {
        ActiveRegion::inset(
            self.capture_width,
            self.capture_height,
            self.active_region_margin,
        )
    }

    /// Screen size from the override, when both dimensions are set
    pub fn screen_override(&self) -> Option<ScreenSize> {
        match (self.screen_width, self.screen_height) {
            (Some(width), Some(height)) => Some(ScreenSize::new(width, height)),
            _ => None,
        }
    }

    pub fn landmarker_config(&self) -> LandmarkerConfig {
        LandmarkerConfig {
            max_hands: self.max_hands,
            model_complexity: ModelComplexity::Full,
            min_detection_confidence: self.min_detection_confidence,
            min_tracking_confidence: self.min_tracking_confidence,
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| "Could not determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".gesture_cursor");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}
