// Hand landmark detection bridge
// Abstracts over the detector that turns a camera image into 21-point hands.
// Can be implemented using PyO3 (Python MediaPipe) or by replaying recordings.

use crate::models::capture::CapturedFrame;
use crate::models::hand::{DetectionResult, LandmarkerConfig, PoseError, PoseResult};

/// Hand landmarker trait
/// Implement this for each detector backend
pub trait HandLandmarker {
    /// Run detection on one frame. Coordinates in the result are normalized.
    fn detect(&mut self, frame: &CapturedFrame) -> PoseResult<DetectionResult>;

    /// Check if the model is loaded
    fn is_initialized(&self) -> bool;

    /// Get model info
    fn model_info(&self) -> String;
}

// ==============================================================================
// PyO3 Implementation (Python MediaPipe)
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub mod pyo3_backend {
    use super::*;
    use pyo3::prelude::*;
    use pyo3::types::{PyBytes, PyDict, PyModule};

    /// Calls `hand_inference.detect_hands(...)`, which returns a JSON document
    /// shaped like [`DetectionResult`]
    pub struct PyO3HandLandmarker {
        inference_module: Py<PyModule>,
        config: LandmarkerConfig,
    }

    impl PyO3HandLandmarker {
        pub fn new(config: &LandmarkerConfig) -> PoseResult<Self> {
            let python_dir = std::env::var("GESTURE_CURSOR_PYTHON_DIR")
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|_| std::env::current_dir().unwrap_or_default().join("python"));

            let inference_module = Python::with_gil(|py| -> PyResult<Py<PyModule>> {
                let sys = py.import_bound("sys")?;
                sys.getattr("path")?
                    .call_method1("insert", (0, python_dir.to_string_lossy().into_owned()))?;
                Ok(py.import_bound("hand_inference")?.unbind())
            })
            .map_err(|e| {
                PoseError::ModelLoadFailed(format!(
                    "Failed to import hand_inference from {}: {}. Make sure mediapipe is installed",
                    python_dir.display(),
                    e
                ))
            })?;

            tracing::info!(
                max_hands = config.max_hands,
                min_detection_confidence = config.min_detection_confidence,
                "PyO3 hand landmarker initialized"
            );

            Ok(Self {
                inference_module,
                config: config.clone(),
            })
        }
    }

    impl HandLandmarker for PyO3HandLandmarker {
        fn detect(&mut self, frame: &CapturedFrame) -> PoseResult<DetectionResult> {
            let start_time = std::time::Instant::now();

            let json_str = Python::with_gil(|py| -> PyResult<String> {
                let module = self.inference_module.bind(py);
                let kwargs = PyDict::new_bound(py);
                kwargs.set_item("image_bytes", PyBytes::new_bound(py, frame.as_bytes()))?;
                kwargs.set_item("width", frame.width())?;
                kwargs.set_item("height", frame.height())?;
                kwargs.set_item("max_hands", self.config.max_hands)?;
                kwargs.set_item("model_complexity", self.config.model_complexity as u8)?;
                kwargs.set_item(
                    "min_detection_confidence",
                    self.config.min_detection_confidence,
                )?;
                kwargs.set_item(
                    "min_tracking_confidence",
                    self.config.min_tracking_confidence,
                )?;

                module
                    .getattr("detect_hands")?
                    .call((), Some(&kwargs))?
                    .extract()
            })
            .map_err(|e| PoseError::InferenceFailed(format!("MediaPipe inference failed: {}", e)))?;

            let mut result: DetectionResult = serde_json::from_str(&json_str)
                .map_err(|e| PoseError::InferenceFailed(format!("Failed to parse JSON: {}", e)))?;
            result.processing_time_ms = start_time.elapsed().as_millis() as u64;

            Ok(result)
        }

        fn is_initialized(&self) -> bool {
            true
        }

        fn model_info(&self) -> String {
            format!(
                "PyO3 MediaPipe Hands (Python backend) - max hands: {}",
                self.config.max_hands
            )
        }
    }
}

// ==============================================================================
// Dummy Implementation (for compilation without features)
// ==============================================================================

/// Never reports a hand
pub struct DummyHandLandmarker {
    config: LandmarkerConfig,
}

impl DummyHandLandmarker {
    pub fn new(config: &LandmarkerConfig) -> PoseResult<Self> {
        tracing::warn!("Using dummy hand landmarker (no inference); enable 'ml-pyo3' for MediaPipe");
        Ok(Self {
            config: config.clone(),
        })
    }
}

impl HandLandmarker for DummyHandLandmarker {
    fn detect(&mut self, _frame: &CapturedFrame) -> PoseResult<DetectionResult> {
        Ok(DetectionResult::empty())
    }

    fn is_initialized(&self) -> bool {
        false
    }

    fn model_info(&self) -> String {
        format!(
            "Dummy hand landmarker (no ML inference, max hands: {}) - enable 'ml-pyo3' feature",
            self.config.max_hands
        )
    }
}

// ==============================================================================
// Default Backend Selection
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub type DefaultHandLandmarker = pyo3_backend::PyO3HandLandmarker;

#[cfg(not(feature = "ml-pyo3"))]
pub type DefaultHandLandmarker = DummyHandLandmarker;
