// Hand landmark detection platform integration
// Provides the detector bridge, its backends, and recorded replays

pub mod hand_landmarker;
pub mod replay;

pub use hand_landmarker::{DefaultHandLandmarker, DummyHandLandmarker, HandLandmarker};
pub use replay::ReplayHandLandmarker;

#[cfg(feature = "ml-pyo3")]
pub use hand_landmarker::pyo3_backend::PyO3HandLandmarker;
