pub mod core;
pub mod models;
pub mod platform;

pub use core::config::Config;
pub use core::control_loop::{CancellationToken, ControlLoop, LoopReport};
pub use models::control::{ControlError, ControlResult, CycleOutcome, Mode};
