// External collaborators of the control loop: camera frames, the hand
// detector, the OS pointer, and the preview window

pub mod capture;
pub mod display;
pub mod input;
pub mod pose;
