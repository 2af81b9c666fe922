// Data models for hand landmarks, camera frames, pointer output, and control state

pub mod capture;
pub mod control;
pub mod hand;
pub mod input;
