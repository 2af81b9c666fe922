pub mod config;

// Per-frame analysis
pub mod geometry;
pub mod frame_analyzer;

// Cursor control
pub mod cursor_mapper;
pub mod gesture_controller;
pub mod control_loop;

// Preview annotations
pub mod overlay;
