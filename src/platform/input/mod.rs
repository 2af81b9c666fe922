// Pointer output - moves and clicks sent to the OS

pub mod pointer;

pub use pointer::{os_pointer, DryRunPointer, PointerInjector};

#[cfg(feature = "os-pointer")]
pub use pointer::enigo_backend::EnigoPointer;
