// Pointer injection backends
// The control core only needs absolute moves, a single left click, and the
// screen size. The OS backend is optional; the dry-run backend records commands.

use crate::models::input::{PointerCommand, PointerError, PointerResult, ScreenSize};

/// Pointer injection trait
/// Implement this for each OS backend
pub trait PointerInjector {
    /// Move the pointer to absolute screen coordinates
    fn move_to(&mut self, x: f64, y: f64) -> PointerResult<()>;

    /// Single left click at the current position
    fn click(&mut self) -> PointerResult<()>;

    /// Size of the screen moves are mapped onto
    fn screen_size(&self) -> PointerResult<ScreenSize>;

    /// Get backend info
    fn describe(&self) -> String;

    /// Dispatch a command to `move_to` or `click`
    fn send(&mut self, command: PointerCommand) -> PointerResult<()> {
        match command {
            PointerCommand::Move { x, y } => self.move_to(x, y),
            PointerCommand::Click => self.click(),
        }
    }
}

// ==============================================================================
// Dry Run (no OS access)
// ==============================================================================

/// Records commands instead of moving the real pointer
#[derive(Debug, Clone)]
pub struct DryRunPointer {
    screen: ScreenSize,
    commands: Vec<PointerCommand>,
}

impl DryRunPointer {
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            screen,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[PointerCommand] {
        &self.commands
    }
}

impl PointerInjector for DryRunPointer {
    fn move_to(&mut self, x: f64, y: f64) -> PointerResult<()> {
        tracing::debug!(x, y, "dry-run pointer move");
        self.commands.push(PointerCommand::Move { x, y });
        Ok(())
    }

    fn click(&mut self) -> PointerResult<()> {
        tracing::debug!("dry-run pointer click");
        self.commands.push(PointerCommand::Click);
        Ok(())
    }

    fn screen_size(&self) -> PointerResult<ScreenSize> {
        Ok(self.screen)
    }

    fn describe(&self) -> String {
        format!(
            "Dry-run pointer ({}x{}, no OS injection)",
            self.screen.width, self.screen.height
        )
    }
}

// ==============================================================================
// enigo Implementation (OS pointer)
// ==============================================================================

#[cfg(feature = "os-pointer")]
pub mod enigo_backend {
    use super::*;
    use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

    pub struct EnigoPointer {
        enigo: Enigo,
    }

    impl EnigoPointer {
        pub fn new() -> PointerResult<Self> {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| PointerError::InitFailed(format!("{:?}", e)))?;
            Ok(Self { enigo })
        }
    }

    impl PointerInjector for EnigoPointer {
        fn move_to(&mut self, x: f64, y: f64) -> PointerResult<()> {
            self.enigo
                .move_mouse(x.round() as i32, y.round() as i32, Coordinate::Abs)
                .map_err(|e| PointerError::CommandFailed(format!("move: {:?}", e)))
        }

        fn click(&mut self) -> PointerResult<()> {
            self.enigo
                .button(Button::Left, Direction::Click)
                .map_err(|e| PointerError::CommandFailed(format!("click: {:?}", e)))
        }

        fn screen_size(&self) -> PointerResult<ScreenSize> {
            let (width, height) = self
                .enigo
                .main_display()
                .map_err(|e| PointerError::ScreenUnavailable(format!("{:?}", e)))?;
            if width <= 0 || height <= 0 {
                return Err(PointerError::ScreenUnavailable(format!(
                    "display reported {}x{}",
                    width, height
                )));
            }
            Ok(ScreenSize::new(width as u32, height as u32))
        }

        fn describe(&self) -> String {
            "enigo OS pointer".to_string()
        }
    }
}

// ==============================================================================
// Default Backend Selection
// ==============================================================================

/// Open the OS pointer when the `os-pointer` feature is enabled
#[cfg(feature = "os-pointer")]
pub fn os_pointer() -> PointerResult<Box<dyn PointerInjector>> {
    Ok(Box::new(enigo_backend::EnigoPointer::new()?))
}

#[cfg(not(feature = "os-pointer"))]
pub fn os_pointer() -> PointerResult<Box<dyn PointerInjector>> {
    Err(PointerError::NotSupported)
}
