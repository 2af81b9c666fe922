use crate::core::config::Config;
use crate::core::frame_analyzer::FrameAnalyzer;
use crate::core::gesture_controller::GestureController;
use crate::core::overlay::build_overlays;
use crate::models::control::{ControlResult, CycleOutcome};
use crate::models::input::PointerCommand;
use crate::platform::capture::FrameSource;
use crate::platform::display::FrameRenderer;
use crate::platform::input::PointerInjector;
use crate::platform::pose::HandLandmarker;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

// ==============================================================================
// Cancellation
// ==============================================================================

/// Cooperative stop flag, checked once per iteration boundary
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ==============================================================================
// Frame Rate
// ==============================================================================

#[derive(Debug, Default)]
pub struct FrameRateMeter {
    previous: Option<Instant>,
}

impl FrameRateMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames per second since the previous tick. `None` on the first tick and
    /// for zero-length intervals.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let previous = self.previous.replace(now)?;
        let elapsed = now.saturating_duration_since(previous).as_secs_f64();
        (elapsed > 0.0).then(|| 1.0 / elapsed)
    }
}

// ==============================================================================
// Control Loop
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopReport {
    pub session_id: Uuid,
    pub iterations: u64,
    pub frames_with_hand: u64,
    pub moves: u64,
    pub clicks: u64,
    /// Cycles abandoned because of an error
    pub skipped: u64,
    pub last_fps: Option<f64>,
}

impl LoopReport {
    fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            iterations: 0,
            frames_with_hand: 0,
            moves: 0,
            clicks: 0,
            skipped: 0,
            last_fps: None,
        }
    }
}

/// Capture, analyze, act, render. One frame at a time on the calling thread.
pub struct ControlLoop {
    source: Box<dyn FrameSource>,
    analyzer: FrameAnalyzer,
    controller: GestureController,
    pointer: Box<dyn PointerInjector>,
    renderer: Box<dyn FrameRenderer>,
    draw_overlays: bool,
    cancel: CancellationToken,
    fps: FrameRateMeter,
    report: LoopReport,
}

impl ControlLoop {
    /// Wire the collaborators together. The screen size comes from the config
    /// override when set, otherwise from the pointer backend. An invalid config
    /// fails with `ControlError::InvalidConfig`.
    pub fn new(
        config: &Config,
        source: Box<dyn FrameSource>,
        landmarker: Box<dyn HandLandmarker>,
        pointer: Box<dyn PointerInjector>,
        renderer: Box<dyn FrameRenderer>,
    ) -> ControlResult<Self> {
        let screen = match config.screen_override() {
            Some(screen) => screen,
            None => pointer.screen_size()?,
        };

        Ok(Self {
            source,
            analyzer: FrameAnalyzer::new(landmarker),
            controller: GestureController::from_config(config, screen)?,
            pointer,
            renderer,
            draw_overlays: config.draw_overlays,
            cancel: CancellationToken::new(),
            fps: FrameRateMeter::new(),
            report: LoopReport::new(Uuid::new_v4()),
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.report.session_id
    }

    /// Handle that stops the loop from another thread or a signal handler
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    pub fn report(&self) -> &LoopReport {
        &self.report
    }

    /// Run one full cycle. `Ok(None)` means the frame source has ended.
    ///
    /// Errors are local to this cycle; the cursor locus keeps its last good value.
    pub fn run_iteration(&mut self) -> ControlResult<Option<CycleOutcome>> {
        let frame = match self.source.next_frame()? {
            Some(frame) => frame,
            None => return Ok(None),
        };
        self.report.iterations += 1;

        let fps = self.fps.tick(Instant::now());
        if fps.is_some() {
            self.report.last_fps = fps;
        }

        let analysis = self.analyzer.analyze(&frame)?;
        let outcome = match &analysis.hand {
            Some(hand) => {
                self.report.frames_with_hand += 1;
                CycleOutcome::Gesture(self.controller.step(hand, self.pointer.as_mut())?)
            }
            None => CycleOutcome::NoHand,
        };

        match outcome.command() {
            Some(PointerCommand::Move { .. }) => self.report.moves += 1,
            Some(PointerCommand::Click) => self.report.clicks += 1,
            None => {}
        }

        let overlays = if self.draw_overlays {
            build_overlays(
                analysis.hand.as_ref(),
                Some(&outcome),
                self.controller.mapper().region(),
                fps,
            )
        } else {
            Vec::new()
        };
        let feedback = self.renderer.render(&frame, &overlays)?;
        if feedback.quit_requested {
            tracing::info!("quit requested by renderer");
            self.cancel.cancel();
        }

        Ok(Some(outcome))
    }

    /// Loop until cancelled or the frame source runs dry
    pub fn run(&mut self) -> LoopReport {
        let span = tracing::info_span!("control_loop", session = %self.report.session_id);
        let _enter = span.enter();

        tracing::info!(
            source = %self.source.describe(),
            detector = %self.analyzer.model_info(),
            pointer = %self.pointer.describe(),
            "control loop started"
        );

        while !self.cancel.is_cancelled() {
            match self.run_iteration() {
                Ok(Some(_)) => {}
                Ok(None) => {
                    tracing::info!("frame source ended");
                    break;
                }
                Err(e) => {
                    self.report.skipped += 1;
                    tracing::warn!(error = %e, "cycle skipped");
                }
            }
        }

        tracing::info!(
            iterations = self.report.iterations,
            moves = self.report.moves,
            clicks = self.report.clicks,
            skipped = self.report.skipped,
            "control loop stopped"
        );
        self.report.clone()
    }
}
