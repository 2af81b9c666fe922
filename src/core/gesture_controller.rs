// Gesture state machine: picks Idle / Move / Click from the finger states of the
// current frame and emits at most one pointer command. The mode is recomputed
// every cycle with no memory of the previous one.

use crate::core::config::Config;
use crate::core::cursor_mapper::CursorMapper;
use crate::core::frame_analyzer::HandAnalysis;
use crate::core::geometry;
use crate::models::control::{ClickCheck, ControlError, ControlResult, GestureDecision, Mode};
use crate::models::hand::{Finger, FingerStates, HandLandmark};
use crate::models::input::{PointerCommand, ScreenSize};
use crate::platform::input::PointerInjector;

/// First matching rule wins: index up with middle down moves, index and
/// middle up clicks, anything else is idle
pub fn select_mode(fingers: &FingerStates) -> Mode {
    let index = fingers.is_extended(Finger::Index);
    let middle = fingers.is_extended(Finger::Middle);

    if index && !middle {
        Mode::Move
    } else if index && middle {
        Mode::Click
    } else {
        Mode::Idle
    }
}

/// Mode for an untyped finger vector; anything but 5 flags is rejected
pub fn select_mode_from_flags(flags: &[bool]) -> ControlResult<Mode> {
    Ok(select_mode(&FingerStates::from_slice(flags)?))
}

/// Click distance threshold, optionally rescaled to the actual frame size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickThreshold {
    pub pixels: f64,
    /// Capture size `pixels` was chosen for; set to rescale by frame diagonal
    pub reference: Option<(u32, u32)>,
}

impl ClickThreshold {
    pub fn fixed(pixels: f64) -> Self {
        Self {
            pixels,
            reference: None,
        }
    }

    pub fn for_frame(&self, width: u32, height: u32) -> f64 {
        match self.reference {
            Some((ref_w, ref_h)) => {
                let reference = (ref_w as f64).hypot(ref_h as f64);
                let actual = (width as f64).hypot(height as f64);
                self.pixels * actual / reference
            }
            None => self.pixels,
        }
    }
}

pub struct GestureController {
    mapper: CursorMapper,
    click_threshold: ClickThreshold,
    mirror_x: bool,
}

impl GestureController {
    pub fn new(mapper: CursorMapper, click_threshold: ClickThreshold, mirror_x: bool) -> Self {
        Self {
            mapper,
            click_threshold,
            mirror_x,
        }
    }

    /// Build from a configuration, rejecting values that would produce
    /// non-finite moves (e.g. a smoothing factor of 0)
    pub fn from_config(config: &Config, screen: ScreenSize) -> ControlResult<Self> {
        config
            .validate()
            .map_err(|e| ControlError::InvalidConfig(e.to_string()))?;

        let mapper = CursorMapper::new(config.active_region(), screen, config.smoothing_factor);
        let click_threshold = ClickThreshold {
            pixels: config.click_threshold,
            reference: config
                .normalize_click_threshold
                .then_some((config.capture_width, config.capture_height)),
        };
        Ok(Self::new(mapper, click_threshold, config.mirror_x))
    }

    pub fn mapper(&self) -> &CursorMapper {
        &self.mapper
    }

    /// Run one cycle for the analyzed hand.
    ///
    /// A failed injection is returned as an error and leaves the cursor locus
    /// where it was.
    pub fn step(
        &mut self,
        hand: &HandAnalysis,
        pointer: &mut dyn PointerInjector,
    ) -> ControlResult<GestureDecision> {
        let mode = select_mode(&hand.fingers);
        tracing::debug!(fingers = %hand.fingers, %mode, "gesture");

        match mode {
            Mode::Move => {
                let tip = hand.landmarks.get(HandLandmark::IndexFingerTip).point();
                let next = self.mapper.propose(tip);
                let x = if self.mirror_x {
                    self.mapper.screen().width as f64 - next.x
                } else {
                    next.x
                };
                let command = PointerCommand::Move { x, y: next.y };

                pointer.send(command)?;
                self.mapper.commit(next);
                tracing::trace!(%command, "pointer moved");

                Ok(GestureDecision {
                    mode,
                    command: Some(command),
                    click: None,
                })
            }
            Mode::Click => {
                let segment = geometry::distance(
                    &hand.landmarks,
                    HandLandmark::IndexFingerTip.index(),
                    HandLandmark::MiddleFingerTip.index(),
                )?;
                let threshold = self
                    .click_threshold
                    .for_frame(hand.frame_width, hand.frame_height);
                let fired = segment.length < threshold;

                let command = if fired {
                    pointer.send(PointerCommand::Click)?;
                    tracing::debug!(distance = segment.length, threshold, "click fired");
                    Some(PointerCommand::Click)
                } else {
                    None
                };

                Ok(GestureDecision {
                    mode,
                    command,
                    click: Some(ClickCheck {
                        segment,
                        threshold,
                        fired,
                    }),
                })
            }
            Mode::Idle => Ok(GestureDecision::idle()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor_mapper::ActiveRegion;
    use crate::models::control::CursorLocus;
    use crate::models::hand::{LandmarkFrame, PixelPoint, HAND_LANDMARK_COUNT};
    use crate::models::input::{PointerError, PointerResult};
    use crate::platform::input::DryRunPointer;
    use proptest::prelude::*;

    struct FailingPointer;

    impl PointerInjector for FailingPointer {
        fn move_to(&mut self, _x: f64, _y: f64) -> PointerResult<()> {
            Err(PointerError::CommandFailed("display gone".to_string()))
        }

        fn click(&mut self) -> PointerResult<()> {
            Err(PointerError::CommandFailed("display gone".to_string()))
        }

        fn screen_size(&self) -> PointerResult<ScreenSize> {
            Ok(ScreenSize::new(1920, 1080))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    /// Hand with the index tip at `index_tip` and the middle tip at `middle_tip`;
    /// PIP joints sit at y = 300, every other point at (300, 350)
    fn hand(index_tip: (i32, i32), middle_tip: (i32, i32)) -> HandAnalysis {
        let mut points = vec![(300, 350); HAND_LANDMARK_COUNT];
        points[HandLandmark::IndexFingerPip.index()] = (index_tip.0, 300);
        points[HandLandmark::MiddleFingerPip.index()] = (middle_tip.0, 300);
        points[HandLandmark::IndexFingerTip.index()] = index_tip;
        points[HandLandmark::MiddleFingerTip.index()] = middle_tip;
        HandAnalysis::from_frame(LandmarkFrame::from_points(&points).unwrap(), 640, 480).unwrap()
    }

    fn controller() -> GestureController {
        let mapper = CursorMapper::new(
            ActiveRegion::inset(640, 480, 100),
            ScreenSize::new(1920, 1080),
            17.0,
        );
        GestureController::new(mapper, ClickThreshold::fixed(45.0), false)
    }

    #[test]
    fn test_mode_selection() {
        let modes = [
            ([false, true, false, false, false], Mode::Move),
            ([false, true, true, false, false], Mode::Click),
            ([false, false, false, false, false], Mode::Idle),
            ([true, false, true, true, true], Mode::Idle),
            ([true, true, false, true, true], Mode::Move),
        ];
        for (flags, expected) in modes {
            assert_eq!(select_mode(&FingerStates::new(flags)), expected);
        }
    }

    #[test]
    fn test_malformed_finger_vector() {
        assert!(matches!(
            select_mode_from_flags(&[false, true, false]),
            Err(ControlError::InvalidGestureInput { len: 3 })
        ));
        assert_eq!(
            select_mode_from_flags(&[false, true, true, false, false]).unwrap(),
            Mode::Click
        );
    }

    #[test]
    fn test_move_emits_smoothed_command_and_commits() {
        let mut controller = controller();
        let mut pointer = DryRunPointer::new(ScreenSize::new(1920, 1080));

        // (320 - 100) / 440 * 1920 = 960, (200 - 100) / 280 * 1080 = 385.71
        let decision = controller.step(&hand((320, 200), (330, 350)), &mut pointer).unwrap();
        assert_eq!(decision.mode, Mode::Move);

        let expected = CursorLocus::new(960.0 / 17.0, (100.0 / 280.0 * 1080.0) / 17.0);
        match decision.command {
            Some(PointerCommand::Move { x, y }) => {
                assert!((x - expected.x).abs() < 1e-9);
                assert!((y - expected.y).abs() < 1e-9);
            }
            other => panic!("expected a move, got {:?}", other),
        }
        assert_eq!(pointer.commands().len(), 1);
        assert!((controller.mapper().locus().x - expected.x).abs() < 1e-9);
    }

    #[test]
    fn test_mirror_applies_to_command_only() {
        let mapper = CursorMapper::new(
            ActiveRegion::inset(640, 480, 100),
            ScreenSize::new(1920, 1080),
            17.0,
        );
        let mut controller = GestureController::new(mapper, ClickThreshold::fixed(45.0), true);
        let mut pointer = DryRunPointer::new(ScreenSize::new(1920, 1080));

        let decision = controller.step(&hand((320, 200), (330, 350)), &mut pointer).unwrap();
        let locus = controller.mapper().locus();
        match decision.command {
            Some(PointerCommand::Move { x, .. }) => assert!((x - (1920.0 - locus.x)).abs() < 1e-9),
            other => panic!("expected a move, got {:?}", other),
        }
        assert!((locus.x - 960.0 / 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_click_fires_below_threshold() {
        let mut controller = controller();
        let mut pointer = DryRunPointer::new(ScreenSize::new(1920, 1080));

        let decision = controller.step(&hand((300, 200), (320, 215)), &mut pointer).unwrap();
        assert_eq!(decision.mode, Mode::Click);
        assert_eq!(decision.command, Some(PointerCommand::Click));
        let click = decision.click.unwrap();
        assert_eq!(click.segment.length, 25.0);
        assert_eq!(click.segment.midpoint, PixelPoint::new(310, 207));
        assert!(click.fired);
        assert_eq!(pointer.commands(), &[PointerCommand::Click]);
        assert_eq!(controller.mapper().locus(), CursorLocus::default());
    }

    #[test]
    fn test_click_at_threshold_does_not_fire() {
        let mut controller = controller();
        let mut pointer = DryRunPointer::new(ScreenSize::new(1920, 1080));

        // 27-36-45 triangle: exactly the threshold
        let decision = controller.step(&hand((300, 200), (327, 236)), &mut pointer).unwrap();
        let click = decision.click.unwrap();
        assert_eq!(click.segment.length, 45.0);
        assert!(!click.fired);
        assert!(decision.command.is_none());
        assert!(pointer.commands().is_empty());
    }

    #[test]
    fn test_idle_emits_nothing() {
        let mut controller = controller();
        let mut pointer = DryRunPointer::new(ScreenSize::new(1920, 1080));

        let decision = controller.step(&hand((300, 320), (330, 320)), &mut pointer).unwrap();
        assert_eq!(decision, GestureDecision::idle());
        assert!(pointer.commands().is_empty());
    }

    #[test]
    fn test_failed_move_keeps_locus() {
        let mut controller = controller();
        let result = controller.step(&hand((320, 200), (330, 350)), &mut FailingPointer);
        assert!(matches!(result, Err(ControlError::InjectionFailure(_))));
        assert_eq!(controller.mapper().locus(), CursorLocus::default());
    }

    #[test]
    fn test_click_threshold_normalization() {
        let threshold = ClickThreshold {
            pixels: 45.0,
            reference: Some((640, 480)),
        };
        assert!((threshold.for_frame(640, 480) - 45.0).abs() < 1e-9);
        assert!((threshold.for_frame(1280, 960) - 90.0).abs() < 1e-9);
        assert_eq!(ClickThreshold::fixed(45.0).for_frame(1280, 960), 45.0);
    }

    #[test]
    fn test_from_config_normalizes_only_when_enabled() {
        let mut config = Config::default();
        let controller = GestureController::from_config(&config, ScreenSize::new(1920, 1080)).unwrap();
        assert_eq!(controller.click_threshold.reference, None);

        config.normalize_click_threshold = true;
        let controller = GestureController::from_config(&config, ScreenSize::new(1920, 1080)).unwrap();
        assert_eq!(controller.click_threshold.reference, Some((640, 480)));
    }

    #[test]
    fn test_from_config_rejects_degenerate_smoothing() {
        for factor in [0.0, 1.0, f64::NAN] {
            let config = Config {
                smoothing_factor: factor,
                ..Config::default()
            };
            assert!(matches!(
                GestureController::from_config(&config, ScreenSize::new(1920, 1080)),
                Err(ControlError::InvalidConfig(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn prop_mode_depends_only_on_index_and_middle(flags in prop::array::uniform5(any::<bool>())) {
            let mode = select_mode(&FingerStates::new(flags));
            let expected = match (flags[1], flags[2]) {
                (true, false) => Mode::Move,
                (true, true) => Mode::Click,
                _ => Mode::Idle,
            };
            prop_assert_eq!(mode, expected);
        }
    }
}
