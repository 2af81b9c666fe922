// Drawing primitives describing the annotated preview. Nothing here feeds back
// into control; the renderer decides how (or whether) to draw them.

use crate::core::cursor_mapper::ActiveRegion;
use crate::core::frame_analyzer::HandAnalysis;
use crate::models::control::{CycleOutcome, Mode};
use crate::models::hand::{HandLandmark, PixelPoint};
use image::Rgb;

/// Padding drawn around the hand bounding box
pub const BBOX_DRAW_MARGIN: i32 = 20;

pub const LANDMARK_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const BBOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const REGION_COLOR: Rgb<u8> = Rgb([80, 80, 255]);
pub const MOVE_TIP_COLOR: Rgb<u8> = Rgb([255, 0, 80]);
pub const CLICK_TIP_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const MIDPOINT_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const CLICK_FIRED_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const FPS_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Rectangle {
        top_left: PixelPoint,
        bottom_right: PixelPoint,
        color: Rgb<u8>,
        thickness: u32,
    },
    Circle {
        center: PixelPoint,
        radius: u32,
        color: Rgb<u8>,
        filled: bool,
    },
    Line {
        from: PixelPoint,
        to: PixelPoint,
        color: Rgb<u8>,
        thickness: u32,
    },
    Text {
        origin: PixelPoint,
        text: String,
        color: Rgb<u8>,
        scale: f32,
    },
}

fn dot(center: PixelPoint, radius: u32, color: Rgb<u8>) -> Overlay {
    Overlay::Circle {
        center,
        radius,
        color,
        filled: true,
    }
}

/// Overlays for one iteration: landmarks, hand box, active region, the mode's
/// fingertip markers, and the frame rate
pub fn build_overlays(
    hand: Option<&HandAnalysis>,
    outcome: Option<&CycleOutcome>,
    region: &ActiveRegion,
    fps: Option<f64>,
) -> Vec<Overlay> {
    let mut overlays = Vec::new();

    if let Some(hand) = hand {
        overlays.extend(
            hand.landmarks
                .landmarks()
                .iter()
                .map(|lm| dot(lm.point(), 5, LANDMARK_COLOR)),
        );

        let bbox = hand.bbox.expanded(BBOX_DRAW_MARGIN);
        overlays.push(Overlay::Rectangle {
            top_left: PixelPoint::new(bbox.x_min, bbox.y_min),
            bottom_right: PixelPoint::new(bbox.x_max, bbox.y_max),
            color: BBOX_COLOR,
            thickness: 3,
        });

        overlays.push(Overlay::Rectangle {
            top_left: PixelPoint::new(region.left as i32, region.top as i32),
            bottom_right: PixelPoint::new(region.right as i32, region.bottom as i32),
            color: REGION_COLOR,
            thickness: 2,
        });

        if let Some(CycleOutcome::Gesture(decision)) = outcome {
            match decision.mode {
                Mode::Move => {
                    let tip = hand.landmarks.get(HandLandmark::IndexFingerTip).point();
                    overlays.push(dot(tip, 15, MOVE_TIP_COLOR));
                }
                Mode::Click => {
                    if let Some(click) = decision.click {
                        let segment = click.segment;
                        overlays.push(dot(segment.start, 15, CLICK_TIP_COLOR));
                        overlays.push(dot(segment.end, 15, CLICK_TIP_COLOR));
                        overlays.push(Overlay::Line {
                            from: segment.start,
                            to: segment.end,
                            color: CLICK_TIP_COLOR,
                            thickness: 5,
                        });
                        overlays.push(dot(segment.midpoint, 7, MIDPOINT_COLOR));
                        if click.fired {
                            overlays.push(dot(segment.midpoint, 15, CLICK_FIRED_COLOR));
                        }
                    }
                }
                Mode::Idle => {}
            }
        }
    }

    if let Some(fps) = fps {
        overlays.push(Overlay::Text {
            origin: PixelPoint::new(20, 50),
            text: format!("{}", fps as u64),
            color: FPS_COLOR,
            scale: 3.0,
        });
    }

    overlays
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry;
    use crate::models::control::{ClickCheck, GestureDecision};
    use crate::models::hand::{LandmarkFrame, HAND_LANDMARK_COUNT};

    fn hand() -> HandAnalysis {
        let mut points = vec![(300, 300); HAND_LANDMARK_COUNT];
        points[8] = (310, 200);
        points[12] = (330, 205);
        let landmarks = LandmarkFrame::from_points(&points).unwrap();
        HandAnalysis::from_frame(landmarks, 640, 480).unwrap()
    }

    fn count_circles(overlays: &[Overlay], color: Rgb<u8>, radius: u32) -> usize {
        overlays
            .iter()
            .filter(|o| matches!(o, Overlay::Circle { color: c, radius: r, .. } if *c == color && *r == radius))
            .count()
    }

    #[test]
    fn test_no_hand_only_draws_fps() {
        let region = ActiveRegion::inset(640, 480, 100);
        let overlays = build_overlays(None, Some(&CycleOutcome::NoHand), &region, Some(29.7));
        assert_eq!(
            overlays,
            vec![Overlay::Text {
                origin: PixelPoint::new(20, 50),
                text: "29".to_string(),
                color: FPS_COLOR,
                scale: 3.0,
            }]
        );
    }

    #[test]
    fn test_hand_draws_landmarks_box_and_region() {
        let region = ActiveRegion::inset(640, 480, 100);
        let hand = hand();
        let overlays = build_overlays(Some(&hand), None, &region, None);

        assert_eq!(count_circles(&overlays, LANDMARK_COLOR, 5), HAND_LANDMARK_COUNT);
        assert!(overlays.contains(&Overlay::Rectangle {
            top_left: PixelPoint::new(280, 180),
            bottom_right: PixelPoint::new(350, 320),
            color: BBOX_COLOR,
            thickness: 3,
        }));
        assert!(overlays.contains(&Overlay::Rectangle {
            top_left: PixelPoint::new(100, 100),
            bottom_right: PixelPoint::new(540, 380),
            color: REGION_COLOR,
            thickness: 2,
        }));
    }

    #[test]
    fn test_fired_click_marks_midpoint() {
        let region = ActiveRegion::inset(640, 480, 100);
        let hand = hand();
        let segment = geometry::distance(&hand.landmarks, 8, 12).unwrap();
        let outcome = CycleOutcome::Gesture(GestureDecision {
            mode: Mode::Click,
            command: None,
            click: Some(ClickCheck {
                segment,
                threshold: 45.0,
                fired: true,
            }),
        });

        let overlays = build_overlays(Some(&hand), Some(&outcome), &region, None);
        assert_eq!(count_circles(&overlays, CLICK_TIP_COLOR, 15), 2);
        assert_eq!(count_circles(&overlays, CLICK_FIRED_COLOR, 15), 1);
        assert!(overlays.iter().any(|o| matches!(o, Overlay::Line { .. })));
    }
}
