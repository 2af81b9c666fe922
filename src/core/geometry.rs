// Per-frame hand geometry: bounding box, finger extension, landmark distance.
// Everything here looks at the current frame only; there is no history and no
// hysteresis, so a tip level with its joint can flicker between frames.

use crate::models::control::{ControlError, ControlResult};
use crate::models::hand::{
    BoundingBox, Finger, FingerStates, Landmark, LandmarkFrame, PixelPoint, Segment,
};

/// Min/max over every landmark, or `None` when there are no landmarks
pub fn bounding_box(landmarks: &[Landmark]) -> Option<BoundingBox> {
    let first = landmarks.first()?;
    let init = BoundingBox {
        x_min: first.x,
        y_min: first.y,
        x_max: first.x,
        y_max: first.y,
    };

    Some(landmarks.iter().skip(1).fold(init, |bbox, lm| BoundingBox {
        x_min: bbox.x_min.min(lm.x),
        y_min: bbox.y_min.min(lm.y),
        x_max: bbox.x_max.max(lm.x),
        y_max: bbox.y_max.max(lm.y),
    }))
}

/// Classify each finger as extended or retracted.
///
/// The thumb compares x (tip right of its IP joint) and only holds for one hand
/// orientation facing the camera; it flips for the other hand or a rotated
/// wrist. The other four fingers compare y: extended when the tip is above its
/// PIP joint, with y growing downward.
pub fn finger_states(frame: &LandmarkFrame) -> FingerStates {
    let mut flags = [false; 5];
    for (slot, finger) in Finger::ALL.iter().enumerate() {
        let tip = frame.get(finger.tip());
        let joint = frame.get(finger.reference_joint());
        flags[slot] = match finger {
            Finger::Thumb => tip.x > joint.x,
            _ => tip.y < joint.y,
        };
    }
    FingerStates::new(flags)
}

/// Euclidean pixel distance between two landmarks, with the segment endpoints
/// and its midpoint (integer halves) for drawing
pub fn distance(frame: &LandmarkFrame, id_a: usize, id_b: usize) -> ControlResult<Segment> {
    let a = frame
        .by_id(id_a)
        .ok_or(ControlError::LandmarkOutOfRange(id_a))?;
    let b = frame
        .by_id(id_b)
        .ok_or(ControlError::LandmarkOutOfRange(id_b))?;

    Ok(segment_between(a.point(), b.point()))
}

pub fn segment_between(start: PixelPoint, end: PixelPoint) -> Segment {
    // widened so points anywhere in i32 cannot overflow
    let dx = (end.x as i64 - start.x as i64) as f64;
    let dy = (end.y as i64 - start.y as i64) as f64;
    Segment {
        length: dx.hypot(dy),
        start,
        end,
        midpoint: PixelPoint::new(midpoint(start.x, end.x), midpoint(start.y, end.y)),
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    // the floored mean of two i32 values always fits in i32
    (a as i64 + b as i64).div_euclid(2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hand::{HandLandmark, HAND_LANDMARK_COUNT};
    use proptest::prelude::*;

    /// All points at (300, 300) except the ones given
    fn frame_with(overrides: &[(HandLandmark, (i32, i32))]) -> LandmarkFrame {
        let mut points = vec![(300, 300); HAND_LANDMARK_COUNT];
        for (landmark, point) in overrides {
            points[landmark.index()] = *point;
        }
        LandmarkFrame::from_points(&points).unwrap()
    }

    #[test]
    fn test_bounding_box_extents() {
        let frame = frame_with(&[
            (HandLandmark::Wrist, (120, 400)),
            (HandLandmark::ThumbTip, (80, 310)),
            (HandLandmark::MiddleFingerTip, (310, 90)),
            (HandLandmark::PinkyTip, (420, 200)),
        ]);
        let bbox = bounding_box(frame.landmarks()).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x_min: 80,
                y_min: 90,
                x_max: 420,
                y_max: 400
            }
        );
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_index_extended_when_tip_above_pip() {
        let frame = frame_with(&[
            (HandLandmark::IndexFingerTip, (100, 100)),
            (HandLandmark::IndexFingerPip, (100, 150)),
        ]);
        assert!(finger_states(&frame).is_extended(Finger::Index));

        let frame = frame_with(&[
            (HandLandmark::IndexFingerTip, (100, 150)),
            (HandLandmark::IndexFingerPip, (100, 100)),
        ]);
        assert!(!finger_states(&frame).is_extended(Finger::Index));
    }

    #[test]
    fn test_thumb_uses_horizontal_comparison() {
        let frame = frame_with(&[
            (HandLandmark::ThumbTip, (200, 300)),
            (HandLandmark::ThumbIp, (150, 300)),
        ]);
        assert!(finger_states(&frame).is_extended(Finger::Thumb));

        let frame = frame_with(&[
            (HandLandmark::ThumbTip, (150, 300)),
            (HandLandmark::ThumbIp, (200, 300)),
        ]);
        assert!(!finger_states(&frame).is_extended(Finger::Thumb));
    }

    #[test]
    fn test_level_tip_is_retracted() {
        let frame = frame_with(&[]);
        assert_eq!(finger_states(&frame).as_array(), [false; 5]);
    }

    #[test]
    fn test_distance_three_four_five() {
        let frame = frame_with(&[
            (HandLandmark::IndexFingerTip, (0, 0)),
            (HandLandmark::MiddleFingerTip, (3, 4)),
        ]);
        let segment = distance(&frame, 8, 12).unwrap();
        assert_eq!(segment.length, 5.0);
        assert_eq!(segment.start, PixelPoint::new(0, 0));
        assert_eq!(segment.end, PixelPoint::new(3, 4));
        assert_eq!(segment.midpoint, PixelPoint::new(1, 2));
    }

    #[test]
    fn test_segment_at_coordinate_extremes() {
        let segment = segment_between(PixelPoint::new(i32::MIN, 0), PixelPoint::new(i32::MAX, 0));
        assert_eq!(segment.length, u32::MAX as f64);
        assert_eq!(segment.midpoint, PixelPoint::new(-1, 0));

        let segment = segment_between(PixelPoint::new(-3, -3), PixelPoint::new(0, 0));
        assert_eq!(segment.midpoint, PixelPoint::new(-2, -2));
    }

    #[test]
    fn test_distance_rejects_unknown_id() {
        let frame = frame_with(&[]);
        match distance(&frame, 8, 21) {
            Err(ControlError::LandmarkOutOfRange(id)) => assert_eq!(id, 21),
            other => panic!("expected out of range, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_finger_states_cover_five_fingers(
            points in prop::collection::vec((0i32..640, 0i32..480), HAND_LANDMARK_COUNT)
        ) {
            let frame = LandmarkFrame::from_points(&points).unwrap();
            let states = finger_states(&frame);
            prop_assert_eq!(states.as_array().len(), 5);
            prop_assert_eq!(states.is_extended(Finger::Index), points[8].1 < points[6].1);
            prop_assert_eq!(states.is_extended(Finger::Thumb), points[4].0 > points[3].0);
        }

        #[test]
        fn prop_bounding_box_contains_every_landmark(
            points in prop::collection::vec((-50i32..700, -50i32..500), HAND_LANDMARK_COUNT)
        ) {
            let frame = LandmarkFrame::from_points(&points).unwrap();
            let bbox = bounding_box(frame.landmarks()).unwrap();
            for lm in frame.landmarks() {
                prop_assert!(bbox.contains(lm.point()));
            }
        }
    }
}
