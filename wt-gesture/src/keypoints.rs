//! This module contains [`HandSnapshot`] and the indices of the keypoints that we care about.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// The number of keypoints in a full hand.
pub const HAND_KEYPOINT_COUNT: usize = 21;

/// The index of the tip of the thumb.
pub const THUMB_TIP: usize = 4;

/// The index of the knuckle at the base of the middle finger.
pub const MIDDLE_FINGER_KNUCKLE: usize = 9;

/// The index of the tip of the little finger.
pub const PINKY_TIP: usize = 20;

/// The keypoints of a single detected hand.
///
/// Every keypoint is normalized so that x and y are in [0, 1] across the video frame, with
/// (0.5, 0.5) in the centre. The z coordinate is the relative depth, if the detector gives one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandSnapshot {
    /// The keypoints in the order that the detector reports them.
    pub keypoints: Vec<Vec3>,
}

impl HandSnapshot {
    /// Create a new snapshot from a list of keypoints.
    pub fn new(keypoints: Vec<Vec3>) -> Self {
        Self { keypoints }
    }

    /// Create a full hand with every keypoint in the centre of the frame, except for the given
    /// ones.
    pub fn with_keypoints(keypoints: &[(usize, Vec3)]) -> Self {
        let mut hand = vec![Vec3::new(0.5, 0.5, 0.); HAND_KEYPOINT_COUNT];
        for &(idx, point) in keypoints {
            if let Some(slot) = hand.get_mut(idx) {
                *slot = point;
            }
        }
        Self::new(hand)
    }

    /// Get the keypoint with the given index, if the detector gave us that many.
    pub fn keypoint(&self, idx: usize) -> Option<Vec3> {
        self.keypoints.get(idx).copied()
    }

    /// Get the distance between two keypoints in the plane of the video frame.
    pub fn planar_distance(&self, a: usize, b: usize) -> Option<f32> {
        let a = self.keypoint(a)?;
        let b = self.keypoint(b)?;
        Some(Vec2::new(a.x, a.y).distance(Vec2::new(b.x, b.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn planar_distance_test() {
        let hand = HandSnapshot::with_keypoints(&[
            (THUMB_TIP, Vec3::new(0.2, 0.5, 0.3)),
            (PINKY_TIP, Vec3::new(0.5, 0.9, -0.8)),
        ]);

        assert_eq!(hand.keypoints.len(), HAND_KEYPOINT_COUNT);
        assert!(approx_eq!(
            f32,
            hand.planar_distance(THUMB_TIP, PINKY_TIP).unwrap(),
            0.5
        ));
        assert_eq!(hand.planar_distance(THUMB_TIP, 21), None);

        let partial = HandSnapshot::new(vec![Vec3::ZERO; 5]);
        assert_eq!(partial.keypoint(THUMB_TIP), Some(Vec3::ZERO));
        assert_eq!(partial.keypoint(PINKY_TIP), None);
    }
}
