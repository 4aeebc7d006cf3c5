//! Coarse head orientation from five facial landmarks.
//!
//! A 2D geometric approximation, not a 3D solve: roll is the tilt of the eye
//! line, and after de-rotating by roll, yaw and pitch come from where the
//! nose sits between the eyes and the mouth corners. A nose exactly halfway
//! gives 0°, a nose on the eye/mouth line gives ±90°.
//!
//! Landmarks are read with MediaPipe pose indices (nose 0, eye outer corners
//! 3 and 6, mouth corners 9 and 10). Those are named from the subject's point
//! of view, so for a subject facing the camera the subject's right eye is on
//! the image's left. The face points are arranged in image order below.

use crate::{
    constants::{
        DEFAULT_GAZE_THRESHOLD, EPSILON, LEFT_EYE_OUTER, MIN_HEAD_POSE_LANDMARKS, MOUTH_LEFT, MOUTH_RIGHT, NOSE,
        RIGHT_EYE_OUTER,
    },
    landmarks::Landmarks,
};
use nalgebra::{Point2, Rotation2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Head orientation in degrees, always finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    pub roll: f64,
    pub yaw: f64,
    pub pitch: f64,
}

impl HeadPose {
    /// Gaze direction for this pose's yaw
    #[must_use]
    pub fn gaze(&self, threshold: f64) -> GazeDirection {
        GazeDirection::from_yaw(self.yaw, threshold)
    }
}

/// Coarse gaze direction from yaw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GazeDirection {
    Left,
    Right,
    Straight,
}

impl GazeDirection {
    /// Classify yaw against `±threshold`; the boundary itself counts as straight
    #[must_use]
    pub fn from_yaw(yaw: f64, threshold: f64) -> Self {
        if yaw < -threshold {
            Self::Left
        } else if yaw > threshold {
            Self::Right
        } else {
            Self::Straight
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Straight => "straight",
        }
    }
}

impl fmt::Display for GazeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five face points in image order
#[derive(Debug, Clone, Copy)]
struct FacePoints {
    left_eye: Point2<f64>,
    right_eye: Point2<f64>,
    nose: Point2<f64>,
    left_mouth: Point2<f64>,
    right_mouth: Point2<f64>,
}

impl FacePoints {
    fn from_landmarks(landmarks: &Landmarks) -> Option<Self> {
        if landmarks.len() < MIN_HEAD_POSE_LANDMARKS {
            return None;
        }

        let point = |index: usize| -> Option<Point2<f64>> {
            let lm = landmarks.get(index)?;
            let p = Point2::new(f64::from(lm.x), f64::from(lm.y));
            (p.x.is_finite() && p.y.is_finite()).then_some(p)
        };

        Some(Self {
            left_eye: point(RIGHT_EYE_OUTER)?,
            right_eye: point(LEFT_EYE_OUTER)?,
            nose: point(NOSE)?,
            left_mouth: point(MOUTH_RIGHT)?,
            right_mouth: point(MOUTH_LEFT)?,
        })
    }

    fn rotated(&self, rotation: &Rotation2<f64>) -> Self {
        Self {
            left_eye: rotation * self.left_eye,
            right_eye: rotation * self.right_eye,
            nose: rotation * self.nose,
            left_mouth: rotation * self.left_mouth,
            right_mouth: rotation * self.right_mouth,
        }
    }
}

/// `-90 + 180 · offset / span`, or 0 when the span vanishes
fn ratio_angle(offset: f64, span: f64) -> f64 {
    if span.abs() < EPSILON {
        return 0.0;
    }
    let angle = -90.0 + 180.0 * offset / span;
    if angle.is_finite() {
        angle
    } else {
        0.0
    }
}

/// Geometric head pose estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadPoseEstimator {
    gaze_threshold: f64,
}

impl Default for HeadPoseEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_GAZE_THRESHOLD)
    }
}

impl HeadPoseEstimator {
    #[must_use]
    pub const fn new(gaze_threshold: f64) -> Self {
        Self { gaze_threshold }
    }

    #[must_use]
    pub const fn gaze_threshold(&self) -> f64 {
        self.gaze_threshold
    }

    /// Estimate roll, yaw and pitch
    ///
    /// Returns `None` when fewer than 11 landmarks are present or a face point
    /// is not finite. Zero denominators give 0° for that angle.
    #[must_use]
    pub fn estimate(&self, landmarks: &Landmarks) -> Option<HeadPose> {
        let face = FacePoints::from_landmarks(landmarks)?;

        let separation = face.right_eye.x - face.left_eye.x;
        let dy = face.right_eye.y - face.left_eye.y;
        // Eyes stacked vertically give no usable eye line
        let roll_rad = if separation.abs() < EPSILON {
            0.0
        } else {
            dy.atan2(separation.max(EPSILON))
        };

        // x' = cos·x + sin·y, y' = -sin·x + cos·y
        let r = face.rotated(&Rotation2::new(-roll_rad));

        let dx_total = ((r.right_eye.x - r.left_eye.x) + (r.right_mouth.x - r.left_mouth.x)) / 2.0;
        let dx_nose = ((r.right_eye.x - r.nose.x) + (r.right_mouth.x - r.nose.x)) / 2.0;
        let dy_total = ((r.left_mouth.y - r.left_eye.y) + (r.right_mouth.y - r.right_eye.y)) / 2.0;
        let dy_nose = ((r.left_mouth.y - r.nose.y) + (r.right_mouth.y - r.nose.y)) / 2.0;

        let pose = HeadPose {
            roll: roll_rad.to_degrees(),
            yaw: ratio_angle(dx_nose, dx_total),
            pitch: ratio_angle(dy_nose, dy_total),
        };
        log::debug!(
            "Head pose: roll {:.1}, yaw {:.1}, pitch {:.1}",
            pose.roll,
            pose.yaw,
            pose.pitch
        );
        Some(pose)
    }

    /// Estimate pose and classify gaze in one step
    #[must_use]
    pub fn estimate_with_gaze(&self, landmarks: &Landmarks) -> Option<(HeadPose, GazeDirection)> {
        let pose = self.estimate(landmarks)?;
        Some((pose, pose.gaze(self.gaze_threshold)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Eleven landmarks with the five face points set, the rest at the origin
    fn face(nose: (f32, f32), eye_l: (f32, f32), eye_r: (f32, f32), mouth_l: (f32, f32), mouth_r: (f32, f32)) -> Landmarks {
        // Image-left points go to the subject's right indices
        let mut flat = vec![0.0f32; MIN_HEAD_POSE_LANDMARKS * 3];
        let mut set = |index: usize, (x, y): (f32, f32)| {
            flat[index * 3] = x;
            flat[index * 3 + 1] = y;
        };
        set(NOSE, nose);
        set(RIGHT_EYE_OUTER, eye_l);
        set(LEFT_EYE_OUTER, eye_r);
        set(MOUTH_RIGHT, mouth_l);
        set(MOUTH_LEFT, mouth_r);
        Landmarks::from_flat(&flat).unwrap()
    }

    fn frontal() -> Landmarks {
        face((0.5, 0.5), (0.4, 0.4), (0.6, 0.4), (0.4, 0.6), (0.6, 0.6))
    }

    #[test]
    fn test_frontal_face_is_neutral() {
        let pose = HeadPoseEstimator::default().estimate(&frontal()).unwrap();
        assert!(pose.roll.abs() < 1e-6);
        assert!(pose.yaw.abs() < 1e-4);
        assert!(pose.pitch.abs() < 1e-4);
    }

    #[test]
    fn test_tilted_eyes_give_roll() {
        // Right eye lower than left by the same amount as their separation: 45°
        let lm = face((0.5, 0.5), (0.4, 0.4), (0.6, 0.6), (0.4, 0.6), (0.6, 0.8));
        let pose = HeadPoseEstimator::default().estimate(&lm).unwrap();
        assert!((pose.roll - 45.0).abs() < 1e-3, "roll = {}", pose.roll);
    }

    #[test]
    fn test_roll_is_removed_before_yaw() {
        // Frontal face rotated by 30° about the nose keeps yaw and pitch near zero
        let rot = Rotation2::new(30.0_f64.to_radians());
        let c = Point2::new(0.5, 0.5);
        let turn = |x: f64, y: f64| -> (f32, f32) {
            let p = c + rot * (Point2::new(x, y) - c);
            (p.x as f32, p.y as f32)
        };
        let lm = face(turn(0.5, 0.5), turn(0.4, 0.4), turn(0.6, 0.4), turn(0.4, 0.6), turn(0.6, 0.6));
        let pose = HeadPoseEstimator::default().estimate(&lm).unwrap();
        assert!((pose.roll - 30.0).abs() < 1e-3, "roll = {}", pose.roll);
        assert!(pose.yaw.abs() < 1e-3, "yaw = {}", pose.yaw);
        assert!(pose.pitch.abs() < 1e-3, "pitch = {}", pose.pitch);
    }

    #[test]
    fn test_nose_offset_gives_yaw() {
        // Nose three quarters of the way to the right: dXnose/dXtot = 0.25 -> -45°
        let lm = face((0.55, 0.5), (0.4, 0.4), (0.6, 0.4), (0.4, 0.6), (0.6, 0.6));
        let pose = HeadPoseEstimator::default().estimate(&lm).unwrap();
        assert!((pose.yaw + 45.0).abs() < 1e-3, "yaw = {}", pose.yaw);
        assert_eq!(pose.gaze(35.0), GazeDirection::Left);
    }

    #[test]
    fn test_nose_offset_gives_pitch() {
        // Nose a quarter of the way down from the eyes: dYnose/dYtot = 0.75 -> 45°
        let lm = face((0.5, 0.45), (0.4, 0.4), (0.6, 0.4), (0.4, 0.6), (0.6, 0.6));
        let pose = HeadPoseEstimator::default().estimate(&lm).unwrap();
        assert!((pose.pitch - 45.0).abs() < 1e-3, "pitch = {}", pose.pitch);
    }

    #[test]
    fn test_zero_eye_separation_gives_zero_roll() {
        let lm = face((0.5, 0.5), (0.5, 0.4), (0.5, 0.4), (0.4, 0.6), (0.6, 0.6));
        let pose = HeadPoseEstimator::default().estimate(&lm).unwrap();
        assert_eq!(pose.roll, 0.0);
        assert!(pose.yaw.is_finite());
        assert!(pose.pitch.is_finite());
    }

    #[test]
    fn test_vertical_eye_line_gives_zero_roll() {
        let lm = face((0.5, 0.5), (0.5, 0.4), (0.5, 0.5), (0.4, 0.6), (0.6, 0.6));
        let pose = HeadPoseEstimator::default().estimate(&lm).unwrap();
        assert_eq!(pose.roll, 0.0);
        // No rotation applied: the mouth span still drives yaw
        assert!((pose.yaw - 0.0).abs() < 1e-3, "yaw = {}", pose.yaw);
        assert!(pose.pitch.is_finite());
    }

    #[test]
    fn test_collapsed_face_gives_zero_angles() {
        let lm = face((0.5, 0.5), (0.5, 0.5), (0.5, 0.5), (0.5, 0.5), (0.5, 0.5));
        let pose = HeadPoseEstimator::default().estimate(&lm).unwrap();
        assert_eq!(pose, HeadPose { roll: 0.0, yaw: 0.0, pitch: 0.0 });
    }

    #[test]
    fn test_too_few_landmarks() {
        let lm = Landmarks::from_flat(&[0.5; 30]).unwrap();
        assert_eq!(lm.len(), 10);
        assert!(HeadPoseEstimator::default().estimate(&lm).is_none());
        assert!(HeadPoseEstimator::default().estimate(&Landmarks::from_flat(&[]).unwrap()).is_none());
    }

    #[test]
    fn test_non_finite_face_point() {
        let lm = face((f32::NAN, 0.5), (0.4, 0.4), (0.6, 0.4), (0.4, 0.6), (0.6, 0.6));
        assert!(HeadPoseEstimator::default().estimate(&lm).is_none());
    }

    #[test]
    fn test_gaze_thresholds() {
        assert_eq!(GazeDirection::from_yaw(40.0, 35.0), GazeDirection::Right);
        assert_eq!(GazeDirection::from_yaw(-40.0, 35.0), GazeDirection::Left);
        assert_eq!(GazeDirection::from_yaw(35.0, 35.0), GazeDirection::Straight);
        assert_eq!(GazeDirection::from_yaw(-35.0, 35.0), GazeDirection::Straight);
        assert_eq!(GazeDirection::from_yaw(10.0, 35.0), GazeDirection::Straight);
    }

    #[test]
    fn test_gaze_display() {
        assert_eq!(GazeDirection::Left.to_string(), "left");
        assert_eq!(GazeDirection::Right.to_string(), "right");
        assert_eq!(GazeDirection::Straight.to_string(), "straight");
    }
}
