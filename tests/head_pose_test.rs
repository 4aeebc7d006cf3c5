//! Head pose and gaze from full pose landmark sets


use photo_composition::{
    config::Config,
    head_pose::{GazeDirection, HeadPoseEstimator},
    landmarks::Landmarks,
};
use proptest::prelude::*;
use test_helpers::frontal_pose;

#[test]
fn test_frontal_pose_is_straight() {
    let estimator = HeadPoseEstimator::default();
    let (pose, gaze) = estimator.estimate_with_gaze(&frontal_pose(0.0)).unwrap();
    assert!(pose.roll.abs() < 1e-6);
    assert!(pose.yaw.abs() < 1e-6);
    assert!(pose.pitch.abs() < 1e-6);
    assert_eq!(gaze, GazeDirection::Straight);
}

#[test]
fn test_turned_head_changes_gaze() {
    let estimator = HeadPoseEstimator::default();

    // Nose under the image-right eye: yaw well below -35
    let (pose, gaze) = estimator.estimate_with_gaze(&frontal_pose(0.0625)).unwrap();
    assert!(pose.yaw < -35.0, "yaw {}", pose.yaw);
    assert_eq!(gaze, GazeDirection::Left);

    let (pose, gaze) = estimator.estimate_with_gaze(&frontal_pose(-0.0625)).unwrap();
    assert!(pose.yaw > 35.0, "yaw {}", pose.yaw);
    assert_eq!(gaze, GazeDirection::Right);

    // A small turn stays straight
    let (_, gaze) = estimator.estimate_with_gaze(&frontal_pose(0.0078125)).unwrap();
    assert_eq!(gaze, GazeDirection::Straight);
}

#[test]
fn test_threshold_from_config() {
    let mut config = Config::default();
    config.head_pose.gaze_threshold = 5.0;
    let estimator = HeadPoseEstimator::new(config.head_pose.gaze_threshold);

    let (pose, gaze) = estimator.estimate_with_gaze(&frontal_pose(0.0078125)).unwrap();
    assert!(pose.yaw < -5.0);
    assert_eq!(gaze, GazeDirection::Left);
}

#[test]
fn test_body_points_do_not_matter() {
    let estimator = HeadPoseEstimator::default();
    let base = frontal_pose(0.0);

    let mut flat = base.to_flat();
    // Move a wrist far away
    flat[15 * 3] = 0.99;
    flat[15 * 3 + 1] = 0.01;
    let moved = Landmarks::from_flat(&flat).unwrap();

    assert_eq!(estimator.estimate(&base), estimator.estimate(&moved));
}

#[test]
fn test_angles_always_finite() {
    let estimator = HeadPoseEstimator::default();
    for dx in [-0.5_f32, -0.0625, 0.0, 0.0625, 0.5] {
        let pose = estimator.estimate(&frontal_pose(dx)).unwrap();
        assert!(pose.roll.is_finite() && pose.yaw.is_finite() && pose.pitch.is_finite());
    }

    // All points stacked on one spot
    let collapsed = Landmarks::from_flat(&[0.5; 33 * 3]).unwrap();
    let pose = estimator.estimate(&collapsed).unwrap();
    assert_eq!((pose.roll, pose.yaw, pose.pitch), (0.0, 0.0, 0.0));
}

proptest! {
    #[test]
    fn prop_angles_finite_for_any_face(points in prop::collection::vec((-2.0f32..3.0, -2.0f32..3.0), 33)) {
        let flat: Vec<f32> = points.iter().flat_map(|&(x, y)| [x, y, 0.0]).collect();
        let landmarks = Landmarks::from_flat(&flat).unwrap();
        let estimator = HeadPoseEstimator::default();

        let pose = estimator.estimate(&landmarks).unwrap();
        prop_assert!(pose.roll.is_finite() && pose.yaw.is_finite() && pose.pitch.is_finite());
        prop_assert!(pose.roll.abs() <= 90.0);
        prop_assert_eq!(estimator.estimate(&landmarks), Some(pose));
    }
}
