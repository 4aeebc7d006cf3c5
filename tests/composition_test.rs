//! Rule-of-thirds guidance across frame sizes and postures

use opencv::core::Point;
use photo_composition::{
    composition::{guide, guide_for_label, Intersection, Posture, ThirdsGrid},
    Error,
};

#[test]
fn test_grid_points_lie_inside_frame() {
    for (w, h) in [(1, 1), (2, 2), (3, 3), (640, 480), (1920, 1080), (1080, 1920), (1001, 333)] {
        let grid = ThirdsGrid::new(w, h);
        for p in grid.points {
            assert!((0..=w).contains(&p.x), "{w}x{h}: {p:?}");
            assert!((0..=h).contains(&p.y), "{w}x{h}: {p:?}");
        }
        let [left, right] = grid.vertical_lines();
        let [top, bottom] = grid.horizontal_lines();
        assert!(left <= right);
        assert!(top <= bottom);
    }
}

#[test]
fn test_forward_picks_each_intersection() {
    let grid = ThirdsGrid::new(900, 600);
    for intersection in Intersection::ALL {
        let target = grid.point(intersection);
        let nudged = Point::new(target.x + 7, target.y - 4);
        for posture in [Posture::Forward, Posture::Backward] {
            let guidance = guide(900, 600, posture, Some(nudged));
            assert_eq!(guidance.highlighted, vec![intersection]);
        }
    }
}

#[test]
fn test_convergence_outside_frame_still_picks_nearest() {
    let guidance = guide(900, 600, Posture::Forward, Some(Point::new(-500, 5000)));
    assert_eq!(guidance.highlighted, vec![Intersection::BottomLeft]);
}

#[test]
fn test_side_postures_ignore_convergence() {
    let table = [
        ("skewed_left", [Intersection::TopRight, Intersection::BottomRight]),
        ("over_shoulder_left", [Intersection::TopRight, Intersection::BottomRight]),
        ("skewed_right", [Intersection::TopLeft, Intersection::BottomLeft]),
        ("over_shoulder_right", [Intersection::TopLeft, Intersection::BottomLeft]),
    ];
    for (label, expected) in table {
        for convergence in [None, Some(Point::new(0, 0)), Some(Point::new(899, 599))] {
            let guidance = guide_for_label(900, 600, label, convergence).unwrap();
            assert_eq!(guidance.highlighted, expected.to_vec(), "{label}");
        }
    }
}

#[test]
fn test_unknown_label_names_itself() {
    let err = guide_for_label(900, 600, "lying_down", Some(Point::new(1, 1))).unwrap_err();
    assert!(matches!(err, Error::UnknownPosture(ref label) if label == "lying_down"));
    assert!(err.to_string().contains("lying_down"));
}

#[test]
fn test_guidance_serializes_points() {
    let guidance = guide(900, 600, Posture::SkewedRight, None);
    let json = serde_json::to_value(&guidance).unwrap();
    assert_eq!(json["grid"]["points"][0], serde_json::json!([300, 200]));
    assert_eq!(json["highlighted"], serde_json::json!(["top_left", "bottom_left"]));
}
