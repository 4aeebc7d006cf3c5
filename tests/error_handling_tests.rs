//! Error handling tests for all modules

use opencv::{
    core::{Mat, Scalar, CV_32FC3, CV_8UC1},
    prelude::*,
};
use photo_composition::{
    analysis::SceneAnalyzer,
    composition::Posture,
    detector::{FixedPosture, PostureClassifier},
    landmarks::Landmarks,
    leading_lines::LeadingLineDetector,
    overlay::Overlay,
    utils::safe_cast::{f64_to_i32, round_to_pixel, usize_to_i32},
    Error,
};

#[test]
fn test_frame_format_errors() {
    let analyzer = SceneAnalyzer::default();

    let gray = Mat::new_rows_cols_with_default(20, 20, CV_8UC1, Scalar::all(0.0)).unwrap();
    assert!(matches!(analyzer.analyze(&gray, None), Err(Error::InvalidInput(_))));

    let float = Mat::new_rows_cols_with_default(20, 20, CV_32FC3, Scalar::all(0.0)).unwrap();
    assert!(matches!(analyzer.analyze(&float, None), Err(Error::InvalidInput(_))));

    assert!(matches!(
        LeadingLineDetector::default().detect(&Mat::default(), None),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_overlay_rejects_bad_frames() {
    let analysis = SceneAnalyzer::default()
        .analyze(&Mat::new_rows_cols_with_default(20, 20, opencv::core::CV_8UC3, Scalar::all(0.0)).unwrap(), None)
        .unwrap();
    let gray = Mat::new_rows_cols_with_default(20, 20, CV_8UC1, Scalar::all(0.0)).unwrap();
    assert!(Overlay::default().render(&gray, &analysis, None).is_err());
}

#[test]
fn test_landmark_errors() {
    let err = Landmarks::from_flat(&[0.1, 0.2]).unwrap_err();
    match err {
        Error::InvalidInput(msg) => assert!(msg.contains("multiple of 3")),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }

    assert!(Landmarks::parse("0.1, 0.2, abc").is_err());
    assert!(Landmarks::parse("0.1 0.2 0.3 0.4").is_err());
    assert!(matches!(
        Landmarks::from_file("no/such/landmarks.txt"),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_classifier_label_outside_contract() {
    let classifier = FixedPosture::new("handstand");
    let label = classifier.classify(&[0.5, 0.5, 0.0]).unwrap().unwrap();
    let err = label.parse::<Posture>().unwrap_err();
    assert!(matches!(err, Error::UnknownPosture(_)));
    assert!(err.to_string().contains("over_shoulder_right"));
}

#[test]
fn test_safe_cast_errors() {
    assert!(usize_to_i32(usize::MAX).is_err());
    assert!(f64_to_i32(f64::NAN).is_err());
    assert!(f64_to_i32(1e12).is_err());
    assert!(round_to_pixel(f64::INFINITY).is_err());
    assert_eq!(round_to_pixel(2.5).unwrap(), 3);
}
