//! Benchmarks for line detection, head pose and composition guidance

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opencv::{
    core::{Mat, Point, Scalar, CV_8UC3},
    imgproc,
    prelude::*,
};
use photo_composition::{
    analysis::SceneAnalyzer,
    composition::{guide, Posture},
    convergence::convergence_point,
    head_pose::HeadPoseEstimator,
    landmarks::Landmarks,
    leading_lines::{LeadingLineDetector, LineSegment},
    subject::subject_bounding_box,
};

fn synthetic_scene() -> Mat {
    let mut frame = Mat::zeros(480, 640, CV_8UC3).unwrap().to_mat().unwrap();
    // Perspective-like lines converging towards the upper right
    for i in 0..6 {
        imgproc::line(
            &mut frame,
            Point::new(i * 100, 479),
            Point::new(500, 120),
            Scalar::all(255.0),
            2,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
    }
    frame
}

fn synthetic_pose() -> Landmarks {
    let flat: Vec<f32> = (0..33)
        .flat_map(|i| {
            let angle = (i as f32) * 2.0 * std::f32::consts::PI / 33.0;
            [0.5 + 0.1 * angle.cos(), 0.5 + 0.2 * angle.sin(), 0.0]
        })
        .collect();
    Landmarks::from_flat(&flat).unwrap()
}

fn benchmark_line_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("leading_lines");
    let detector = LeadingLineDetector::default();
    let frame = synthetic_scene();
    let bbox = subject_bounding_box(Some(&synthetic_pose()), 640, 480);

    group.bench_function("detect_640x480", |b| {
        b.iter(|| black_box(detector.detect(black_box(&frame), None).unwrap()));
    });
    group.bench_function("detect_640x480_masked", |b| {
        b.iter(|| black_box(detector.detect(black_box(&frame), bbox).unwrap()));
    });

    group.finish();
}

fn benchmark_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let landmarks = synthetic_pose();
    let estimator = HeadPoseEstimator::default();
    let segments: Vec<LineSegment> = (0..200).map(|i| LineSegment::new(i, 0, i * 2, 480)).collect();

    group.bench_function("subject_bounding_box", |b| {
        b.iter(|| black_box(subject_bounding_box(Some(black_box(&landmarks)), 640, 480)));
    });
    group.bench_function("head_pose", |b| {
        b.iter(|| black_box(estimator.estimate(black_box(&landmarks))));
    });
    group.bench_function("convergence_200_segments", |b| {
        b.iter(|| black_box(convergence_point(black_box(&segments))));
    });
    group.bench_function("guide_forward", |b| {
        b.iter(|| black_box(guide(640, 480, Posture::Forward, Some(Point::new(500, 120)))));
    });

    group.finish();
}

fn benchmark_full_analysis(c: &mut Criterion) {
    let analyzer = SceneAnalyzer::default();
    let frame = synthetic_scene();
    let landmarks = synthetic_pose();

    c.bench_function("analyze_640x480", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&frame), Some(&landmarks)).unwrap()));
    });
}

criterion_group!(benches, benchmark_line_detection, benchmark_geometry, benchmark_full_analysis);
criterion_main!(benches);
