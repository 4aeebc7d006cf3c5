//! One-call scene analysis: subject box, leading lines, convergence and head pose.

use crate::{
    composition::{guide, Guidance, Posture},
    config::Config,
    convergence::convergence_point,
    head_pose::{GazeDirection, HeadPose, HeadPoseEstimator},
    landmarks::Landmarks,
    leading_lines::{LeadingLineDetector, LineSegment},
    subject::{BoundingBox, SubjectLocator},
    utils::{ensure_bgr_frame, serialize_opt_point},
    Result,
};
use opencv::{
    core::{Mat, Point},
    prelude::*,
};
use serde::Serialize;

/// Everything computed for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneAnalysis {
    /// Frame width in pixels
    pub width: i32,
    /// Frame height in pixels
    pub height: i32,
    pub bounding_box: Option<BoundingBox>,
    pub lines: Vec<LineSegment>,
    #[serde(serialize_with = "serialize_opt_point")]
    pub convergence: Option<Point>,
    pub head_pose: Option<HeadPose>,
}

impl SceneAnalysis {
    /// Gaze direction, if a head pose was estimated
    #[must_use]
    pub fn gaze(&self, threshold: f64) -> Option<GazeDirection> {
        self.head_pose.map(|pose| pose.gaze(threshold))
    }

    /// Apply the composition policy for a posture to this frame
    #[must_use]
    pub fn guidance(&self, posture: Posture) -> Guidance {
        guide(self.width, self.height, posture, self.convergence)
    }
}

/// Stateless analyzer bundling the per-frame components
#[derive(Debug, Clone, Default)]
pub struct SceneAnalyzer {
    line_detector: LeadingLineDetector,
    head_pose: HeadPoseEstimator,
    subject: SubjectLocator,
}

impl SceneAnalyzer {
    #[must_use]
    pub fn new(line_detector: LeadingLineDetector, head_pose: HeadPoseEstimator, subject: SubjectLocator) -> Self {
        Self {
            line_detector,
            head_pose,
            subject,
        }
    }

    /// Build from validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            LeadingLineDetector::new(config.line_detection.clone()),
            HeadPoseEstimator::new(config.head_pose.gaze_threshold),
            SubjectLocator::new(config.subject.margin_x_ratio, config.subject.margin_y_ratio),
        ))
    }

    #[must_use]
    pub fn head_pose_estimator(&self) -> &HeadPoseEstimator {
        &self.head_pose
    }

    /// Analyze a frame, with the subject's landmarks when known
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is not a 3-channel 8-bit image or OpenCV fails
    pub fn analyze(&self, frame: &Mat, landmarks: Option<&Landmarks>) -> Result<SceneAnalysis> {
        ensure_bgr_frame(frame)?;
        let width = frame.cols();
        let height = frame.rows();

        let bounding_box = self.subject.bounding_box(landmarks, width, height);
        let lines = self.line_detector.detect(frame, bounding_box)?;
        let convergence = convergence_point(&lines);
        let head_pose = landmarks.and_then(|lm| self.head_pose.estimate(lm));

        log::debug!(
            "Analyzed {}x{} frame: {} segments, convergence {:?}, head pose {:?}",
            width,
            height,
            lines.len(),
            convergence,
            head_pose
        );

        Ok(SceneAnalysis {
            width,
            height,
            bounding_box,
            lines,
            convergence,
            head_pose,
        })
    }
}
