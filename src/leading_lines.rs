//! Leading-line extraction: edges of the background, with the subject masked out.
//!
//! The pipeline is grayscale, histogram equalization, a small Gaussian blur,
//! subject masking, Canny and finally the probabilistic Hough transform. The
//! subject must be masked after blurring: otherwise limb and torso contours
//! dominate the edge map and drown out the background lines we are after.

use crate::{config::LineDetectionConfig, subject::BoundingBox, utils::ensure_bgr_frame, Result};
use opencv::{
    core::{Mat, Rect, Scalar, Size, Vec4i, Vector, BORDER_DEFAULT},
    imgproc::{self, LINE_8},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// A detected line segment in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    #[must_use]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Midpoint, kept fractional so that averaging does not accumulate truncation
    #[must_use]
    pub fn midpoint(&self) -> (f64, f64) {
        (
            (f64::from(self.x1) + f64::from(self.x2)) / 2.0,
            (f64::from(self.y1) + f64::from(self.y2)) / 2.0,
        )
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        let dx = f64::from(self.x2 - self.x1);
        let dy = f64::from(self.y2 - self.y1);
        dx.hypot(dy)
    }
}

impl From<Vec4i> for LineSegment {
    fn from(v: Vec4i) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Edge-based line detector
#[derive(Debug, Clone, Default)]
pub struct LeadingLineDetector {
    config: LineDetectionConfig,
}

impl LeadingLineDetector {
    #[must_use]
    pub fn new(config: LineDetectionConfig) -> Self {
        log::info!(
            "Initializing LeadingLineDetector (canny {}/{}, hough threshold {}, min length {}, max gap {})",
            config.canny_low,
            config.canny_high,
            config.hough_threshold,
            config.min_line_length,
            config.max_line_gap
        );
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LineDetectionConfig {
        &self.config
    }

    /// Detect line segments in a BGR frame, ignoring everything inside `exclude`
    ///
    /// The raw Hough output is returned; segments are neither merged nor deduplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The frame is empty or not 3-channel 8-bit
    /// - Any OpenCV operation fails
    pub fn detect(&self, frame: &Mat, exclude: Option<BoundingBox>) -> Result<Vec<LineSegment>> {
        ensure_bgr_frame(frame)?;

        let blurred = self.preprocess(frame)?;
        let masked = match exclude {
            Some(bbox) if !bbox.is_empty() => Self::mask_subject(blurred, bbox)?,
            _ => blurred,
        };

        let mut edges = Mat::default();
        imgproc::canny(
            &masked,
            &mut edges,
            self.config.canny_low,
            self.config.canny_high,
            self.config.canny_aperture,
            false,
        )?;

        let mut raw_lines = Vector::<Vec4i>::new();
        imgproc::hough_lines_p(
            &edges,
            &mut raw_lines,
            self.config.hough_rho,
            self.config.hough_theta_degrees.to_radians(),
            self.config.hough_threshold,
            self.config.min_line_length,
            self.config.max_line_gap,
        )?;

        let segments: Vec<LineSegment> = raw_lines.iter().map(LineSegment::from).collect();
        log::debug!("Detected {} line segment(s)", segments.len());
        Ok(segments)
    }

    /// Grayscale, equalize, blur
    fn preprocess(&self, frame: &Mat) -> Result<Mat> {
        let mut gray = Mat::default();
        imgproc::cvt_color(frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;

        let mut equalized = Mat::default();
        imgproc::equalize_hist(&gray, &mut equalized)?;

        let mut blurred = Mat::default();
        let k = self.config.blur_kernel;
        imgproc::gaussian_blur(&equalized, &mut blurred, Size::new(k, k), 0.0, 0.0, BORDER_DEFAULT)?;

        Ok(blurred)
    }

    /// Zero every pixel inside the subject box
    fn mask_subject(mut image: Mat, bbox: BoundingBox) -> Result<Mat> {
        let x0 = bbox.x.clamp(0, image.cols());
        let y0 = bbox.y.clamp(0, image.rows());
        let x1 = bbox.x.saturating_add(bbox.width).clamp(0, image.cols());
        let y1 = bbox.y.saturating_add(bbox.height).clamp(0, image.rows());
        let rect = Rect::new(x0, y0, x1 - x0, y1 - y0);
        if rect.width > 0 && rect.height > 0 {
            imgproc::rectangle(&mut image, rect, Scalar::all(0.0), imgproc::FILLED, LINE_8, 0)?;
        }
        Ok(image)
    }
}
