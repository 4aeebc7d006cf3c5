//! Subject bounding box derived from pose landmark extrema.

use crate::{
    constants::{DEFAULT_MARGIN_X_RATIO, DEFAULT_MARGIN_Y_RATIO},
    landmarks::Landmarks,
    utils::safe_cast::f64_to_i32_clamp,
};
use opencv::core::Rect;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates, always inside the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<BoundingBox> for Rect {
    fn from(bbox: BoundingBox) -> Self {
        Rect::new(bbox.x, bbox.y, bbox.width, bbox.height)
    }
}

/// Raw pixel-space extrema of a landmark set, before margins and clipping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectExtent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl SubjectExtent {
    /// Pixel extrema of all finite landmark coordinates, `None` if there are none
    #[must_use]
    pub fn from_landmarks(landmarks: &Landmarks, width: i32, height: i32) -> Option<Self> {
        let (w, h) = (f64::from(width), f64::from(height));
        let mut extent: Option<Self> = None;

        for point in landmarks.iter() {
            let (px, py) = (f64::from(point.x) * w, f64::from(point.y) * h);
            if !px.is_finite() || !py.is_finite() {
                continue;
            }
            extent = Some(match extent {
                None => Self { x_min: px, x_max: px, y_min: py, y_max: py },
                Some(e) => Self {
                    x_min: e.x_min.min(px),
                    x_max: e.x_max.max(px),
                    y_min: e.y_min.min(py),
                    y_max: e.y_max.max(py),
                },
            });
        }

        extent
    }

    /// Pre-clip margins: `ratio_x × horizontal extent`, `ratio_y × vertical extent`
    #[must_use]
    pub fn margins(&self, ratio_x: f64, ratio_y: f64) -> (f64, f64) {
        (ratio_x * (self.x_max - self.x_min), ratio_y * (self.y_max - self.y_min))
    }
}

/// Computes the subject box with configurable margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectLocator {
    margin_x_ratio: f64,
    margin_y_ratio: f64,
}

impl Default for SubjectLocator {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_X_RATIO, DEFAULT_MARGIN_Y_RATIO)
    }
}

impl SubjectLocator {
    #[must_use]
    pub const fn new(margin_x_ratio: f64, margin_y_ratio: f64) -> Self {
        Self {
            margin_x_ratio,
            margin_y_ratio,
        }
    }

    /// Bounding box around all landmarks, expanded by the margins and clipped to the image
    ///
    /// Absent or empty landmarks yield `None`; that is a "nobody detected" state, not an error.
    #[must_use]
    pub fn bounding_box(&self, landmarks: Option<&Landmarks>, width: i32, height: i32) -> Option<BoundingBox> {
        let extent = SubjectExtent::from_landmarks(landmarks?, width, height)?;
        let (margin_x, margin_y) = extent.margins(self.margin_x_ratio, self.margin_y_ratio);

        let x_min = f64_to_i32_clamp(extent.x_min - margin_x, 0, width);
        let x_max = f64_to_i32_clamp(extent.x_max + margin_x, 0, width);
        let y_min = f64_to_i32_clamp(extent.y_min - margin_y, 0, height);
        let y_max = f64_to_i32_clamp(extent.y_max + margin_y, 0, height);

        let bbox = BoundingBox::new(x_min, y_min, x_max - x_min, y_max - y_min);
        log::debug!("Subject bounding box: {:?}", bbox);
        Some(bbox)
    }
}

/// Subject bounding box with the default 20% / 10% margins
#[must_use]
pub fn subject_bounding_box(landmarks: Option<&Landmarks>, width: i32, height: i32) -> Option<BoundingBox> {
    SubjectLocator::default().bounding_box(landmarks, width, height)
}
