//! Configuration management for the composition analyzer

use crate::{
    constants::{
        DEFAULT_BLUR_KERNEL, DEFAULT_CANNY_APERTURE, DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW, DEFAULT_GAZE_THRESHOLD,
        DEFAULT_HOUGH_RHO, DEFAULT_HOUGH_THETA_DEGREES, DEFAULT_HOUGH_THRESHOLD, DEFAULT_MARGIN_X_RATIO,
        DEFAULT_MARGIN_Y_RATIO, DEFAULT_MAX_LINE_GAP, DEFAULT_MIN_LINE_LENGTH, DEFAULT_PREVIEW_EVERY_N,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edge and line extraction parameters
    pub line_detection: LineDetectionConfig,

    /// Subject bounding box margins
    pub subject: SubjectConfig,

    /// Head pose parameters
    pub head_pose: HeadPoseConfig,

    /// Live preview configuration
    pub preview: PreviewConfig,

    /// Overlay drawing configuration
    pub overlay: OverlayConfig,
}

/// Edge detection and probabilistic Hough parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineDetectionConfig {
    /// Gaussian blur kernel size (odd)
    pub blur_kernel: i32,

    /// Canny lower hysteresis threshold
    pub canny_low: f64,

    /// Canny upper hysteresis threshold
    pub canny_high: f64,

    /// Sobel aperture for Canny (3, 5 or 7)
    pub canny_aperture: i32,

    /// Hough distance resolution in pixels
    pub hough_rho: f64,

    /// Hough angle resolution in degrees
    pub hough_theta_degrees: f64,

    /// Minimum accumulator votes
    pub hough_threshold: i32,

    /// Minimum segment length in pixels
    pub min_line_length: f64,

    /// Maximum gap bridged within one segment, in pixels
    pub max_line_gap: f64,
}

/// Subject bounding box margins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Horizontal margin as a fraction of the landmark width
    pub margin_x_ratio: f64,

    /// Vertical margin as a fraction of the landmark height
    pub margin_y_ratio: f64,
}

/// Head pose parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadPoseConfig {
    /// Yaw beyond which gaze is classified left/right, in degrees
    pub gaze_threshold: f64,
}

/// Live preview configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Recompute lines and pose every N frames
    pub every_n: u32,

    /// Window width
    pub window_width: i32,

    /// Window height
    pub window_height: i32,
}

/// Overlay drawing configuration (colours are BGR)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub line_color: [u8; 3],
    pub box_color: [u8; 3],
    pub convergence_color: [u8; 3],
    pub grid_color: [u8; 3],
    pub line_thickness: i32,
    pub grid_thickness: i32,
    pub convergence_radius: i32,
    pub intersection_radius: i32,
}

impl Default for LineDetectionConfig {
    fn default() -> Self {
        Self {
            blur_kernel: DEFAULT_BLUR_KERNEL,
            canny_low: DEFAULT_CANNY_LOW,
            canny_high: DEFAULT_CANNY_HIGH,
            canny_aperture: DEFAULT_CANNY_APERTURE,
            hough_rho: DEFAULT_HOUGH_RHO,
            hough_theta_degrees: DEFAULT_HOUGH_THETA_DEGREES,
            hough_threshold: DEFAULT_HOUGH_THRESHOLD,
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
            max_line_gap: DEFAULT_MAX_LINE_GAP,
        }
    }
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            margin_x_ratio: DEFAULT_MARGIN_X_RATIO,
            margin_y_ratio: DEFAULT_MARGIN_Y_RATIO,
        }
    }
}

impl Default for HeadPoseConfig {
    fn default() -> Self {
        Self {
            gaze_threshold: DEFAULT_GAZE_THRESHOLD,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            every_n: DEFAULT_PREVIEW_EVERY_N,
            window_width: 960,
            window_height: 720,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            line_color: [0, 255, 0],
            box_color: [255, 0, 0],
            convergence_color: [0, 0, 255],
            grid_color: [0, 255, 0],
            line_thickness: 2,
            grid_thickness: 1,
            convergence_radius: 10,
            intersection_radius: 5,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML does not describe a configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first invalid setting
    pub fn validate(&self) -> Result<()> {
        let lines = &self.line_detection;
        if lines.blur_kernel <= 0 || lines.blur_kernel % 2 == 0 {
            return Err(Error::ConfigError(
                "Blur kernel size must be odd and greater than 0".to_string(),
            ));
        }
        if !lines.canny_low.is_finite() || !lines.canny_high.is_finite() {
            return Err(Error::ConfigError("Canny thresholds must be finite".to_string()));
        }
        if lines.canny_low < 0.0 || lines.canny_high < lines.canny_low {
            return Err(Error::ConfigError(
                "Canny thresholds must satisfy 0 <= low <= high".to_string(),
            ));
        }
        if ![3, 5, 7].contains(&lines.canny_aperture) {
            return Err(Error::ConfigError("Canny aperture must be 3, 5 or 7".to_string()));
        }
        if !(lines.hough_rho.is_finite() && lines.hough_rho > 0.0)
            || !(lines.hough_theta_degrees.is_finite() && lines.hough_theta_degrees > 0.0)
        {
            return Err(Error::ConfigError(
                "Hough resolutions must be greater than 0".to_string(),
            ));
        }
        if lines.hough_threshold <= 0 {
            return Err(Error::ConfigError("Hough threshold must be greater than 0".to_string()));
        }
        if !(lines.min_line_length.is_finite() && lines.min_line_length >= 0.0)
            || !(lines.max_line_gap.is_finite() && lines.max_line_gap >= 0.0)
        {
            return Err(Error::ConfigError(
                "Line length and gap must be finite and not negative".to_string(),
            ));
        }

        let subject = &self.subject;
        if !(subject.margin_x_ratio.is_finite() && subject.margin_x_ratio >= 0.0)
            || !(subject.margin_y_ratio.is_finite() && subject.margin_y_ratio >= 0.0)
        {
            return Err(Error::ConfigError(
                "Subject margins must be finite and not negative".to_string(),
            ));
        }

        if !(0.0..=90.0).contains(&self.head_pose.gaze_threshold) {
            return Err(Error::ConfigError(
                "Gaze threshold must be between 0 and 90 degrees".to_string(),
            ));
        }

        if self.preview.every_n == 0 {
            return Err(Error::ConfigError(
                "Preview recompute interval must be greater than 0".to_string(),
            ));
        }
        if self.overlay.intersection_radius <= 0 || self.overlay.convergence_radius <= 0 {
            return Err(Error::ConfigError("Overlay radii must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Photo Composition Configuration

# Edge and line extraction
line_detection:
  blur_kernel: 3
  canny_low: 50.0
  canny_high: 150.0
  canny_aperture: 3
  hough_rho: 1.0
  hough_theta_degrees: 1.0
  hough_threshold: 50
  min_line_length: 50.0
  max_line_gap: 10.0

# Subject bounding box margins
subject:
  margin_x_ratio: 0.2
  margin_y_ratio: 0.1

# Head pose
head_pose:
  gaze_threshold: 35.0

# Live preview
preview:
  every_n: 5
  window_width: 960
  window_height: 720

# Overlay (BGR colours)
overlay:
  line_color: [0, 255, 0]
  box_color: [255, 0, 0]
  convergence_color: [0, 0, 255]
  grid_color: [0, 255, 0]
  line_thickness: 2
  grid_thickness: 1
  convergence_radius: 10
  intersection_radius: 5
"#;
