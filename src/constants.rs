//! Constants used throughout the library

/// Values per landmark in the flat detector output (x, y, z)
pub const LANDMARK_STRIDE: usize = 3;

/// Minimum number of landmarks needed for head pose (indices 0..=10)
pub const MIN_HEAD_POSE_LANDMARKS: usize = 11;

/// MediaPipe pose landmark indices used for head pose
pub const NOSE: usize = 0;
pub const LEFT_EYE_OUTER: usize = 3;
pub const RIGHT_EYE_OUTER: usize = 6;
pub const MOUTH_LEFT: usize = 9;
pub const MOUTH_RIGHT: usize = 10;

/// Subject bounding box margins, as a fraction of the landmark extent
pub const DEFAULT_MARGIN_X_RATIO: f64 = 0.2;
pub const DEFAULT_MARGIN_Y_RATIO: f64 = 0.1;

/// Gaussian blur kernel size applied before edge detection
pub const DEFAULT_BLUR_KERNEL: i32 = 3;

/// Canny hysteresis thresholds and Sobel aperture
pub const DEFAULT_CANNY_LOW: f64 = 50.0;
pub const DEFAULT_CANNY_HIGH: f64 = 150.0;
pub const DEFAULT_CANNY_APERTURE: i32 = 3;

/// Probabilistic Hough transform parameters
pub const DEFAULT_HOUGH_RHO: f64 = 1.0;
pub const DEFAULT_HOUGH_THETA_DEGREES: f64 = 1.0;
pub const DEFAULT_HOUGH_THRESHOLD: i32 = 50;
pub const DEFAULT_MIN_LINE_LENGTH: f64 = 50.0;
pub const DEFAULT_MAX_LINE_GAP: f64 = 10.0;

/// Yaw beyond which the subject is considered to look sideways (degrees)
pub const DEFAULT_GAZE_THRESHOLD: f64 = 35.0;

/// Recompute the heavy analysis every N preview frames
pub const DEFAULT_PREVIEW_EVERY_N: u32 = 5;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
