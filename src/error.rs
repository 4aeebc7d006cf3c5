//! Error types for the composition library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The posture classifier produced a label outside the known set
    #[error("Unrecognized posture category: {0:?} (expected one of forward, backward, skewed_left, skewed_right, over_shoulder_left, over_shoulder_right)")]
    UnknownPosture(String),

    /// Landmark detector or posture classifier failed
    #[error("Detector error: {0}")]
    DetectorError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
