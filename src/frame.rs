//! Frame sources resolved to the canonical decoded BGR frame.
//!
//! Callers may hold an image as a path, as encoded bytes (an upload) or as an
//! already-decoded frame. Everything downstream only ever sees the decoded
//! `Mat`, so the dispatch happens here, once, at the edge.

use crate::{utils::ensure_bgr_frame, Error, Result};
use opencv::{
    core::{Mat, Vector},
    imgcodecs,
    prelude::*,
};
use std::path::PathBuf;

/// An image in one of the forms a caller may hold it
#[derive(Debug)]
pub enum FrameSource {
    /// Image file on disk
    Path(PathBuf),
    /// Encoded image bytes (JPEG, PNG, ...)
    Encoded(Vec<u8>),
    /// Already decoded 3-channel frame
    Decoded(Mat),
}

impl FrameSource {
    /// Decode into a BGR frame
    ///
    /// A source that fails to decode yields `Ok(None)`: an absent image is a
    /// legitimate upstream outcome, and retrying is the caller's call.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A decoded frame is not 3-channel 8-bit
    /// - The path is not valid UTF-8
    /// - OpenCV fails for a reason other than undecodable data
    pub fn resolve(self) -> Result<Option<Mat>> {
        let frame = match self {
            Self::Path(path) => {
                let path_str = path
                    .to_str()
                    .ok_or_else(|| Error::InvalidInput(format!("Non UTF-8 image path: {}", path.display())))?;
                let image = imgcodecs::imread(path_str, imgcodecs::IMREAD_COLOR)?;
                if image.empty() {
                    log::warn!("Failed to read the image from {}", path.display());
                    return Ok(None);
                }
                image
            }
            Self::Encoded(bytes) => {
                if bytes.is_empty() {
                    log::warn!("Failed to decode the image from memory: no data");
                    return Ok(None);
                }
                let buffer = Vector::<u8>::from_slice(&bytes);
                let image = imgcodecs::imdecode(&buffer, imgcodecs::IMREAD_COLOR)?;
                if image.empty() {
                    log::warn!("Failed to decode the image from memory");
                    return Ok(None);
                }
                image
            }
            Self::Decoded(image) => {
                if image.empty() {
                    return Ok(None);
                }
                image
            }
        };

        ensure_bgr_frame(&frame)?;
        Ok(Some(frame))
    }
}

impl From<PathBuf> for FrameSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for FrameSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Encoded(bytes)
    }
}

impl From<Mat> for FrameSource {
    fn from(frame: Mat) -> Self {
        Self::Decoded(frame)
    }
}
