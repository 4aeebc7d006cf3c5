//! Utility functions shared by the frame-consuming modules.

pub mod safe_cast;

use crate::{Error, Result};
use opencv::{
    core::{Mat, Point},
    prelude::*,
};
use serde::{ser::SerializeSeq, Serializer};

/// Serialize OpenCV points as `[x, y]` pairs
///
/// # Errors
///
/// Propagates serializer errors
pub fn serialize_points<S: Serializer>(points: &[Point], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(points.len()))?;
    for p in points {
        seq.serialize_element(&[p.x, p.y])?;
    }
    seq.end()
}

/// Serialize an optional OpenCV point as `[x, y]` or `null`
///
/// # Errors
///
/// Propagates serializer errors
#[allow(clippy::ref_option)] // serde's serialize_with passes a reference to the field
pub fn serialize_opt_point<S: Serializer>(point: &Option<Point>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match point {
        Some(p) => serializer.serialize_some(&[p.x, p.y]),
        None => serializer.serialize_none(),
    }
}

/// Ensure a frame is a non-empty 3-channel 8-bit image
///
/// # Errors
///
/// Returns `InvalidInput` if the frame is empty or not `CV_8UC3`
pub fn ensure_bgr_frame(frame: &Mat) -> Result<()> {
    if frame.empty() {
        return Err(Error::InvalidInput("Frame is empty".to_string()));
    }
    if frame.typ() != opencv::core::CV_8UC3 {
        return Err(Error::InvalidInput(format!(
            "Expected a 3-channel 8-bit frame, got {} channel(s) of type {}",
            frame.channels(),
            frame.typ()
        )));
    }
    Ok(())
}
