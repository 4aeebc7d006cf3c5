//! Typed view over the flat `x, y, z` landmark sequence produced by a pose detector.
//!
//! Coordinates are normalized to `[0, 1]` relative to the image; `z` is a
//! relative depth that nothing in this crate reads. Index 0 is always the
//! nose tip (MediaPipe pose topology).

use crate::{constants::LANDMARK_STRIDE, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single normalized landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Immutable landmark sequence for one image or frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmarks {
    points: Vec<Landmark>,
}

impl Landmarks {
    /// Build from the flat detector output `[x1, y1, z1, x2, y2, z2, ...]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the length is not a multiple of 3
    pub fn from_flat(values: &[f32]) -> Result<Self> {
        if values.len() % LANDMARK_STRIDE != 0 {
            return Err(Error::InvalidInput(format!(
                "Landmark sequence length {} is not a multiple of {LANDMARK_STRIDE}",
                values.len()
            )));
        }

        let points = values
            .chunks_exact(LANDMARK_STRIDE)
            .map(|c| Landmark { x: c[0], y: c[1], z: c[2] })
            .collect();

        Ok(Self { points })
    }

    /// Parse comma or whitespace separated floats, as written by the pose extraction tool
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a token is not a number or the count is not a multiple of 3
    pub fn parse(content: &str) -> Result<Self> {
        let values = content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<f32>()
                    .map_err(|e| Error::InvalidInput(format!("Invalid landmark value {token:?}: {e}")))
            })
            .collect::<Result<Vec<f32>>>()?;

        Self::from_flat(&values)
    }

    /// Load a landmark file from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::info!("Loading landmarks from: {}", path.as_ref().display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }

    /// Flatten back to detector layout, e.g. for a posture classifier feature vector
    #[must_use]
    pub fn to_flat(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }
}
