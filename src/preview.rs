//! Frame cadence for live preview.
//!
//! Line detection is the expensive step, so a preview loop only recomputes the
//! analysis every N frames and redraws the cached result in between.

use crate::{
    analysis::{SceneAnalysis, SceneAnalyzer},
    composition::Posture,
    landmarks::Landmarks,
    Error, Result,
};
use opencv::core::Mat;

/// Caller-owned cache of the most recent analysis
#[derive(Debug, Clone)]
pub struct PreviewCache {
    every_n: u32,
    frame_counter: u64,
    last: Option<SceneAnalysis>,
    posture: Option<Posture>,
}

impl PreviewCache {
    /// Create a cache that recomputes every `every_n` frames
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `every_n` is 0
    pub fn new(every_n: u32) -> Result<Self> {
        if every_n == 0 {
            return Err(Error::ConfigError(
                "Preview recompute interval must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            every_n,
            frame_counter: 0,
            last: None,
            posture: None,
        })
    }

    #[must_use]
    pub fn every_n(&self) -> u32 {
        self.every_n
    }

    /// Number of frames seen since creation or the last reset
    #[must_use]
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    /// Whether the next `update` will recompute
    #[must_use]
    pub fn is_due(&self) -> bool {
        self.last.is_none() || self.frame_counter % u64::from(self.every_n) == 0
    }

    /// Advance one frame, recomputing the analysis when due
    ///
    /// # Errors
    ///
    /// Propagates analysis errors; the frame still counts and the previous
    /// analysis is kept
    pub fn update(
        &mut self,
        analyzer: &SceneAnalyzer,
        frame: &Mat,
        landmarks: Option<&Landmarks>,
    ) -> Result<&SceneAnalysis> {
        let due = self.is_due();
        self.frame_counter += 1;

        if due {
            log::debug!("Recomputing analysis at frame {}", self.frame_counter - 1);
            self.last = Some(analyzer.analyze(frame, landmarks)?);
        }

        self.last
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("No analysis available yet".to_string()))
    }

    /// Most recent analysis, if any
    #[must_use]
    pub fn last(&self) -> Option<&SceneAnalysis> {
        self.last.as_ref()
    }

    #[must_use]
    pub fn posture(&self) -> Option<Posture> {
        self.posture
    }

    pub fn set_posture(&mut self, posture: Option<Posture>) {
        self.posture = posture;
    }

    /// Forget everything; the next frame recomputes
    pub fn reset(&mut self) {
        self.frame_counter = 0;
        self.last = None;
        self.posture = None;
    }
}
