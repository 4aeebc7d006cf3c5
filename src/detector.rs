//! Seams for the external collaborators: the pose-landmark detector and the posture classifier.
//!
//! Neither model ships with this crate. Implementations plug in through the
//! traits below; [`LazyDetector`] gives callers a construct-once handle they
//! own and dispose of explicitly.

use crate::{landmarks::Landmarks, Error, Result};
use opencv::core::Mat;
use std::fmt;

/// Produces pose landmarks for a frame
pub trait LandmarkDetector {
    /// Detect landmarks; `Ok(None)` when nobody is in the frame
    ///
    /// # Errors
    ///
    /// Returns an error if the detector itself fails
    fn detect(&mut self, frame: &Mat) -> Result<Option<Landmarks>>;

    /// Detector name for logging
    fn name(&self) -> &str;
}

/// Classifies a normalized landmark feature vector into a posture label
pub trait PostureClassifier {
    /// Classify; `Ok(None)` when there is nothing to classify
    ///
    /// The label is validated by [`crate::composition::Posture`] parsing, so an
    /// out-of-contract label surfaces as `UnknownPosture` rather than being absorbed.
    ///
    /// # Errors
    ///
    /// Returns an error if the classifier itself fails
    fn classify(&self, features: &[f32]) -> Result<Option<String>>;
}

type Factory<D> = Box<dyn FnMut() -> Result<D> + Send>;

/// Caller-owned detector that is built on first use
pub struct LazyDetector<D> {
    factory: Factory<D>,
    instance: Option<D>,
}

impl<D> LazyDetector<D> {
    /// Wrap a factory; nothing is constructed until [`LazyDetector::get`]
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> Result<D> + Send + 'static,
    {
        Self {
            factory: Box::new(factory),
            instance: None,
        }
    }

    /// Return the detector, constructing it on first call
    ///
    /// # Errors
    ///
    /// Returns the factory's error if construction fails; a later call retries
    pub fn get(&mut self) -> Result<&mut D> {
        if self.instance.is_none() {
            log::info!("Constructing landmark detector");
            self.instance = Some((self.factory)()?);
        }
        self.instance
            .as_mut()
            .ok_or_else(|| Error::DetectorError("Detector was not constructed".to_string()))
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.instance.is_some()
    }

    /// Drop the constructed detector; the next `get` builds a fresh one
    pub fn dispose(&mut self) {
        if self.instance.take().is_some() {
            log::info!("Disposed landmark detector");
        }
    }
}

impl<D> fmt::Debug for LazyDetector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyDetector")
            .field("initialized", &self.instance.is_some())
            .finish()
    }
}

impl<D: LandmarkDetector> LandmarkDetector for LazyDetector<D> {
    fn detect(&mut self, frame: &Mat) -> Result<Option<Landmarks>> {
        self.get()?.detect(frame)
    }

    fn name(&self) -> &str {
        self.instance.as_ref().map_or("lazy (uninitialized)", |d| d.name())
    }
}

/// Detector that reports the same landmarks for every frame (or none)
#[derive(Debug, Clone, Default)]
pub struct StaticLandmarks {
    landmarks: Option<Landmarks>,
}

impl StaticLandmarks {
    #[must_use]
    pub fn new(landmarks: Option<Landmarks>) -> Self {
        Self { landmarks }
    }
}

impl LandmarkDetector for StaticLandmarks {
    fn detect(&mut self, _frame: &Mat) -> Result<Option<Landmarks>> {
        Ok(self.landmarks.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Classifier that always answers with one label
#[derive(Debug, Clone)]
pub struct FixedPosture {
    label: String,
}

impl FixedPosture {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl PostureClassifier for FixedPosture {
    fn classify(&self, features: &[f32]) -> Result<Option<String>> {
        if features.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.label.clone()))
    }
}
