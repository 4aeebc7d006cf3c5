//! Photo composition assistance from pose landmarks and scene geometry.
//!
//! Given a frame and the pose landmarks of the person in it, this library:
//! - Locates the subject and masks it out of the scene
//! - Finds leading lines in the background with Canny and probabilistic Hough (`OpenCV`)
//! - Estimates where those lines converge
//! - Estimates coarse head orientation (roll, yaw, pitch) from five facial landmarks
//! - Recommends rule-of-thirds intersections for the subject's posture
//!
//! Landmark detection and posture classification are external models; they
//! plug in through the traits in [`detector`].
//!
//! # Examples
//!
//! ## Single Image
//!
//! ```no_run
//! use photo_composition::{
//!     analysis::SceneAnalyzer, composition::Posture, frame::FrameSource, landmarks::Landmarks,
//! };
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let landmarks = Landmarks::from_file("pose.txt")?;
//! let Some(frame) = FrameSource::Path(PathBuf::from("portrait.jpg")).resolve()? else {
//!     return Ok(());
//! };
//!
//! let analyzer = SceneAnalyzer::default();
//! let analysis = analyzer.analyze(&frame, Some(&landmarks))?;
//! println!("{} leading lines, convergence {:?}", analysis.lines.len(), analysis.convergence);
//!
//! let guidance = analysis.guidance(Posture::SkewedLeft);
//! for point in guidance.highlighted_points() {
//!     println!("Place the subject near ({}, {})", point.x, point.y);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Video Cadence
//!
//! ```no_run
//! use photo_composition::{analysis::SceneAnalyzer, overlay::Overlay, preview::PreviewCache};
//! use opencv::{videoio, core::Mat, highgui, prelude::*};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = SceneAnalyzer::default();
//! let overlay = Overlay::default();
//! let mut cache = PreviewCache::new(5)?;
//!
//! let mut cap = videoio::VideoCapture::new(0, videoio::CAP_ANY)?;
//! let mut frame = Mat::default();
//! while cap.read(&mut frame)? {
//!     let analysis = cache.update(&analyzer, &frame, None)?;
//!     let rendered = overlay.render(&frame, analysis, None)?;
//!     highgui::imshow("Preview", &rendered)?;
//!     if highgui::wait_key(1)? == i32::from(b'q') {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Subject bounding box from landmark extrema
pub mod subject;

/// Leading-line extraction with the subject masked out
pub mod leading_lines;

/// Convergence point of detected segments
pub mod convergence;

/// Geometric head pose and gaze direction
pub mod head_pose;

/// Rule-of-thirds grid and posture policy
pub mod composition;

/// Drawing analysis results onto frames
pub mod overlay;

/// Pose landmark sequences
pub mod landmarks;

/// Image inputs resolved to decoded frames
pub mod frame;

/// Landmark detector and posture classifier seams
pub mod detector;

/// One-call scene analysis
pub mod analysis;

/// Frame cadence for live preview
pub mod preview;

/// Main application logic
pub mod app;

/// Configuration management
pub mod config;

/// Algorithm constants
pub mod constants;

/// Error types for the library
pub mod error;

/// Utility functions
pub mod utils;

pub use error::{Error, Result};
