//! Interactive composition preview over a camera or video file.

use crate::{
    analysis::SceneAnalyzer,
    composition::Posture,
    config::Config,
    detector::{LandmarkDetector, PostureClassifier},
    error::Result,
    landmarks::Landmarks,
    overlay::{status_text, Overlay},
    preview::PreviewCache,
    utils::ensure_bgr_frame,
};
use log::{info, warn};
use opencv::{
    core::Mat,
    highgui::{self, WINDOW_NORMAL},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE},
};
use std::time::Instant;

const WINDOW_NAME: &str = "Photo Composition";

/// Preview application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Camera index or video file path
    pub video_source: VideoSource,
    /// GUI display mode
    pub gui_mode: GuiMode,
    /// Analysis, cadence and overlay settings
    pub settings: Config,
}

/// Video source type
#[derive(Debug, Clone)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// GUI display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiMode {
    /// Show the preview window
    All,
    /// No GUI (headless)
    None,
}

/// Live preview: detect landmarks, analyze on cadence, draw and show
pub struct PreviewApp {
    config: AppConfig,
    analyzer: SceneAnalyzer,
    overlay: Overlay,
    cache: PreviewCache,
    detector: Box<dyn LandmarkDetector>,
    classifier: Option<Box<dyn PostureClassifier>>,
    video_capture: VideoCapture,
}

impl PreviewApp {
    /// Open the video source and prepare the window
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the source cannot be opened
    pub fn new(
        config: AppConfig,
        detector: Box<dyn LandmarkDetector>,
        classifier: Option<Box<dyn PostureClassifier>>,
    ) -> Result<Self> {
        info!("Initializing composition preview");

        let analyzer = SceneAnalyzer::from_config(&config.settings)?;
        let overlay = Overlay::new(config.settings.overlay.clone());
        let cache = PreviewCache::new(config.settings.preview.every_n)?;

        let video_capture = match &config.video_source {
            VideoSource::Camera(index) => {
                info!("Opening camera {}", index);
                let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)?;
                cap.set(CAP_PROP_BUFFERSIZE, 1.0)?;
                cap
            }
            VideoSource::File(path) => {
                info!("Opening video file: {}", path);
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };
        if !video_capture.is_opened()? {
            return Err(crate::Error::InvalidInput(format!(
                "Could not open video source {:?}",
                config.video_source
            )));
        }

        if config.gui_mode == GuiMode::All {
            highgui::named_window(WINDOW_NAME, WINDOW_NORMAL)?;
            highgui::resize_window(
                WINDOW_NAME,
                config.settings.preview.window_width,
                config.settings.preview.window_height,
            )?;
        }

        info!(
            "Using {} detector, recomputing every {} frames",
            detector.name(),
            cache.every_n()
        );

        Ok(Self {
            config,
            analyzer,
            overlay,
            cache,
            detector,
            classifier,
            video_capture,
        })
    }

    /// Run until end of file, or `q`/Esc in the window
    ///
    /// # Errors
    ///
    /// Returns an error if detection, analysis or display fails
    pub fn run(&mut self) -> Result<()> {
        info!("Starting preview loop");

        let start_time = Instant::now();
        let mut frame_count: u64 = 0;

        loop {
            let mut frame = Mat::default();
            if !self.video_capture.read(&mut frame)? || frame.empty() {
                if matches!(self.config.video_source, VideoSource::File(_)) {
                    info!("End of video file reached");
                    break;
                }
                warn!("Failed to read frame, retrying...");
                continue;
            }

            let rendered = self.process_frame(&frame)?;
            frame_count += 1;

            if self.config.gui_mode == GuiMode::All {
                highgui::imshow(WINDOW_NAME, &rendered)?;
                let key = highgui::wait_key(1)?;
                if key == 27 || key == i32::from(b'q') {
                    info!("Exit requested by user");
                    break;
                }
            }
        }

        let elapsed = start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            #[allow(clippy::cast_precision_loss)]
            let fps = frame_count as f64 / elapsed;
            info!("Processed {} frames ({:.1} fps)", frame_count, fps);
        }
        if self.config.gui_mode == GuiMode::All {
            highgui::destroy_all_windows()?;
        }
        self.cache.reset();
        info!("Preview shutting down");
        Ok(())
    }

    /// Analyze one frame (on cadence) and return it with the overlay drawn
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is not BGR, a collaborator fails, or the
    /// classifier reports an unknown posture
    pub fn process_frame(&mut self, frame: &Mat) -> Result<Mat> {
        ensure_bgr_frame(frame)?;
        let landmarks = self.detector.detect(frame)?;

        if self.cache.is_due() {
            let posture = self.classify(landmarks.as_ref())?;
            self.cache.set_posture(posture);
        }
        let posture = self.cache.posture();

        let threshold = self.analyzer.head_pose_estimator().gaze_threshold();
        let analysis = self.cache.update(&self.analyzer, frame, landmarks.as_ref())?;
        let guidance = posture.map(|p| analysis.guidance(p));

        let mut rendered = self.overlay.render(frame, analysis, guidance.as_ref())?;
        let status = status_text(analysis, analysis.gaze(threshold), posture.map(|p| p.as_str()));
        self.overlay.draw_status(&mut rendered, &status)?;

        Ok(rendered)
    }

    fn classify(&self, landmarks: Option<&Landmarks>) -> Result<Option<Posture>> {
        let (Some(classifier), Some(landmarks)) = (&self.classifier, landmarks) else {
            return Ok(None);
        };
        classifier
            .classify(&landmarks.to_flat())?
            .map(|label| label.parse::<Posture>())
            .transpose()
    }
}
