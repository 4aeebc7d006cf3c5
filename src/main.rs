//! Photo composition assistant: leading lines, subject box and rule-of-thirds guidance.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use opencv::{core::Vector, imgcodecs};
use photo_composition::{
    analysis::{SceneAnalysis, SceneAnalyzer},
    app::{AppConfig, GuiMode, PreviewApp, VideoSource},
    composition::{Guidance, Posture},
    config::Config,
    detector::{FixedPosture, LandmarkDetector, LazyDetector, PostureClassifier, StaticLandmarks},
    frame::FrameSource,
    head_pose::GazeDirection,
    landmarks::Landmarks,
    overlay::{status_text, Overlay},
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a single image
    Analyze {
        /// Image to analyze
        #[arg(short, long)]
        image: PathBuf,

        /// Pose landmarks for the image (flat x,y,z floats)
        #[arg(short, long)]
        landmarks: Option<PathBuf>,

        /// Subject posture (forward, backward, skewed_left, skewed_right, over_shoulder_left, over_shoulder_right)
        #[arg(short, long)]
        posture: Option<String>,

        /// Write the annotated image here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Live preview from a camera or video file
    Preview {
        /// Camera index to use
        #[arg(long, default_value = "0")]
        cam: i32,

        /// Video file to process
        #[arg(short, long)]
        video: Option<String>,

        /// Pose landmarks applied to every frame
        #[arg(short, long)]
        landmarks: Option<PathBuf>,

        /// Subject posture applied to every frame
        #[arg(short, long)]
        posture: Option<String>,

        /// Recompute the analysis every N frames (overrides the config)
        #[arg(short, long)]
        every: Option<u32>,

        /// GUI display mode (all, none)
        #[arg(short, long, default_value = "all")]
        gui: String,
    },
}

/// JSON report for `analyze --json`
#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    analysis: &'a SceneAnalysis,
    gaze: Option<GazeDirection>,
    posture: Option<Posture>,
    guidance: Option<Guidance>,
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    info!("Loading configuration from: {}", path.display());
    match Config::from_file(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Failed to load config file: {}. Using defaults.", e);
            Config::default()
        }
    }
}

fn analyze(
    config: &Config,
    image: PathBuf,
    landmarks: Option<PathBuf>,
    posture: Option<String>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let posture = posture.as_deref().map(str::parse::<Posture>).transpose()?;
    let landmarks = landmarks.map(Landmarks::from_file).transpose()?;

    let display = image.display().to_string();
    let Some(frame) = FrameSource::Path(image).resolve()? else {
        bail!("Could not read image {display}");
    };

    let analyzer = SceneAnalyzer::from_config(config)?;
    let analysis = analyzer.analyze(&frame, landmarks.as_ref())?;
    let gaze = analysis.gaze(config.head_pose.gaze_threshold);
    let guidance = posture.map(|p| analysis.guidance(p));

    if json {
        let report = Report {
            analysis: &analysis,
            gaze,
            posture,
            guidance: guidance.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", status_text(&analysis, gaze, posture.map(|p| p.as_str())));
        if let Some(point) = analysis.convergence {
            println!("Convergence point: ({}, {})", point.x, point.y);
        }
        if let Some(bbox) = analysis.bounding_box {
            println!("Subject box: x={} y={} w={} h={}", bbox.x, bbox.y, bbox.width, bbox.height);
        }
        if let Some(guidance) = &guidance {
            for point in guidance.highlighted_points() {
                println!("Place the subject near ({}, {})", point.x, point.y);
            }
        }
    }

    if let Some(output) = output {
        let overlay = Overlay::new(config.overlay.clone());
        let rendered = overlay.render(&frame, &analysis, guidance.as_ref())?;
        let path = output.to_str().context("Output path is not valid UTF-8")?;
        if !imgcodecs::imwrite(path, &rendered, &Vector::new())? {
            bail!("Failed to write {path}");
        }
        info!("Annotated image written to {}", path);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    let mut config = load_config(args.config.as_ref());

    match args.command {
        Command::Analyze {
            image,
            landmarks,
            posture,
            output,
            json,
        } => analyze(&config, image, landmarks, posture, output, json)?,
        Command::Preview {
            cam,
            video,
            landmarks,
            posture,
            every,
            gui,
        } => {
            if let Some(every) = every {
                config.preview.every_n = every;
            }
            if let Some(label) = &posture {
                label.parse::<Posture>()?;
            }

            let app_config = AppConfig {
                video_source: video.map_or(VideoSource::Camera(cam), VideoSource::File),
                gui_mode: match gui.as_str() {
                    "none" => GuiMode::None,
                    _ => GuiMode::All,
                },
                settings: config,
            };

            let detector: Box<dyn LandmarkDetector> = Box::new(LazyDetector::new(move || {
                let landmarks = landmarks.as_ref().map(Landmarks::from_file).transpose()?;
                Ok(StaticLandmarks::new(landmarks))
            }));
            let classifier = posture.map(|label| Box::new(FixedPosture::new(label)) as Box<dyn PostureClassifier>);

            let mut app = PreviewApp::new(app_config, detector, classifier)?;
            app.run()?;
        }
    }

    Ok(())
}
