//! Drawing the analysis and composition guidance onto a frame.

use crate::{
    analysis::SceneAnalysis,
    composition::{Guidance, Intersection, ThirdsGrid},
    config::OverlayConfig,
    head_pose::GazeDirection,
    leading_lines::LineSegment,
    subject::BoundingBox,
    utils::ensure_bgr_frame,
    Result,
};
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

fn color(bgr: [u8; 3]) -> Scalar {
    Scalar::new(f64::from(bgr[0]), f64::from(bgr[1]), f64::from(bgr[2]), 0.0)
}

/// Renders analysis results with configurable colours and sizes
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    config: OverlayConfig,
}

impl Overlay {
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    /// Draw everything onto a copy of `frame`
    ///
    /// Without guidance the grid is drawn with no emphasized intersection.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is not a 3-channel 8-bit image or drawing fails
    pub fn render(&self, frame: &Mat, analysis: &SceneAnalysis, guidance: Option<&Guidance>) -> Result<Mat> {
        ensure_bgr_frame(frame)?;
        let mut canvas = frame.try_clone()?;

        self.draw_lines(&mut canvas, &analysis.lines)?;
        if let Some(bbox) = analysis.bounding_box {
            self.draw_bounding_box(&mut canvas, bbox)?;
        }
        if let Some(point) = analysis.convergence {
            self.draw_convergence(&mut canvas, point)?;
        }
        match guidance {
            Some(guidance) => self.draw_guidance(&mut canvas, guidance)?,
            None => {
                let grid = ThirdsGrid::new(canvas.cols(), canvas.rows());
                self.draw_grid(&mut canvas, &grid, &[])?;
            }
        }

        Ok(canvas)
    }

    pub fn draw_lines(&self, canvas: &mut Mat, lines: &[LineSegment]) -> Result<()> {
        let line_color = color(self.config.line_color);
        for segment in lines {
            imgproc::line(
                canvas,
                Point::new(segment.x1, segment.y1),
                Point::new(segment.x2, segment.y2),
                line_color,
                self.config.line_thickness,
                LINE_8,
                0,
            )?;
        }
        Ok(())
    }

    pub fn draw_bounding_box(&self, canvas: &mut Mat, bbox: BoundingBox) -> Result<()> {
        imgproc::rectangle(
            canvas,
            bbox.into(),
            color(self.config.box_color),
            self.config.line_thickness,
            LINE_8,
            0,
        )?;
        Ok(())
    }

    pub fn draw_convergence(&self, canvas: &mut Mat, point: Point) -> Result<()> {
        imgproc::circle(
            canvas,
            point,
            self.config.convergence_radius,
            color(self.config.convergence_color),
            imgproc::FILLED,
            LINE_8,
            0,
        )?;
        Ok(())
    }

    pub fn draw_guidance(&self, canvas: &mut Mat, guidance: &Guidance) -> Result<()> {
        self.draw_grid(canvas, &guidance.grid, &guidance.highlighted)
    }

    /// Grid lines plus a dot per intersection; highlighted dots are twice as large
    pub fn draw_grid(&self, canvas: &mut Mat, grid: &ThirdsGrid, highlighted: &[Intersection]) -> Result<()> {
        let grid_color = color(self.config.grid_color);

        for x in grid.vertical_lines() {
            imgproc::line(
                canvas,
                Point::new(x, 0),
                Point::new(x, grid.height),
                grid_color,
                self.config.grid_thickness,
                LINE_8,
                0,
            )?;
        }
        for y in grid.horizontal_lines() {
            imgproc::line(
                canvas,
                Point::new(0, y),
                Point::new(grid.width, y),
                grid_color,
                self.config.grid_thickness,
                LINE_8,
                0,
            )?;
        }

        for intersection in Intersection::ALL {
            let radius = self.dot_radius(highlighted.contains(&intersection));
            imgproc::circle(
                canvas,
                grid.point(intersection),
                radius,
                grid_color,
                imgproc::FILLED,
                LINE_8,
                0,
            )?;
        }

        Ok(())
    }

    /// Highlighted intersections get a dot twice the configured radius
    fn dot_radius(&self, highlighted: bool) -> i32 {
        if highlighted {
            self.config.intersection_radius.saturating_mul(2)
        } else {
            self.config.intersection_radius
        }
    }

    /// Status line in the top-left corner
    pub fn draw_status(&self, canvas: &mut Mat, text: &str) -> Result<()> {
        imgproc::put_text(
            canvas,
            text,
            Point::new(10, 30),
            FONT_HERSHEY_SIMPLEX,
            0.7,
            Scalar::new(0.0, 255.0, 255.0, 0.0),
            2,
            LINE_8,
            false,
        )?;
        Ok(())
    }
}

/// Human-readable summary of an analysis for the status line
#[must_use]
pub fn status_text(analysis: &SceneAnalysis, gaze: Option<GazeDirection>, posture: Option<&str>) -> String {
    let mut parts = vec![format!("Lines: {}", analysis.lines.len())];
    if let Some(pose) = analysis.head_pose {
        parts.push(format!("Roll: {:.1} Yaw: {:.1} Pitch: {:.1}", pose.roll, pose.yaw, pose.pitch));
    }
    if let Some(gaze) = gaze {
        parts.push(format!("Gaze: {gaze}"));
    }
    if let Some(posture) = posture {
        parts.push(format!("Posture: {posture}"));
    }
    parts.join(" | ")
}
