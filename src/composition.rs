//! Rule-of-thirds grid and posture-driven intersection emphasis.

use crate::{utils::serialize_points, Error, Result};
use opencv::core::Point;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Coarse subject orientation as reported by the posture classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    Forward,
    Backward,
    SkewedLeft,
    SkewedRight,
    OverShoulderLeft,
    OverShoulderRight,
}

impl Posture {
    pub const ALL: [Self; 6] = [
        Self::Forward,
        Self::Backward,
        Self::SkewedLeft,
        Self::SkewedRight,
        Self::OverShoulderLeft,
        Self::OverShoulderRight,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::SkewedLeft => "skewed_left",
            Self::SkewedRight => "skewed_right",
            Self::OverShoulderLeft => "over_shoulder_left",
            Self::OverShoulderRight => "over_shoulder_right",
        }
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Posture {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == label)
            .ok_or_else(|| Error::UnknownPosture(label.to_string()))
    }
}

/// The four inner intersections, in enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intersection {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Intersection {
    pub const ALL: [Self; 4] = [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight];

    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}

/// Rule-of-thirds grid for one image size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThirdsGrid {
    pub width: i32,
    pub height: i32,
    #[serde(serialize_with = "serialize_points")]
    pub points: [Point; 4],
}

impl ThirdsGrid {
    /// Grid lines at integer thirds of the image
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let dx = width / 3;
        let dy = height / 3;
        Self {
            width,
            height,
            points: [
                Point::new(dx, dy),
                Point::new(2 * dx, dy),
                Point::new(dx, 2 * dy),
                Point::new(2 * dx, 2 * dy),
            ],
        }
    }

    #[must_use]
    pub fn point(&self, intersection: Intersection) -> Point {
        self.points[intersection.index()]
    }

    /// Vertical line x positions
    #[must_use]
    pub fn vertical_lines(&self) -> [i32; 2] {
        [self.points[0].x, self.points[1].x]
    }

    /// Horizontal line y positions
    #[must_use]
    pub fn horizontal_lines(&self) -> [i32; 2] {
        [self.points[0].y, self.points[2].y]
    }

    /// Intersection closest to `target`; ties go to the earlier one in enumeration order
    #[must_use]
    pub fn nearest(&self, target: Point) -> Intersection {
        let distance = |p: Point| {
            let dx = f64::from(p.x) - f64::from(target.x);
            let dy = f64::from(p.y) - f64::from(target.y);
            dx.hypot(dy)
        };

        let mut best = Intersection::TopLeft;
        let mut best_distance = distance(self.point(best));
        for candidate in &Intersection::ALL[1..] {
            let d = distance(self.point(*candidate));
            if d < best_distance {
                best = *candidate;
                best_distance = d;
            }
        }
        best
    }
}

/// Grid plus the intersections to emphasize
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guidance {
    pub grid: ThirdsGrid,
    pub highlighted: Vec<Intersection>,
}

impl Guidance {
    #[must_use]
    pub fn is_highlighted(&self, intersection: Intersection) -> bool {
        self.highlighted.contains(&intersection)
    }

    #[must_use]
    pub fn highlighted_points(&self) -> Vec<Point> {
        self.highlighted.iter().map(|i| self.grid.point(*i)).collect()
    }
}

/// Which intersections to emphasize for a posture
///
/// A subject facing the camera (or away from it) is anchored to the intersection
/// nearest the leading-line convergence point; a subject turned to one side gets
/// the opposite pair of intersections so there is room in the direction they face.
#[must_use]
pub fn highlighted_intersections(grid: &ThirdsGrid, posture: Posture, convergence: Option<Point>) -> Vec<Intersection> {
    match posture {
        Posture::Forward | Posture::Backward => convergence.map(|p| grid.nearest(p)).into_iter().collect(),
        Posture::SkewedLeft | Posture::OverShoulderLeft => vec![Intersection::TopRight, Intersection::BottomRight],
        Posture::SkewedRight | Posture::OverShoulderRight => vec![Intersection::TopLeft, Intersection::BottomLeft],
    }
}

/// Build the grid for an image and select highlighted intersections
#[must_use]
pub fn guide(width: i32, height: i32, posture: Posture, convergence: Option<Point>) -> Guidance {
    let grid = ThirdsGrid::new(width, height);
    let highlighted = highlighted_intersections(&grid, posture, convergence);
    log::debug!("Posture {} highlights {:?}", posture, highlighted);
    Guidance { grid, highlighted }
}

/// Like [`guide`], for a raw classifier label
///
/// # Errors
///
/// Returns `UnknownPosture` if the label is not one of the known categories
pub fn guide_for_label(width: i32, height: i32, label: &str, convergence: Option<Point>) -> Result<Guidance> {
    let posture = label.parse::<Posture>()?;
    Ok(guide(width, height, posture, convergence))
}
