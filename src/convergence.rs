//! Convergence point of a set of leading lines.
//!
//! This is a centroid heuristic: the point is the mean of the segment
//! midpoints. No perspective-line intersection is solved, so for lines that
//! converge towards a vanishing point outside their own extent the estimate
//! lands between the segments rather than at the vanishing point. That is an
//! accepted approximation; the result only drives which thirds intersection
//! gets emphasized.

use crate::{leading_lines::LineSegment, utils::safe_cast::round_to_pixel};
use opencv::core::Point;

/// Mean of segment midpoints, rounded to the nearest pixel; `None` for no segments
#[must_use]
pub fn convergence_point(segments: &[LineSegment]) -> Option<Point> {
    if segments.is_empty() {
        return None;
    }

    let (sum_x, sum_y) = segments.iter().fold((0.0, 0.0), |(sx, sy), seg| {
        let (mx, my) = seg.midpoint();
        (sx + mx, sy + my)
    });

    #[allow(clippy::cast_precision_loss)] // Segment counts are far below f64 precision
    let n = segments.len() as f64;

    // Pixel means of i32 segments always fit in i32
    let x = round_to_pixel(sum_x / n).ok()?;
    let y = round_to_pixel(sum_y / n).ok()?;
    Some(Point::new(x, y))
}
