//! Contour direction normalization.
//!
//! Mirroring or flipping a glyph reverses the direction of every contour. TrueType
//! rasterizers expect outer contours to run clockwise and counters to run
//! counter-clockwise, so after such transforms the contours are re-oriented by
//! nesting depth.

use kurbo::{BezPath, Point, Shape};

use crate::outline::{Contour, GlyphOutline};

const WINDING_TOLERANCE: f64 = 0.1;

/// Convert a TrueType contour to a closed quadratic path.
///
/// Consecutive off-curve points imply an on-curve point at their midpoint. A
/// contour made only of off-curve points starts at the midpoint of its last and
/// first points.
pub fn contour_to_path(contour: &Contour) -> BezPath {
    let points = contour.points();
    let mut path = BezPath::new();
    if points.is_empty() {
        return path;
    }

    let n = points.len();
    let (start, first_index) = match points.iter().position(|p| p.on_curve) {
        Some(i) => (points[i].point, i),
        None => (points[n - 1].point.midpoint(points[0].point), n - 1),
    };

    path.move_to(start);
    let mut pending: Option<Point> = None;
    for offset in 1..=n {
        let p = points[(first_index + offset) % n];
        match (p.on_curve, pending.take()) {
            (true, Some(ctrl)) => path.quad_to(ctrl, p.point),
            (true, None) => path.line_to(p.point),
            (false, Some(ctrl)) => {
                path.quad_to(ctrl, ctrl.midpoint(p.point));
                pending = Some(p.point);
            }
            (false, None) => pending = Some(p.point),
        }
    }
    if let Some(ctrl) = pending {
        path.quad_to(ctrl, start);
    }
    path.close_path();
    path
}

/// Signed area of a contour; positive means counter-clockwise in y-up space.
pub fn signed_area(contour: &Contour) -> f64 {
    contour_to_path(contour).area()
}

/// The on-curve points of a contour, or all of its points if it has none.
fn sample_points(contour: &Contour) -> Vec<Point> {
    let points = contour.points();
    let on_curve: Vec<Point> = points.iter().filter(|p| p.on_curve).map(|p| p.point).collect();
    if on_curve.is_empty() { points.iter().map(|p| p.point).collect() } else { on_curve }
}

/// Re-orient every contour so that even nesting depths run clockwise and odd
/// depths run counter-clockwise.
///
/// A contour is nested in another only when all of its sample points lie inside
/// it, so overlapping outer contours keep the same direction.
///
/// Returns the number of contours that were reversed.
pub fn correct_direction(outline: &mut GlyphOutline) -> usize {
    let paths: Vec<BezPath> = outline.contours.iter().map(contour_to_path).collect();
    let mut reversed = 0;

    for (i, contour) in outline.contours.iter_mut().enumerate() {
        let samples = sample_points(contour);
        if samples.is_empty() {
            continue;
        }
        let area = paths[i].area();
        if area.abs() < WINDING_TOLERANCE {
            continue;
        }
        let depth = paths
            .iter()
            .enumerate()
            .filter(|(j, path)| *j != i && samples.iter().all(|p| path.winding(*p) != 0))
            .count();
        let want_clockwise = depth % 2 == 0;
        let is_clockwise = area < 0.0;
        if want_clockwise != is_clockwise {
            contour.reverse();
            reversed += 1;
        }
    }
    reversed
}
