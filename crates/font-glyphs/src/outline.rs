//! Editable glyph outlines.
//!
//! Outlines keep the TrueType point structure (quadratic on/off-curve points)
//! but store coordinates as `f64` so that a chain of transforms does not
//! accumulate rounding error. Coordinates are rounded once, at serialization.

use kurbo::{Affine, Point, Rect, Vec2};

use crate::winding::signed_area;

/// A single outline point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlinePoint {
    pub point: Point,
    pub on_curve: bool,
}

impl OutlinePoint {
    pub fn new(x: f64, y: f64, on_curve: bool) -> Self {
        Self { point: Point::new(x, y), on_curve }
    }

    pub fn on(x: f64, y: f64) -> Self {
        Self::new(x, y, true)
    }

    pub fn off(x: f64, y: f64) -> Self {
        Self::new(x, y, false)
    }
}

/// A closed TrueType contour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    points: Vec<OutlinePoint>,
}

impl Contour {
    pub fn new(points: Vec<OutlinePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[OutlinePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reverse the drawing direction, keeping the curve shape.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn transform(&mut self, affine: Affine) {
        for p in &mut self.points {
            p.point = affine * p.point;
        }
    }

    pub(crate) fn transformed(mut self, affine: Affine) -> Self {
        self.transform(affine);
        self
    }

    /// Push every point `strength / 2` away from the filled side.
    ///
    /// `orientation` is the sign of the whole glyph's area: negative for
    /// TrueType (clockwise outer) outlines. Ink is on the same side of travel
    /// for every contour of a correctly wound glyph, so outer contours grow and
    /// counters shrink.
    fn embolden(&mut self, strength: f64, orientation: f64) {
        let n = self.points.len();
        if n < 3 {
            return;
        }
        let half = strength / 2.0;
        let original: Vec<Point> = self.points.iter().map(|p| p.point).collect();

        for (i, p) in self.points.iter_mut().enumerate() {
            let prev = original[(i + n - 1) % n];
            let cur = original[i];
            let next = original[(i + 1) % n];
            let n1 = edge_normal(cur - prev, orientation);
            let n2 = edge_normal(next - cur, orientation);
            p.point += miter_offset(n1, n2, half);
        }
    }
}

/// Unit normal of an edge pointing away from the ink.
///
/// Positive orientation is counter-clockwise in y-up coordinates.
fn edge_normal(edge: Vec2, orientation: f64) -> Vec2 {
    let len = edge.hypot();
    if len < f64::EPSILON {
        return Vec2::ZERO;
    }
    Vec2::new(edge.y, -edge.x) * (orientation / len)
}

const MIN_MITER_DENOMINATOR: f64 = 0.25;

fn miter_offset(n1: Vec2, n2: Vec2, distance: f64) -> Vec2 {
    match (n1 == Vec2::ZERO, n2 == Vec2::ZERO) {
        (true, true) => Vec2::ZERO,
        (true, false) => n2 * distance,
        (false, true) => n1 * distance,
        (false, false) => {
            let denominator = 1.0 + n1.dot(n2);
            if denominator < MIN_MITER_DENOMINATOR {
                let bisector = n1 + n2;
                let len = bisector.hypot();
                if len < f64::EPSILON { n1 * distance } else { bisector * (distance / len) }
            } else {
                (n1 + n2) * (distance / denominator)
            }
        }
    }
}

/// The shape and metrics of one glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    pub contours: Vec<Contour>,
    pub advance_width: f64,
    pub vertical_advance: Option<f64>,
    /// Vertical origin (top side bearing plus yMax), when the font has vmtx.
    pub vertical_origin: Option<f64>,
}

impl GlyphOutline {
    pub fn new(contours: Vec<Contour>, advance_width: f64) -> Self {
        Self { contours, advance_width, ..Default::default() }
    }

    /// True if the glyph has no outline points (e.g. space).
    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(Contour::is_empty)
    }

    /// Control box of all points, or `None` for an empty outline.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.contours.iter().flat_map(|c| c.points()).map(|p| p.point);
        let first = points.next()?;
        let rect = points.fold(Rect::from_points(first, first), |rect, p| {
            Rect::new(rect.x0.min(p.x), rect.y0.min(p.y), rect.x1.max(p.x), rect.y1.max(p.y))
        });
        Some(rect)
    }

    pub fn left_side_bearing(&self) -> f64 {
        self.bounds().map(|b| b.x0).unwrap_or(0.0)
    }

    pub fn right_side_bearing(&self) -> f64 {
        self.bounds().map(|b| self.advance_width - b.x1).unwrap_or(self.advance_width)
    }

    pub fn num_points(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Apply an affine map to every point. Metrics are left untouched.
    pub fn transform(&mut self, affine: Affine) {
        for contour in &mut self.contours {
            contour.transform(affine);
        }
    }

    /// Scale advance widths and the vertical origin, matching a uniform
    /// outline scale about the origin.
    pub fn scale_metrics(&mut self, factor: f64) {
        self.advance_width *= factor;
        self.vertical_advance = self.vertical_advance.map(|v| v * factor);
        self.vertical_origin = self.vertical_origin.map(|v| v * factor);
    }

    /// Thicken stems by `strength` units, widening the advance by the same
    /// amount and keeping the left side bearing.
    pub fn embolden(&mut self, strength: f64) {
        if strength == 0.0 || self.is_empty() {
            return;
        }
        let orientation = self.contours.iter().map(signed_area).sum::<f64>().signum();
        if orientation == 0.0 {
            return;
        }
        for contour in &mut self.contours {
            contour.embolden(strength, orientation);
        }
        self.transform(Affine::translate((strength / 2.0, 0.0)));
        self.advance_width += strength;
    }
}
