//! Aggregate bounding boxes over a repertoire.

use kurbo::Rect;

use crate::{Codepoint, source::GlyphSource};

/// Union of the bounding boxes of every inked glyph in a repertoire.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobalBounds(Option<Rect>);

impl GlobalBounds {
    /// No glyph contributed; every query on it yields `None`.
    pub const EMPTY: Self = GlobalBounds(None);

    pub fn from_rect(rect: Rect) -> Self {
        GlobalBounds(Some(rect))
    }

    pub fn rect(&self) -> Option<Rect> {
        self.0
    }

    /// Fold one glyph bounding box into the accumulator.
    pub fn include(&mut self, bbox: Rect) {
        self.0 = Some(match self.0 {
            Some(rect) => rect.union(bbox),
            None => bbox,
        });
    }

    /// `max(width, height)`, used to normalize alternate glyphs.
    pub fn extent_span(&self) -> Option<f64> {
        self.0.map(|rect| rect.width().max(rect.height()))
    }

    /// The bounds after a uniform scale about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        GlobalBounds(self.0.map(|rect| rect.scale_from_origin(factor)))
    }
}

/// Aggregate bounds of `codepoints` in `source`.
///
/// Codepoints without a glyph, and glyphs without contours, are skipped.
pub fn compute_bounds<S>(source: &S, codepoints: &[Codepoint]) -> GlobalBounds
where
    S: GlyphSource + ?Sized,
{
    let mut bounds = GlobalBounds::EMPTY;
    for &codepoint in codepoints {
        if let Some(bbox) = bounds_of(source, codepoint) {
            bounds.include(bbox);
        }
    }
    bounds
}

/// Bounding box of a single glyph in `source`.
pub fn bounds_of<S>(source: &S, codepoint: Codepoint) -> Option<Rect>
where
    S: GlyphSource + ?Sized,
{
    source.outline(codepoint)?.bounds()
}
