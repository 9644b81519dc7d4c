//! In-memory glyph stores for unit tests.

use std::collections::BTreeMap;

use font_glyphs::{Contour, GlyphOutline, OutlinePoint};

use crate::{Codepoint, Result, source::GlyphStore};

#[derive(Debug, Default, Clone)]
pub(crate) struct MapStore(pub(crate) BTreeMap<Codepoint, GlyphOutline>);

impl MapStore {
    pub(crate) fn with(glyphs: impl IntoIterator<Item = (Codepoint, GlyphOutline)>) -> Self {
        Self(glyphs.into_iter().collect())
    }
}

impl GlyphStore for MapStore {
    fn outline(&self, codepoint: Codepoint) -> Option<&GlyphOutline> {
        self.0.get(&codepoint)
    }

    fn outline_mut(&mut self, codepoint: Codepoint) -> Option<&mut GlyphOutline> {
        self.0.get_mut(&codepoint)
    }

    fn insert(&mut self, codepoint: Codepoint, outline: GlyphOutline) -> Result<()> {
        self.0.insert(codepoint, outline);
        Ok(())
    }

    fn correct_direction(&mut self, codepoint: Codepoint) -> Option<usize> {
        self.0.get_mut(&codepoint).map(font_glyphs::correct_direction)
    }
}

/// Clockwise rectangle with the advance at `x1 + x0`.
pub(crate) fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> GlyphOutline {
    GlyphOutline::new(
        vec![Contour::new(vec![
            OutlinePoint::on(x0, y0),
            OutlinePoint::on(x0, y1),
            OutlinePoint::on(x1, y1),
            OutlinePoint::on(x1, y0),
        ])],
        x1 + x0,
    )
}

/// A glyph with no contours, like space.
pub(crate) fn blank(advance: f64) -> GlyphOutline {
    GlyphOutline::new(Vec::new(), advance)
}
