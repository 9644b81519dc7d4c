//! Glyph sources the pipeline copies outlines from, and the store it writes to.

use std::{borrow::Cow, fs::read, path::Path};

use font_glyphs::{GlyphOutline, OutlineFont};
use log::debug;

use crate::{Codepoint, Error, Result};

/// Read access to outlines by codepoint.
pub trait GlyphSource {
    /// Short label for diagnostics ("primary", "alternate").
    fn kind(&self) -> &'static str;

    fn outline(&self, codepoint: Codepoint) -> Option<Cow<'_, GlyphOutline>>;
}

/// A mutable glyph set: the font being extended.
pub trait GlyphStore {
    fn outline(&self, codepoint: Codepoint) -> Option<&GlyphOutline>;

    fn outline_mut(&mut self, codepoint: Codepoint) -> Option<&mut GlyphOutline>;

    /// Add a glyph at `codepoint`, leaving any glyph previously mapped there intact.
    fn insert(&mut self, codepoint: Codepoint, outline: GlyphOutline) -> Result<()>;

    /// Normalize contour direction; returns the number of contours reversed.
    fn correct_direction(&mut self, codepoint: Codepoint) -> Option<usize>;
}

impl GlyphStore for OutlineFont {
    fn outline(&self, codepoint: Codepoint) -> Option<&GlyphOutline> {
        OutlineFont::outline(self, codepoint)
    }

    fn outline_mut(&mut self, codepoint: Codepoint) -> Option<&mut GlyphOutline> {
        OutlineFont::outline_mut(self, codepoint)
    }

    fn insert(&mut self, codepoint: Codepoint, outline: GlyphOutline) -> Result<()> {
        let gid = self.set_glyph(codepoint, outline)?;
        debug!("U+{codepoint:04X} -> glyph {}", gid.to_u32());
        Ok(())
    }

    fn correct_direction(&mut self, codepoint: Codepoint) -> Option<usize> {
        OutlineFont::correct_direction(self, codepoint)
    }
}

/// The font being extended, read as a source.
#[derive(Debug)]
pub struct PrimarySource<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: GlyphStore + ?Sized> PrimarySource<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: GlyphStore + ?Sized> GlyphSource for PrimarySource<'_, S> {
    fn kind(&self) -> &'static str {
        "primary"
    }

    fn outline(&self, codepoint: Codepoint) -> Option<Cow<'_, GlyphOutline>> {
        self.store.outline(codepoint).map(Cow::Borrowed)
    }
}

/// A secondary font whose glyphs are normalized to the primary's extent.
///
/// A non-zero weight delta emboldens every outline as it is read, so bounds
/// and copies both see the heavier shape.
#[derive(Debug)]
pub struct AlternateSource<'a, S: ?Sized> {
    store: &'a S,
    weight_delta: f64,
}

impl<'a, S: GlyphStore + ?Sized> AlternateSource<'a, S> {
    pub fn new(store: &'a S, weight_delta: f64) -> Self {
        Self { store, weight_delta }
    }

    pub fn weight_delta(&self) -> f64 {
        self.weight_delta
    }
}

impl<S: GlyphStore + ?Sized> GlyphSource for AlternateSource<'_, S> {
    fn kind(&self) -> &'static str {
        "alternate"
    }

    fn outline(&self, codepoint: Codepoint) -> Option<Cow<'_, GlyphOutline>> {
        let outline = self.store.outline(codepoint)?;
        if self.weight_delta == 0.0 {
            return Some(Cow::Borrowed(outline));
        }
        let mut heavier = outline.clone();
        heavier.embolden(self.weight_delta);
        Some(Cow::Owned(heavier))
    }
}

/// Load the alternate font.
///
/// Any failure is reported as [`Error::SourceUnavailable`], which callers
/// may downgrade to a warning.
pub fn open_alternate(path: impl AsRef<Path>) -> Result<OutlineFont> {
    let path = path.as_ref();
    let unavailable = |message: String| Error::SourceUnavailable {
        origin: path.display().to_string(),
        message,
    };
    let data = read(path).map_err(|e| unavailable(e.to_string()))?;
    OutlineFont::from_bytes(data).map_err(|e| unavailable(e.to_string()))
}
