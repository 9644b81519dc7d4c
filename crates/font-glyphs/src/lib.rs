//! Glyph-level access to TrueType fonts.
//!
//! [`OutlineFont`] loads a `glyf`-flavoured font into editable
//! [`GlyphOutline`]s keyed by codepoint, lets callers add and transform glyphs,
//! and serializes the result with every glyph-dependent table regenerated.
//!
//! ```no_run
//! use font_glyphs::OutlineFont;
//! use kurbo::Affine;
//!
//! let mut font = OutlineFont::from_bytes(std::fs::read("Font.ttf")?)?;
//! let mut glyph = font.outline('A' as u32).cloned().unwrap_or_default();
//! glyph.transform(Affine::scale(0.5));
//! font.set_glyph(0xE000, glyph)?;
//! std::fs::write("Font-out.ttf", font.to_bytes()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod build;
mod cmap;
mod decompose;
mod error;
mod font;
pub mod outline;
pub mod winding;

pub use error::{Error, Result};
pub use font::OutlineFont;
pub use outline::{Contour, GlyphOutline, OutlinePoint};
pub use winding::correct_direction;
