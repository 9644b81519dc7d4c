use std::result;

use read_fonts::ReadError;
use write_fonts::{BuilderError, error, tables::cmap::CmapConflict};

/// Error types for font-glyphs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("no glyf table (CFF outlines not supported)")]
    NoGlyf,

    #[error("variable fonts are not supported (fvar table present)")]
    VariableFont,

    #[error("component nesting deeper than {limit} levels in glyph {glyph_id}")]
    ComponentDepth { glyph_id: u32, limit: usize },

    #[error("component anchor point {index} out of range in glyph {glyph_id}")]
    AnchorPoint { glyph_id: u32, index: u16 },

    #[error("glyph count {0} exceeds the 65535 glyph limit")]
    TooManyGlyphs(usize),

    #[error("failed to build cmap: {0}")]
    Cmap(#[from] CmapConflict),

    #[error("failed to build font: {0}")]
    Build(#[from] BuilderError),

    #[error("failed to write table: {0}")]
    Write(#[from] error::Error),
}

pub type Result<T> = result::Result<T, Error>;
