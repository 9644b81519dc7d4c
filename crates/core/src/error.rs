//! Error types for variant generation.

use crate::Codepoint;

/// Result type for variant generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration is missing a required field or has the wrong shape.
    #[error("Invalid configuration '{origin}': {message}")]
    Config { origin: String, message: String },

    /// The alternate glyph source could not be opened.
    #[error("Alternate glyph source '{origin}' is unavailable: {message}")]
    SourceUnavailable { origin: String, message: String },

    /// An invariant of the run was violated; no output may be written.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The font adapter failed.
    #[error("Font error: {0}")]
    Font(#[from] font_glyphs::Error),
}

/// Fatal conditions detected while generating variants.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A repertoire codepoint has no glyph in the source the region reads from.
    #[error("Region {region}: codepoint U+{codepoint:04X} has no glyph in the {source_kind} source")]
    UnresolvableCodepoint { region: usize, codepoint: Codepoint, source_kind: &'static str },

    /// Two (region, index) pairs mapped to the same destination.
    #[error(
        "Region {region}: destination U+{codepoint:04X} was already written (range size too small?)"
    )]
    DestinationCollision { region: usize, codepoint: Codepoint },

    /// The destination falls outside the Unicode scalar value range.
    #[error("Region {region}: destination {codepoint:#X} is not a valid Unicode scalar value")]
    CodepointOutOfRange { region: usize, codepoint: u64 },

    /// A destination glyph disappeared between passes.
    #[error("Region {region}: destination U+{codepoint:04X} is missing from the output font")]
    MissingDestination { region: usize, codepoint: Codepoint },

    /// A global extent needed for scaling is zero or undefined.
    #[error("Cannot derive alternate scale: {source_kind} glyphs have no extent")]
    DegenerateBounds { source_kind: &'static str },
}
