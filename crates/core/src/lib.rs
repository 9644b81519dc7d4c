//! Fontvariant Core - configuration-driven glyph variant generation.
//!
//! A run copies a repertoire of glyphs into one private use block per active
//! region, then slants, mirrors or flips each block as the region asks.

pub mod bounds;
pub mod config;
pub mod error;
pub mod mapper;
pub mod pipeline;
pub mod source;
pub mod transform;

#[cfg(test)]
mod testing;

/// A Unicode codepoint.
pub type Codepoint = u32;

pub use bounds::{GlobalBounds, bounds_of, compute_bounds};
pub use config::{FontInfo, FormatRegion, RunConfig, RunOptions};
pub use error::{Error, PipelineError, Result};
pub use mapper::{CodepointMapper, destination_codepoint};
pub use pipeline::{RegionOutcome, RegionReport, RunSummary, VariantPipeline};
pub use source::{AlternateSource, GlyphSource, GlyphStore, PrimarySource, open_alternate};
pub use transform::Primitive;
