//! CLI definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::generate::{GenerateArgs, generate_variants};

#[derive(Parser, Debug)]
#[command(name = "fontvariant")]
#[command(about = "Synthesize italic, mirrored and flipped glyph variants into private use ranges")]
pub struct Cli {
    /// TrueType font to extend
    pub base_font: PathBuf,
    /// Font info JSON describing the repertoire and variant regions
    pub fontinfo: PathBuf,
    /// Output font path
    pub out_font: PathBuf,
    /// Only generate regions whose FontModes include this mode
    #[arg(allow_negative_numbers = true)]
    pub font_mode: Option<i32>,
    /// Font supplying glyphs for Antiqua regions
    pub alternate_font: Option<PathBuf>,
    /// Extra scale for alternate glyphs after normalization
    #[arg(default_value_t = 1.0)]
    pub alternate_glyph_scale: f64,
    /// Stroke weight added to alternate glyphs, in font units
    #[arg(default_value_t = 0.0, allow_negative_numbers = true)]
    pub alternate_weight_delta: f64,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        generate_variants(&self.into_args())?;
        Ok(())
    }

    pub fn into_args(self) -> GenerateArgs {
        GenerateArgs {
            base_font: self.base_font,
            fontinfo: self.fontinfo,
            out_font: self.out_font,
            font_mode: self.font_mode,
            alternate_font: self.alternate_font,
            alternate_glyph_scale: self.alternate_glyph_scale,
            alternate_weight_delta: self.alternate_weight_delta,
        }
    }
}
