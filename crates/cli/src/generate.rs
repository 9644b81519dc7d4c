//! Loading inputs, running the variant pipeline and writing the result.

use std::path::{Path, PathBuf};

use anyhow::Result;
use font_glyphs::OutlineFont;
use fontvariant_core::{
    Error, FontInfo, RegionOutcome, RunConfig, RunOptions, RunSummary, VariantPipeline,
    open_alternate,
};
use log::{info, warn};

use crate::io::{read_font, write_font};

/// Inputs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub base_font: PathBuf,
    pub fontinfo: PathBuf,
    pub out_font: PathBuf,
    pub font_mode: Option<i32>,
    pub alternate_font: Option<PathBuf>,
    pub alternate_glyph_scale: f64,
    pub alternate_weight_delta: f64,
}

/// Generate variants of `base_font` and write them to `out_font`.
///
/// The output file is only created once every region has succeeded.
pub fn generate_variants(args: &GenerateArgs) -> Result<RunSummary> {
    let info = FontInfo::from_file(&args.fontinfo)?;
    let options = RunOptions {
        requested_mode: args.font_mode,
        alternate_glyph_scale: args.alternate_glyph_scale,
        alternate_weight_delta: args.alternate_weight_delta,
    };
    let config = RunConfig::new(info, options);

    let mut font = read_font(&args.base_font)?;

    let alternate = match &args.alternate_font {
        Some(path) if config.needs_alternate() => load_alternate(path)?,
        Some(path) => {
            info!("No active region uses the alternate font, ignoring {}", path.display());
            None
        }
        None => None,
    };

    let pipeline = VariantPipeline::new(&config);
    info!(
        "Repertoire of {} codepoints, {} regions, alternate weight delta {}",
        pipeline.repertoire().len(),
        config.regions.len(),
        config.alternate_weight_delta
    );
    let summary = pipeline.run(&mut font, alternate.as_ref())?;

    write_font(&font, &args.out_font)?;

    print_summary(&summary, args.out_font.display());
    Ok(summary)
}

/// Open the alternate font; an unreadable file only disables it.
fn load_alternate(path: &Path) -> Result<Option<OutlineFont>> {
    match open_alternate(path) {
        Ok(font) => {
            info!("Alternate font {}", path.display());
            Ok(Some(font))
        }
        Err(err @ Error::SourceUnavailable { .. }) => {
            warn!("{err}; alternate regions will use the base font");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn print_summary(summary: &RunSummary, output: impl std::fmt::Display) {
    for report in &summary.regions {
        match &report.outcome {
            RegionOutcome::Skipped => println!("  Region {}: skipped", report.index),
            RegionOutcome::Generated { source_kind, glyphs, fell_back } => println!(
                "  Region {}: {glyphs} glyphs from {source_kind} font{}",
                report.index,
                if *fell_back { " (alternate unavailable)" } else { "" }
            ),
        }
    }
    println!(
        "Generated {} glyphs in {} regions: {output}",
        summary.glyphs_written(),
        summary.regions_generated()
    );
}
