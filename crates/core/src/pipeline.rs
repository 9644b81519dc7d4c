//! The per-region variant generation passes.

use std::collections::HashSet;

use font_glyphs::GlyphOutline;
use kurbo::Rect;
use log::{debug, info, warn};

use crate::{
    Codepoint, PipelineError, Result,
    bounds::{GlobalBounds, compute_bounds},
    config::{FormatRegion, RunConfig},
    mapper::CodepointMapper,
    source::{AlternateSource, GlyphSource, GlyphStore, PrimarySource},
    transform::{Primitive, alternate_scale_factor, applied_italic_amount, apply, italic_shear},
};

/// What happened to one region during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionOutcome {
    /// The requested mode excluded this region.
    Skipped,
    Generated {
        source_kind: &'static str,
        glyphs: usize,
        /// The region asked for the alternate source but none was loaded.
        fell_back: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionReport {
    pub index: usize,
    pub outcome: RegionOutcome,
}

/// Result of a successful run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub regions: Vec<RegionReport>,
}

impl RunSummary {
    pub fn glyphs_written(&self) -> usize {
        self.regions
            .iter()
            .map(|r| match r.outcome {
                RegionOutcome::Generated { glyphs, .. } => glyphs,
                RegionOutcome::Skipped => 0,
            })
            .sum()
    }

    pub fn regions_generated(&self) -> usize {
        self.regions.iter().filter(|r| r.outcome != RegionOutcome::Skipped).count()
    }
}

/// Where a region's glyphs come from.
enum ResolvedSource<'s, A> {
    Primary { fell_back: bool },
    Alternate { source: &'s AlternateSource<'s, A>, scale: f64 },
}

/// A glyph copied into the destination, with its post-copy bounding box.
struct Placed {
    codepoint: Codepoint,
    bbox: Option<Rect>,
}

/// Generates variant regions into a destination glyph store.
///
/// The destination doubles as the primary glyph source. Nothing is written to
/// disk here; callers serialize the store only after [`run`](Self::run)
/// succeeds, so a failed run leaves no output behind.
#[derive(Debug)]
pub struct VariantPipeline<'a> {
    config: &'a RunConfig,
    repertoire: Vec<Codepoint>,
    mapper: CodepointMapper,
}

impl<'a> VariantPipeline<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            repertoire: config.repertoire(),
            mapper: CodepointMapper::new(config.private_use_base, config.region_byte_stride),
        }
    }

    pub fn repertoire(&self) -> &[Codepoint] {
        &self.repertoire
    }

    /// Run every region in order; the first failing region aborts the run.
    ///
    /// Alternate glyphs are read with the configured weight delta applied.
    pub fn run<D, A>(&self, destination: &mut D, alternate: Option<&A>) -> Result<RunSummary>
    where
        D: GlyphStore,
        A: GlyphStore,
    {
        let alternate =
            alternate.map(|store| AlternateSource::new(store, self.config.alternate_weight_delta));
        let alternate = alternate.as_ref();
        let primary_bounds = compute_bounds(&PrimarySource::new(&*destination), &self.repertoire);
        let alternate_bounds = alternate.map(|alt| compute_bounds(alt, &self.repertoire));
        debug!("Primary bounds {:?}, alternate bounds {:?}", primary_bounds, alternate_bounds);

        let mut written = HashSet::new();
        let mut summary = RunSummary::default();

        for (index, region) in self.config.regions.iter().enumerate() {
            if !region.is_active(self.config.requested_mode) {
                info!("Region {index}: not active for mode {:?}", self.config.requested_mode);
                summary.regions.push(RegionReport { index, outcome: RegionOutcome::Skipped });
                continue;
            }

            let resolved =
                self.resolve_source(index, region, alternate, &primary_bounds, alternate_bounds)?;
            let (placed, global, source_kind, fell_back) = match resolved {
                ResolvedSource::Primary { fell_back } => {
                    let primary = PrimarySource::new(&*destination);
                    let copies = self.gather(index, &primary, None, &mut written)?;
                    (self.commit(destination, copies)?, primary_bounds, "primary", fell_back)
                }
                ResolvedSource::Alternate { source, scale } => {
                    let copies = self.gather(index, source, Some(scale), &mut written)?;
                    let global = alternate_bounds.unwrap_or_default().scaled(scale);
                    (self.commit(destination, copies)?, global, source.kind(), false)
                }
            };

            let mirrored = self.italic_pass(index, region, destination, &placed)?;
            self.flip_pass(index, region, destination, &placed, &global, mirrored)?;

            info!("Region {index}: {} glyphs from the {source_kind} source", placed.len());
            summary.regions.push(RegionReport {
                index,
                outcome: RegionOutcome::Generated {
                    source_kind,
                    glyphs: placed.len(),
                    fell_back,
                },
            });
        }

        Ok(summary)
    }

    fn resolve_source<'s, A: GlyphStore>(
        &self,
        index: usize,
        region: &FormatRegion,
        alternate: Option<&'s AlternateSource<'s, A>>,
        primary_bounds: &GlobalBounds,
        alternate_bounds: Option<GlobalBounds>,
    ) -> Result<ResolvedSource<'s, A>> {
        if !region.use_alternate_source {
            return Ok(ResolvedSource::Primary { fell_back: false });
        }
        let (Some(source), Some(bounds)) = (alternate, alternate_bounds) else {
            warn!("Region {index}: no alternate glyph source loaded, using the primary font");
            return Ok(ResolvedSource::Primary { fell_back: true });
        };
        let scale =
            alternate_scale_factor(primary_bounds, &bounds, self.config.alternate_glyph_scale)
                .ok_or_else(|| {
                    let source_kind = match primary_bounds.extent_span() {
                        Some(span) if span > 0.0 => "alternate",
                        _ => "primary",
                    };
                    PipelineError::DegenerateBounds { source_kind }
                })?;
        debug!("Region {index}: alternate scale {scale:.4}");
        Ok(ResolvedSource::Alternate { source, scale })
    }

    /// Read every repertoire glyph from `source` and assign its destination.
    ///
    /// Nothing is written to the destination store yet, so a primary source
    /// can be borrowed from it.
    fn gather<S: GlyphSource + ?Sized>(
        &self,
        index: usize,
        source: &S,
        scale: Option<f64>,
        written: &mut HashSet<Codepoint>,
    ) -> Result<Vec<(Codepoint, GlyphOutline)>> {
        let mut copies = Vec::with_capacity(self.repertoire.len());
        for (position, &codepoint) in self.repertoire.iter().enumerate() {
            let destination = self.mapper.destination(index, position)?;
            if !written.insert(destination) {
                return Err(
                    PipelineError::DestinationCollision { region: index, codepoint: destination }
                        .into(),
                );
            }
            let mut outline = source
                .outline(codepoint)
                .ok_or(PipelineError::UnresolvableCodepoint {
                    region: index,
                    codepoint,
                    source_kind: source.kind(),
                })?
                .into_owned();
            if let Some(factor) = scale {
                apply(&mut outline, &[Primitive::UniformScale { factor }]);
                outline.scale_metrics(factor);
            }
            debug!("Region {index}: U+{codepoint:04X} -> U+{destination:04X}");
            copies.push((destination, outline));
        }
        Ok(copies)
    }

    fn commit<D: GlyphStore>(
        &self,
        destination: &mut D,
        copies: Vec<(Codepoint, GlyphOutline)>,
    ) -> Result<Vec<Placed>> {
        copies
            .into_iter()
            .map(|(codepoint, outline)| {
                let bbox = outline.bounds();
                destination.insert(codepoint, outline)?;
                Ok(Placed { codepoint, bbox })
            })
            .collect()
    }

    /// Mirror (when flipping horizontally) and shear every glyph of the region.
    ///
    /// Returns whether the region has already been mirrored.
    fn italic_pass<D: GlyphStore>(
        &self,
        index: usize,
        region: &FormatRegion,
        destination: &mut D,
        placed: &[Placed],
    ) -> Result<bool> {
        let Some(amount) = region.italic() else {
            return Ok(false);
        };

        if region.horizontal_flip {
            for glyph in placed {
                if let Some(bbox) = glyph.bbox {
                    let outline = destination_glyph(destination, index, glyph.codepoint)?;
                    apply(outline, &[Primitive::mirror_for(bbox)]);
                }
            }
        }

        let shear = italic_shear(applied_italic_amount(amount, region.horizontal_flip));
        for glyph in placed {
            apply(destination_glyph(destination, index, glyph.codepoint)?, &[shear]);
        }
        Ok(region.horizontal_flip)
    }

    fn flip_pass<D: GlyphStore>(
        &self,
        index: usize,
        region: &FormatRegion,
        destination: &mut D,
        placed: &[Placed],
        global: &GlobalBounds,
        mirrored: bool,
    ) -> Result<()> {
        for glyph in placed {
            let outline = destination_glyph(destination, index, glyph.codepoint)?;
            if let Some(bbox) = outline.bounds() {
                let mut ops = Vec::with_capacity(2);
                if region.horizontal_flip && !mirrored {
                    ops.push(Primitive::mirror_for(bbox));
                }
                if region.vertical_flip
                    && let Some(global) = global.rect()
                {
                    // mirroring keeps y, so the pre-mirror top is still current
                    ops.push(Primitive::flip_for(bbox.y1, global));
                }
                apply(outline, &ops);
            }
            if let Some(reversed) = destination.correct_direction(glyph.codepoint)
                && reversed > 0
            {
                debug!("U+{:04X}: reversed {reversed} contours", glyph.codepoint);
            }
        }
        Ok(())
    }
}

fn destination_glyph<D: GlyphStore>(
    destination: &mut D,
    region: usize,
    codepoint: Codepoint,
) -> Result<&mut GlyphOutline> {
    destination
        .outline_mut(codepoint)
        .ok_or(PipelineError::MissingDestination { region, codepoint }.into())
}
