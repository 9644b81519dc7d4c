//! An editable view of a TrueType font's glyph set.

use std::collections::BTreeMap;

use log::debug;
use read_fonts::{
    FontRef, TableProvider,
    types::{GlyphId, GlyphId16, Version16Dot16},
};
use write_fonts::tables::glyf::Glyph;

use crate::{
    Error, Result, cmap,
    decompose::{read_contours, to_write_glyph},
    outline::GlyphOutline,
    winding,
};

/// One glyph slot of an [`OutlineFont`].
#[derive(Debug, Clone)]
pub(crate) struct GlyphEntry {
    pub(crate) outline: GlyphOutline,
    /// The glyph as stored in the source font, kept until the outline is edited.
    pub(crate) retained: Option<Retained>,
}

#[derive(Debug, Clone)]
pub(crate) struct Retained {
    pub(crate) glyph: Glyph,
    pub(crate) lsb: i16,
    pub(crate) tsb: Option<i16>,
}

/// A TrueType font whose glyphs can be read, added and edited by codepoint.
///
/// Composite glyphs are exposed as flattened outlines. Glyphs that are never
/// edited are written back exactly as they were read.
#[derive(Debug, Clone)]
pub struct OutlineFont {
    data: Vec<u8>,
    pub(crate) glyphs: Vec<GlyphEntry>,
    pub(crate) cmap: BTreeMap<u32, GlyphId>,
    /// Glyph names, when the source post table is version 2.
    pub(crate) glyph_names: Option<Vec<String>>,
    pub(crate) has_vertical_metrics: bool,
}

impl OutlineFont {
    /// Parse a TrueType font.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let (glyphs, cmap, glyph_names, has_vertical_metrics) = {
            let font = FontRef::new(&data)?;
            if font.fvar().is_ok() {
                return Err(Error::VariableFont);
            }
            let glyf = font.glyf().map_err(|_| Error::NoGlyf)?;
            let loca = font.loca(None).map_err(|_| Error::NoGlyf)?;
            let num_glyphs = font.maxp()?.num_glyphs();
            let hmtx = font.hmtx()?;
            let vertical = match (font.vhea(), font.vmtx()) {
                (Ok(vhea), Ok(vmtx)) => Some((vhea.number_of_long_ver_metrics() as usize, vmtx)),
                _ => None,
            };

            let mut glyphs = Vec::with_capacity(num_glyphs as usize);
            for gid in 0..num_glyphs {
                let glyph_id = GlyphId::new(u32::from(gid));
                let contours = read_contours(&loca, &glyf, glyph_id)?;
                let advance = hmtx.advance(glyph_id).unwrap_or(0);
                let lsb = hmtx.side_bearing(glyph_id).unwrap_or(0);

                let mut outline = GlyphOutline::new(contours, f64::from(advance));
                let mut tsb = None;
                if let Some((num_long, vmtx)) = &vertical {
                    let index = gid as usize;
                    let (v_advance, v_tsb) = if index < *num_long {
                        let metric = vmtx.v_metrics().get(index);
                        (
                            metric.map(|m| m.advance.get()).unwrap_or(0),
                            metric.map(|m| m.side_bearing.get()).unwrap_or(0),
                        )
                    } else {
                        let last = num_long
                            .checked_sub(1)
                            .and_then(|i| vmtx.v_metrics().get(i))
                            .map(|m| m.advance.get())
                            .unwrap_or(0);
                        let tsb = vmtx
                            .top_side_bearings()
                            .get(index - num_long)
                            .map(|b| b.get())
                            .unwrap_or(0);
                        (last, tsb)
                    };
                    let y_max = outline.bounds().map(|b| b.y1).unwrap_or(0.0);
                    outline.vertical_advance = Some(f64::from(v_advance));
                    outline.vertical_origin = Some(f64::from(v_tsb) + y_max);
                    tsb = Some(v_tsb);
                }

                let glyph = match loca.get_glyf(glyph_id, &glyf)? {
                    Some(read) => to_write_glyph(&read),
                    None => Glyph::Empty,
                };
                glyphs.push(GlyphEntry { outline, retained: Some(Retained { glyph, lsb, tsb }) });
            }

            let glyph_names = font
                .post()
                .ok()
                .filter(|post| post.version() == Version16Dot16::VERSION_2_0)
                .map(|post| {
                    (0..num_glyphs)
                        .map(|gid| {
                            post.glyph_name(GlyphId16::new(gid))
                                .map(|name| name.to_string())
                                .unwrap_or_else(|| format!("glyph{gid:05}"))
                        })
                        .collect()
                });

            (glyphs, cmap::read_mappings(&font), glyph_names, vertical.is_some())
        };

        debug!("Loaded {} glyphs, {} cmap entries", glyphs.len(), cmap.len());
        Ok(Self { data, glyphs, cmap, glyph_names, has_vertical_metrics })
    }

    /// The raw bytes this font was loaded from.
    pub fn source_data(&self) -> &[u8] {
        &self.data
    }

    pub fn num_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the codepoint is mapped to a glyph.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.cmap.contains_key(&codepoint)
    }

    pub fn glyph_id(&self, codepoint: u32) -> Option<GlyphId> {
        self.cmap.get(&codepoint).copied()
    }

    /// The outline mapped to a codepoint.
    pub fn outline(&self, codepoint: u32) -> Option<&GlyphOutline> {
        let gid = self.glyph_id(codepoint)?;
        self.glyphs.get(gid.to_u32() as usize).map(|entry| &entry.outline)
    }

    /// Mutable access to the outline mapped to a codepoint.
    ///
    /// The glyph is marked as edited and will be serialized from its outline.
    pub fn outline_mut(&mut self, codepoint: u32) -> Option<&mut GlyphOutline> {
        let gid = self.glyph_id(codepoint)?;
        let entry = self.glyphs.get_mut(gid.to_u32() as usize)?;
        entry.retained = None;
        Some(&mut entry.outline)
    }

    /// Add a new glyph and map `codepoint` to it.
    ///
    /// The glyph is always appended, so a glyph previously mapped to the
    /// codepoint (possibly shared with other codepoints) is left intact.
    pub fn set_glyph(&mut self, codepoint: u32, outline: GlyphOutline) -> Result<GlyphId> {
        let index = self.glyphs.len();
        if index >= usize::from(u16::MAX) {
            return Err(Error::TooManyGlyphs(index + 1));
        }
        let gid = GlyphId::new(index as u32);
        self.glyphs.push(GlyphEntry { outline, retained: None });
        if let Some(names) = &mut self.glyph_names {
            names.push(default_glyph_name(codepoint));
        }
        self.cmap.insert(codepoint, gid);
        Ok(gid)
    }

    /// Normalize the contour direction of the glyph mapped to `codepoint`.
    ///
    /// Returns the number of contours reversed, or `None` if unmapped.
    pub fn correct_direction(&mut self, codepoint: u32) -> Option<usize> {
        self.outline_mut(codepoint).map(winding::correct_direction)
    }
}

/// AGL-style name for a glyph created for a codepoint.
fn default_glyph_name(codepoint: u32) -> String {
    if codepoint <= 0xFFFF { format!("uni{codepoint:04X}") } else { format!("u{codepoint:05X}") }
}
