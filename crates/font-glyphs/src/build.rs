//! Serializing an [`OutlineFont`] back to a TrueType binary.
//!
//! Tables that depend on the glyph set are regenerated; every other table is
//! copied verbatim from the source font, except for a few glyph-count dependent
//! tables that cannot be regenerated and are dropped.

use read_fonts::{FontRef, TableProvider, tables::glyf::CurvePoint, types::Tag};
use write_fonts::{
    FontBuilder,
    from_obj::ToOwnedTable,
    tables::{
        cmap::Cmap,
        glyf::{Bbox, Contour, GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        post::Post,
        vmtx::{LongMetric as VerticalMetric, Vmtx},
    },
};

use crate::{
    Error, Result,
    font::{GlyphEntry, OutlineFont},
    outline::GlyphOutline,
};

const GLYF: Tag = Tag::new(b"glyf");
const LOCA: Tag = Tag::new(b"loca");
const HMTX: Tag = Tag::new(b"hmtx");
const HHEA: Tag = Tag::new(b"hhea");
const MAXP: Tag = Tag::new(b"maxp");
const HEAD: Tag = Tag::new(b"head");
const CMAP: Tag = Tag::new(b"cmap");
const POST: Tag = Tag::new(b"post");
const VMTX: Tag = Tag::new(b"vmtx");
const VHEA: Tag = Tag::new(b"vhea");

/// Tables sized by glyph count that we do not know how to regenerate.
const DROPPED_TABLES: [Tag; 4] =
    [Tag::new(b"hdmx"), Tag::new(b"LTSH"), Tag::new(b"VDMX"), Tag::new(b"DSIG")];

/// Byte offset of numOfLongVerMetrics in the vhea table.
const VHEA_NUM_LONG_METRICS_OFFSET: usize = 34;

/// Per-glyph values gathered while writing glyf, reused by the metric tables.
struct WrittenGlyph {
    bbox: Option<Bbox>,
    advance: u16,
    lsb: i16,
    v_advance: u16,
    tsb: i16,
    num_points: usize,
    num_contours: usize,
}

impl OutlineFont {
    /// Serialize the font, including all added and edited glyphs.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let font = FontRef::new(self.source_data())?;
        let num_glyphs = u16::try_from(self.glyphs.len())
            .map_err(|_| Error::TooManyGlyphs(self.glyphs.len()))?;
        let rebuild_post = self.glyph_names.is_some();

        let mut builder = FontBuilder::new();
        for record in font.table_directory.table_records() {
            let tag = record.tag();
            let regenerated = [GLYF, LOCA, HMTX, HHEA, MAXP, HEAD, CMAP, VMTX, VHEA].contains(&tag)
                || (tag == POST && rebuild_post);
            if regenerated || DROPPED_TABLES.contains(&tag) {
                continue;
            }
            if let Some(table_data) = font.table_data(tag) {
                builder.add_raw(tag, table_data);
            }
        }

        let mut glyf_builder = GlyfLocaBuilder::new();
        let mut written = Vec::with_capacity(self.glyphs.len());
        for entry in &self.glyphs {
            let (glyph, info) = write_glyph(entry);
            glyf_builder.add_glyph(&glyph)?;
            written.push(info);
        }
        let (glyf, loca, loca_format) = glyf_builder.build();
        builder.add_table(&glyf)?;
        builder.add_table(&loca)?;

        let font_bbox = written
            .iter()
            .filter_map(|g| g.bbox)
            .reduce(Bbox::union)
            .unwrap_or_default();

        let mut head: Head = font.head()?.to_owned_table();
        head.x_min = font_bbox.x_min;
        head.y_min = font_bbox.y_min;
        head.x_max = font_bbox.x_max;
        head.y_max = font_bbox.y_max;
        head.index_to_loc_format = loca_format as i16;
        builder.add_table(&head)?;

        let h_metrics: Vec<LongMetric> = written
            .iter()
            .map(|g| LongMetric { advance: g.advance, side_bearing: g.lsb })
            .collect();
        builder.add_table(&Hmtx::new(h_metrics, Vec::new()))?;

        let mut hhea: Hhea = font.hhea()?.to_owned_table();
        hhea.number_of_h_metrics = num_glyphs;
        hhea.advance_width_max = written.iter().map(|g| g.advance).max().unwrap_or(0).into();
        let inked = || written.iter().filter_map(|g| g.bbox.map(|bbox| (g, bbox)));
        hhea.min_left_side_bearing = inked().map(|(g, _)| g.lsb).min().unwrap_or(0).into();
        hhea.min_right_side_bearing = inked()
            .map(|(g, bbox)| clamp_i16(f64::from(g.advance) - f64::from(bbox.x_max)))
            .min()
            .unwrap_or(0)
            .into();
        hhea.x_max_extent = inked()
            .map(|(g, bbox)| clamp_i16(f64::from(g.lsb) + f64::from(bbox.x_max - bbox.x_min)))
            .max()
            .unwrap_or(0)
            .into();
        builder.add_table(&hhea)?;

        let mut maxp: Maxp = font.maxp()?.to_owned_table();
        maxp.num_glyphs = num_glyphs;
        let max_points = written.iter().map(|g| g.num_points).max().unwrap_or(0);
        let max_contours = written.iter().map(|g| g.num_contours).max().unwrap_or(0);
        maxp.max_points = maxp.max_points.map(|m| m.max(clamp_u16(max_points as f64)));
        maxp.max_contours = maxp.max_contours.map(|m| m.max(clamp_u16(max_contours as f64)));
        builder.add_table(&maxp)?;

        let mappings = self
            .cmap
            .iter()
            .filter_map(|(cp, gid)| char::from_u32(*cp).map(|ch| (ch, *gid)));
        builder.add_table(&Cmap::from_mappings(mappings)?)?;

        if let Some(names) = &self.glyph_names {
            let source: Post = font.post()?.to_owned_table();
            let mut post = Post::new_v2(names.iter().map(String::as_str));
            post.italic_angle = source.italic_angle;
            post.underline_position = source.underline_position;
            post.underline_thickness = source.underline_thickness;
            post.is_fixed_pitch = source.is_fixed_pitch;
            post.min_mem_type42 = source.min_mem_type42;
            post.max_mem_type42 = source.max_mem_type42;
            post.min_mem_type1 = source.min_mem_type1;
            post.max_mem_type1 = source.max_mem_type1;
            builder.add_table(&post)?;
        }

        if self.has_vertical_metrics
            && let Some(vhea_data) = font.table_data(VHEA)
        {
            let v_metrics = written
                .iter()
                .map(|g| VerticalMetric { advance: g.v_advance, side_bearing: g.tsb })
                .collect();
            builder.add_table(&Vmtx { v_metrics, top_side_bearings: Vec::new() })?;

            let mut vhea = vhea_data.as_bytes().to_vec();
            if let Some(slot) =
                vhea.get_mut(VHEA_NUM_LONG_METRICS_OFFSET..VHEA_NUM_LONG_METRICS_OFFSET + 2)
            {
                slot.copy_from_slice(&num_glyphs.to_be_bytes());
            }
            builder.add_raw(VHEA, vhea);
        }

        Ok(builder.build())
    }
}

fn write_glyph(entry: &GlyphEntry) -> (Glyph, WrittenGlyph) {
    let outline = &entry.outline;
    let advance = clamp_u16(outline.advance_width);
    let v_advance = outline.vertical_advance.map(clamp_u16).unwrap_or(0);

    if let Some(retained) = &entry.retained {
        let bbox = match &retained.glyph {
            Glyph::Simple(simple) => Some(simple.bbox),
            Glyph::Composite(composite) => Some(composite.bbox),
            Glyph::Empty => None,
        };
        let info = WrittenGlyph {
            bbox,
            advance,
            lsb: retained.lsb,
            v_advance,
            tsb: retained.tsb.unwrap_or(0),
            num_points: outline.num_points(),
            num_contours: outline.contours.len(),
        };
        return (retained.glyph.clone(), info);
    }

    let glyph = simple_glyph(outline);
    let bbox = match &glyph {
        Glyph::Simple(simple) => Some(simple.bbox),
        _ => None,
    };
    let tsb = match (outline.vertical_origin, bbox) {
        (Some(origin), Some(bbox)) => clamp_i16(origin - f64::from(bbox.y_max)),
        _ => 0,
    };
    let info = WrittenGlyph {
        bbox,
        advance,
        lsb: bbox.map(|b| b.x_min).unwrap_or(0),
        v_advance,
        tsb,
        num_points: outline.num_points(),
        num_contours: outline.contours.iter().filter(|c| !c.is_empty()).count(),
    };
    (glyph, info)
}

/// Round an edited outline to integer coordinates.
///
/// Hinting instructions are not carried over; they were written for the
/// untransformed shape.
fn simple_glyph(outline: &GlyphOutline) -> Glyph {
    let contours: Vec<Contour> = outline
        .contours
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| {
            c.points()
                .iter()
                .map(|p| CurvePoint::new(clamp_i16(p.point.x), clamp_i16(p.point.y), p.on_curve))
                .collect::<Vec<_>>()
                .into()
        })
        .collect();

    let mut points = contours.iter().flat_map(|c| c.iter());
    let Some(first) = points.next() else {
        return Glyph::Empty;
    };
    let bbox = points.fold(
        Bbox { x_min: first.x, y_min: first.y, x_max: first.x, y_max: first.y },
        |b, p| Bbox {
            x_min: b.x_min.min(p.x),
            y_min: b.y_min.min(p.y),
            x_max: b.x_max.max(p.x),
            y_max: b.y_max.max(p.y),
        },
    );

    Glyph::Simple(SimpleGlyph { bbox, contours, instructions: Vec::new() })
}

fn clamp_i16(value: f64) -> i16 {
    value.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

fn clamp_u16(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}
