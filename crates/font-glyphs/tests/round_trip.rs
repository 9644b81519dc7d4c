//! Load/edit/save tests against small fonts built in memory.

use font_glyphs::{Contour, Error, GlyphOutline, OutlineFont, OutlinePoint, winding};
use font_types::{F2Dot14, GlyphId16};
use kurbo::{Affine, Rect};
use read_fonts::{FontRef, TableProvider, tables::glyf::CurvePoint, types::GlyphId};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{
            Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, GlyfLocaBuilder, Glyph,
            SimpleGlyph, Transform,
        },
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        post::Post,
    },
};

/// Clockwise rectangle.
fn rect_glyph(x0: i16, y0: i16, x1: i16, y1: i16) -> Glyph {
    let points = vec![
        CurvePoint::on_curve(x0, y0),
        CurvePoint::on_curve(x0, y1),
        CurvePoint::on_curve(x1, y1),
        CurvePoint::on_curve(x1, y0),
    ];
    Glyph::Simple(SimpleGlyph {
        bbox: Bbox { x_min: x0, y_min: y0, x_max: x1, y_max: y1 },
        contours: vec![points.into()],
        instructions: vec![],
    })
}

fn identity() -> Transform {
    Transform {
        xx: F2Dot14::from_f32(1.0),
        yx: F2Dot14::from_f32(0.0),
        xy: F2Dot14::from_f32(0.0),
        yy: F2Dot14::from_f32(1.0),
    }
}

/// Build a font from `(name, glyph, advance)` triples and a cmap.
fn make_test_font(glyphs: &[(&str, Glyph, u16)], cmap_entries: &[(char, u16)]) -> Vec<u8> {
    let mut glyf_builder = GlyfLocaBuilder::new();
    for (_, glyph, _) in glyphs {
        glyf_builder.add_glyph(glyph).unwrap();
    }
    let (glyf, loca, loca_format) = glyf_builder.build();

    let cmap = Cmap::from_mappings(
        cmap_entries.iter().map(|(ch, gid)| (*ch, GlyphId::new(u32::from(*gid)))),
    )
    .unwrap();

    let head = Head {
        font_revision: font_types::Fixed::from_f64(1.0),
        checksum_adjustment: 0,
        magic_number: 0x5F0F3CF5,
        flags: write_fonts::tables::head::Flags::empty(),
        units_per_em: 1000,
        created: font_types::LongDateTime::new(0),
        modified: font_types::LongDateTime::new(0),
        x_min: 0,
        y_min: -200,
        x_max: 600,
        y_max: 800,
        mac_style: write_fonts::tables::head::MacStyle::empty(),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            write_fonts::tables::loca::LocaFormat::Short => 0,
            write_fonts::tables::loca::LocaFormat::Long => 1,
        },
    };

    let hhea = Hhea {
        ascender: font_types::FWord::new(800),
        descender: font_types::FWord::new(-200),
        line_gap: font_types::FWord::new(0),
        advance_width_max: font_types::UfWord::new(600),
        min_left_side_bearing: font_types::FWord::new(0),
        min_right_side_bearing: font_types::FWord::new(0),
        x_max_extent: font_types::FWord::new(600),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: glyphs.len() as u16,
    };

    let hmtx = Hmtx {
        h_metrics: glyphs
            .iter()
            .map(|(_, glyph, advance)| {
                let side_bearing = match glyph {
                    Glyph::Simple(s) => s.bbox.x_min,
                    Glyph::Composite(c) => c.bbox.x_min,
                    Glyph::Empty => 0,
                };
                LongMetric { advance: *advance, side_bearing }
            })
            .collect(),
        left_side_bearings: vec![],
    };

    let maxp = Maxp {
        num_glyphs: glyphs.len() as u16,
        max_points: Some(8),
        max_contours: Some(2),
        max_composite_points: Some(8),
        max_composite_contours: Some(2),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(1),
        max_component_depth: Some(1),
    };

    let post = Post::new_v2(glyphs.iter().map(|(name, _, _)| *name));

    let mut builder = FontBuilder::new();
    builder.add_table(&head).unwrap();
    builder.add_table(&hhea).unwrap();
    builder.add_table(&hmtx).unwrap();
    builder.add_table(&maxp).unwrap();
    builder.add_table(&cmap).unwrap();
    builder.add_table(&post).unwrap();
    builder.add_table(&glyf).unwrap();
    builder.add_table(&loca).unwrap();
    builder.build()
}

fn sample_font() -> Vec<u8> {
    let composite = CompositeGlyph::new(
        Component::new(
            GlyphId16::new(1),
            Anchor::Offset { x: 100, y: 50 },
            identity(),
            ComponentFlags::default(),
        ),
        Bbox { x_min: 150, y_min: 50, x_max: 550, y_max: 750 },
    );
    make_test_font(
        &[
            (".notdef", Glyph::Empty, 500),
            ("A", rect_glyph(50, 0, 450, 700), 500),
            ("space", Glyph::Empty, 250),
            ("Aacute", Glyph::Composite(composite), 600),
        ],
        &[('A', 1), (' ', 2), ('\u{C1}', 3)],
    )
}

#[test]
fn loads_simple_outline_and_metrics() {
    let font = OutlineFont::from_bytes(sample_font()).unwrap();
    assert_eq!(font.num_glyphs(), 4);

    let a = font.outline('A' as u32).unwrap();
    assert_eq!(a.bounds(), Some(Rect::new(50.0, 0.0, 450.0, 700.0)));
    assert_eq!(a.advance_width, 500.0);
    assert_eq!(a.left_side_bearing(), 50.0);
    assert_eq!(a.right_side_bearing(), 50.0);

    let space = font.outline(' ' as u32).unwrap();
    assert!(space.is_empty());
    assert_eq!(space.advance_width, 250.0);

    assert!(font.outline('B' as u32).is_none());
    assert!(!font.contains('B' as u32));
}

#[test]
fn composites_are_flattened() {
    let font = OutlineFont::from_bytes(sample_font()).unwrap();
    let aacute = font.outline(0xC1).unwrap();
    assert_eq!(aacute.contours.len(), 1);
    assert_eq!(aacute.bounds(), Some(Rect::new(150.0, 50.0, 550.0, 750.0)));
}

#[test]
fn added_glyph_is_written_and_mapped() {
    let mut font = OutlineFont::from_bytes(sample_font()).unwrap();
    let mut copy = font.outline('A' as u32).cloned().unwrap();
    copy.transform(Affine::new([1.0, 0.0, 0.25, 1.0, 0.0, 0.0]));
    let gid = font.set_glyph(0xE000, copy).unwrap();
    assert_eq!(gid, GlyphId::new(4));

    let data = font.to_bytes().unwrap();
    let written = FontRef::new(&data).unwrap();

    assert_eq!(written.maxp().unwrap().num_glyphs(), 5);
    assert_eq!(written.cmap().unwrap().map_codepoint(0xE000u32), Some(GlyphId::new(4)));
    assert_eq!(written.cmap().unwrap().map_codepoint('A'), Some(GlyphId::new(1)));

    let glyf = written.glyf().unwrap();
    let loca = written.loca(None).unwrap();
    match loca.get_glyf(GlyphId::new(4), &glyf).unwrap() {
        Some(read_fonts::tables::glyf::Glyph::Simple(simple)) => {
            // x' = x + 0.25 * y; top edge shifted by 175
            assert_eq!(simple.x_min(), 50);
            assert_eq!(simple.x_max(), 625);
            assert_eq!(simple.y_max(), 700);
        }
        _ => panic!("expected a simple glyph"),
    }

    let hmtx = written.hmtx().unwrap();
    assert_eq!(hmtx.advance(GlyphId::new(4)), Some(500));
    assert_eq!(hmtx.side_bearing(GlyphId::new(4)), Some(50));
    assert_eq!(written.hhea().unwrap().number_of_h_metrics(), 5);

    let post = written.post().unwrap();
    assert_eq!(post.glyph_name(GlyphId16::new(4)), Some("uniE000"));
    assert_eq!(post.glyph_name(GlyphId16::new(1)), Some("A"));
}

#[test]
fn untouched_composite_survives_round_trip() {
    let font = OutlineFont::from_bytes(sample_font()).unwrap();
    let data = font.to_bytes().unwrap();
    let written = FontRef::new(&data).unwrap();
    let glyf = written.glyf().unwrap();
    let loca = written.loca(None).unwrap();
    assert!(matches!(
        loca.get_glyf(GlyphId::new(3), &glyf).unwrap(),
        Some(read_fonts::tables::glyf::Glyph::Composite(_))
    ));
}

#[test]
fn remapping_existing_codepoint_keeps_shared_glyph() {
    let mut font = OutlineFont::from_bytes(sample_font()).unwrap();
    let replacement = GlyphOutline::new(
        vec![Contour::new(vec![
            OutlinePoint::on(0.0, 0.0),
            OutlinePoint::on(0.0, 10.0),
            OutlinePoint::on(10.0, 10.0),
        ])],
        20.0,
    );
    font.set_glyph('A' as u32, replacement).unwrap();
    assert_eq!(font.glyph_id('A' as u32), Some(GlyphId::new(4)));
    assert_eq!(font.num_glyphs(), 5);
}

#[test]
fn mirrored_glyph_direction_is_corrected() {
    let mut font = OutlineFont::from_bytes(sample_font()).unwrap();
    let mut copy = font.outline('A' as u32).cloned().unwrap();
    copy.transform(Affine::new([-1.0, 0.0, 0.0, 1.0, 500.0, 0.0]));
    assert!(winding::signed_area(&copy.contours[0]) > 0.0);
    font.set_glyph(0xE001, copy).unwrap();

    assert_eq!(font.correct_direction(0xE001), Some(1));
    let fixed = font.outline(0xE001).unwrap();
    assert!(winding::signed_area(&fixed.contours[0]) < 0.0);
    assert_eq!(font.correct_direction(0xE999), None);
}

#[test]
fn rejects_fonts_without_glyf() {
    let mut builder = FontBuilder::new();
    builder.add_raw(read_fonts::types::Tag::new(b"CFF "), vec![0u8; 4]);
    let data = builder.build();
    assert!(matches!(OutlineFont::from_bytes(data), Err(Error::NoGlyf) | Err(Error::Parse(_))));
}
