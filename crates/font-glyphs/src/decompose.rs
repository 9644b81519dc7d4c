//! Reading glyf outlines into editable contours.
//!
//! Composite glyphs are flattened: each component's contours are placed with
//! the component's 2x2 transform and offset, so a copied glyph no longer
//! depends on the glyphs it was built from.

use kurbo::{Affine, Point, Vec2};
use read_fonts::{
    tables::{
        glyf::{
            Anchor as ReadAnchor, CompositeGlyph as ReadComposite, CurvePoint, Glyf,
            Glyph as ReadGlyph, SimpleGlyph as ReadSimple,
        },
        loca::Loca,
    },
    types::GlyphId,
};
use write_fonts::tables::glyf::{
    Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, Contour as WriteContour, Glyph,
    SimpleGlyph, Transform,
};

use crate::{
    Error, Result,
    outline::{Contour, OutlinePoint},
};

const MAX_COMPONENT_DEPTH: usize = 64;

/// Read the flattened contours of a glyph.
pub(crate) fn read_contours(loca: &Loca, glyf: &Glyf, gid: GlyphId) -> Result<Vec<Contour>> {
    read_contours_at_depth(loca, glyf, gid, 0)
}

fn read_contours_at_depth(
    loca: &Loca,
    glyf: &Glyf,
    gid: GlyphId,
    depth: usize,
) -> Result<Vec<Contour>> {
    if depth > MAX_COMPONENT_DEPTH {
        return Err(Error::ComponentDepth { glyph_id: gid.to_u32(), limit: MAX_COMPONENT_DEPTH });
    }
    match loca.get_glyf(gid, glyf)? {
        None => Ok(Vec::new()),
        Some(ReadGlyph::Simple(simple)) => Ok(simple_contours(&simple)),
        Some(ReadGlyph::Composite(composite)) => {
            let mut contours: Vec<Contour> = Vec::new();
            for component in composite.components() {
                let child_gid = GlyphId::new(component.glyph.to_u32());
                let child = read_contours_at_depth(loca, glyf, child_gid, depth + 1)?;

                let t = &component.transform;
                let linear = Affine::new([
                    f64::from(t.xx.to_f32()),
                    f64::from(t.yx.to_f32()),
                    f64::from(t.xy.to_f32()),
                    f64::from(t.yy.to_f32()),
                    0.0,
                    0.0,
                ]);
                let offset = match component.anchor {
                    ReadAnchor::Offset { x, y } => Vec2::new(f64::from(x), f64::from(y)),
                    ReadAnchor::Point { base, component: child_point } => {
                        let base_point = nth_point(&contours, base).ok_or(Error::AnchorPoint {
                            glyph_id: gid.to_u32(),
                            index: base,
                        })?;
                        let child_point = nth_point(&child, child_point).ok_or(
                            Error::AnchorPoint { glyph_id: gid.to_u32(), index: child_point },
                        )?;
                        base_point - linear * child_point
                    }
                };
                let placement = Affine::translate(offset) * linear;
                contours.extend(child.into_iter().map(|c| c.transformed(placement)));
            }
            Ok(contours)
        }
    }
}

fn nth_point(contours: &[Contour], index: u16) -> Option<Point> {
    contours.iter().flat_map(|c| c.points()).nth(usize::from(index)).map(|p| p.point)
}

fn simple_contours(glyph: &ReadSimple) -> Vec<Contour> {
    let mut points = glyph.points();
    let mut current = 0usize;
    let mut contours = Vec::new();

    for end_pt in glyph.end_pts_of_contours() {
        let end = end_pt.get() as usize;
        let mut contour = Vec::new();
        while current <= end {
            if let Some(p) = points.next() {
                contour.push(OutlinePoint::new(f64::from(p.x), f64::from(p.y), p.on_curve));
            }
            current += 1;
        }
        contours.push(Contour::new(contour));
    }
    contours
}

/// Convert a glyph as read to its writable form, unchanged.
///
/// Used to re-emit glyphs the pipeline never touched, so composites and
/// hinting instructions survive a round trip.
pub(crate) fn to_write_glyph(glyph: &ReadGlyph) -> Glyph {
    match glyph {
        ReadGlyph::Simple(simple) => {
            let contours: Vec<WriteContour> = simple_contours(simple)
                .iter()
                .map(|c| {
                    c.points()
                        .iter()
                        .map(|p| CurvePoint::new(p.point.x as i16, p.point.y as i16, p.on_curve))
                        .collect::<Vec<_>>()
                        .into()
                })
                .collect();
            Glyph::Simple(SimpleGlyph {
                bbox: Bbox {
                    x_min: simple.x_min(),
                    y_min: simple.y_min(),
                    x_max: simple.x_max(),
                    y_max: simple.y_max(),
                },
                contours,
                instructions: simple.instructions().to_vec(),
            })
        }
        ReadGlyph::Composite(composite) => composite_to_write(composite),
    }
}

fn composite_to_write(composite: &ReadComposite) -> Glyph {
    let mut components: Vec<Component> = composite
        .components()
        .map(|comp| Component {
            glyph: font_types::GlyphId16::new(comp.glyph.to_u32() as u16),
            anchor: match comp.anchor {
                ReadAnchor::Offset { x, y } => Anchor::Offset { x, y },
                ReadAnchor::Point { base, component } => Anchor::Point { base, component },
            },
            flags: ComponentFlags::from(comp.flags),
            transform: Transform {
                xx: comp.transform.xx,
                yx: comp.transform.yx,
                xy: comp.transform.xy,
                yy: comp.transform.yy,
            },
        })
        .collect();

    if components.is_empty() {
        return Glyph::Empty;
    }

    let bbox = Bbox {
        x_min: composite.x_min(),
        y_min: composite.y_min(),
        x_max: composite.x_max(),
        y_max: composite.y_max(),
    };
    let first = components.remove(0);
    let mut glyph = CompositeGlyph::new(first, bbox);
    for component in components {
        glyph.add_component(component, bbox);
    }
    Glyph::Composite(glyph)
}
