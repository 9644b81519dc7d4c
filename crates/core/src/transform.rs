//! Variant geometry: primitive affine maps and their composition.
//!
//! The composer is stateless. Callers build an ordered list of [`Primitive`]s
//! and apply it to one outline; order matters, since a shear computed after a
//! mirror acts on the mirrored shape.

use font_glyphs::GlyphOutline;
use kurbo::{Affine, Rect};

use crate::bounds::GlobalBounds;

/// One primitive 2D affine map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// `x' = anchor_x - x`, `y' = y`.
    MirrorHorizontal { anchor_x: f64 },
    /// `x' = x`, `y' = target_top - y`.
    FlipVertical { target_top: f64 },
    /// Italic slant about the baseline; positive angles lean forward (right).
    Shear { angle_degrees: f64 },
    /// Uniform scale about the origin.
    UniformScale { factor: f64 },
}

impl Primitive {
    /// Mirror about the horizontal center of `bbox`.
    ///
    /// The anchor is `xmin + xmax` (not the midpoint): the reflection is
    /// `x' = anchor - x`, which maps `xmin` to `anchor - xmax` and `xmax` to
    /// `anchor - xmin`, so the glyph keeps its horizontal extent.
    pub fn mirror_for(bbox: Rect) -> Self {
        Primitive::MirrorHorizontal { anchor_x: mirror_anchor(bbox) }
    }

    /// Vertical flip that lands every glyph of a run on the same top anchor.
    pub fn flip_for(local_y_max: f64, global: Rect) -> Self {
        Primitive::FlipVertical { target_top: flip_target_top(local_y_max, global) }
    }

    pub fn to_affine(self) -> Affine {
        match self {
            Primitive::MirrorHorizontal { anchor_x } => {
                Affine::new([-1.0, 0.0, 0.0, 1.0, anchor_x, 0.0])
            }
            Primitive::FlipVertical { target_top } => {
                Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, target_top])
            }
            Primitive::Shear { angle_degrees } => {
                Affine::skew(angle_degrees.to_radians().tan(), 0.0)
            }
            Primitive::UniformScale { factor } => Affine::scale(factor),
        }
    }

    /// Whether this map reverses contour direction.
    pub fn is_reflection(self) -> bool {
        self.to_affine().determinant() < 0.0
    }
}

pub fn mirror_anchor(bbox: Rect) -> f64 {
    bbox.x0 + bbox.x1
}

/// `localYmax + (globalYmax - localYmax) + globalYmin`.
///
/// The local term cancels, leaving `globalYmax + globalYmin` for every glyph, so
/// flipped glyphs share one baseline regardless of their own extents.
pub fn flip_target_top(local_y_max: f64, global: Rect) -> f64 {
    local_y_max + (global.y1 - local_y_max) + global.y0
}

/// The italic amount a region applies: the configured amount, negated for
/// mirrored regions so the lean is consistent in the mirrored glyph's own frame.
pub fn applied_italic_amount(italic_amount: f64, horizontal_flip: bool) -> f64 {
    if horizontal_flip { -italic_amount } else { italic_amount }
}

/// Shear for an italic amount.
///
/// Italic amounts follow the `post.italicAngle` convention, where negative
/// angles lean forward, so the shear angle is the amount negated.
pub fn italic_shear(italic_amount: f64) -> Primitive {
    Primitive::Shear { angle_degrees: -italic_amount }
}

/// Scale that normalizes alternate glyphs to the primary glyphs' extent.
///
/// Returns `None` when either extent is empty or zero.
pub fn alternate_scale_factor(
    primary: &GlobalBounds,
    alternate: &GlobalBounds,
    alternate_glyph_scale: f64,
) -> Option<f64> {
    let primary_span = primary.extent_span()?;
    let alternate_span = alternate.extent_span()?;
    if primary_span <= 0.0 || alternate_span <= 0.0 {
        return None;
    }
    Some(primary_span / alternate_span * alternate_glyph_scale)
}

/// Compose an ordered list of primitives into one affine map.
///
/// The first primitive is applied first.
pub fn compose(primitives: &[Primitive]) -> Affine {
    primitives.iter().fold(Affine::IDENTITY, |acc, p| p.to_affine() * acc)
}

/// Apply an ordered list of primitives to one outline.
pub fn apply(outline: &mut GlyphOutline, primitives: &[Primitive]) {
    if primitives.is_empty() {
        return;
    }
    outline.transform(compose(primitives));
}
