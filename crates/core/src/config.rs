//! Run configuration: the font info document plus invocation options.
//!
//! The font info document is JSON:
//!
//! ```json
//! {
//!   "AutoMinCodepoint": 32,
//!   "AutoMaxCodepoint": 126,
//!   "ExtraCodepoints": [160, 8364],
//!   "RangeSize": 256,
//!   "FormatOptions": [
//!     { "Format": { "ItalicAmt": -13.0, "HorizFlip": false, "VertFlip": false, "Antiqua": false },
//!       "FontModes": [0, 2] }
//!   ]
//! }
//! ```

use std::{collections::BTreeSet, fs::read_to_string, ops::RangeInclusive, path::Path};

use serde::Deserialize;

use crate::{Codepoint, Error, Result};

/// First codepoint of the Basic Multilingual Plane private use area.
pub const DEFAULT_PRIVATE_USE_BASE: Codepoint = 0xE000;

/// The font info document as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FontInfo {
    pub auto_min_codepoint: Codepoint,
    pub auto_max_codepoint: Codepoint,
    pub extra_codepoints: Vec<Codepoint>,
    pub range_size: u32,
    pub format_options: Vec<RegionDescriptor>,
    #[serde(default = "default_private_use_base")]
    pub private_use_base: Codepoint,
}

fn default_private_use_base() -> Codepoint {
    DEFAULT_PRIVATE_USE_BASE
}

/// One entry of `FormatOptions`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionDescriptor {
    pub format: FormatDescriptor,
    #[serde(default)]
    pub font_modes: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormatDescriptor {
    /// Shear angle in degrees; null or absent means upright.
    #[serde(default)]
    pub italic_amt: Option<f64>,
    pub horiz_flip: bool,
    pub vert_flip: bool,
    /// Draw glyphs from the alternate source.
    pub antiqua: bool,
}

impl FontInfo {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let json = read_to_string(path)
            .map_err(|e| Error::Config { origin: origin.clone(), message: e.to_string() })?;
        Self::parse(&json, origin)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(json, "<inline>".to_string())
    }

    fn parse(json: &str, origin: String) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config { origin, message: e.to_string() })
    }
}

/// Per-invocation options supplied alongside the font info document.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Only regions listing this mode are generated; `None` activates all.
    pub requested_mode: Option<i32>,
    /// Extra scale applied to alternate glyphs after normalization.
    pub alternate_glyph_scale: f64,
    /// Stroke weight added to alternate glyphs, in font units.
    pub alternate_weight_delta: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { requested_mode: None, alternate_glyph_scale: 1.0, alternate_weight_delta: 0.0 }
    }
}

/// One variant region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatRegion {
    pub italic_amount: Option<f64>,
    pub horizontal_flip: bool,
    pub vertical_flip: bool,
    pub use_alternate_source: bool,
    pub active_modes: BTreeSet<i32>,
}

impl FormatRegion {
    /// Whether this region is generated for the requested mode.
    ///
    /// A region without listed modes is always generated.
    pub fn is_active(&self, requested_mode: Option<i32>) -> bool {
        requested_mode
            .is_none_or(|mode| self.active_modes.is_empty() || self.active_modes.contains(&mode))
    }

    /// The non-zero italic amount, if any.
    pub fn italic(&self) -> Option<f64> {
        self.italic_amount.filter(|amount| *amount != 0.0)
    }
}

impl From<RegionDescriptor> for FormatRegion {
    fn from(descriptor: RegionDescriptor) -> Self {
        let RegionDescriptor { format, font_modes } = descriptor;
        Self {
            italic_amount: format.italic_amt,
            horizontal_flip: format.horiz_flip,
            vertical_flip: format.vert_flip,
            use_alternate_source: format.antiqua,
            active_modes: font_modes.into_iter().collect(),
        }
    }
}

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Inclusive base range; empty when min exceeds max.
    pub base_codepoint_range: RangeInclusive<Codepoint>,
    /// Appended after the base range, in the given order.
    pub extra_codepoints: Vec<Codepoint>,
    /// Number of destination slots reserved per region.
    pub region_byte_stride: u32,
    pub regions: Vec<FormatRegion>,
    pub private_use_base: Codepoint,
    pub requested_mode: Option<i32>,
    pub alternate_glyph_scale: f64,
    pub alternate_weight_delta: f64,
}

impl RunConfig {
    pub fn new(info: FontInfo, options: RunOptions) -> Self {
        Self {
            base_codepoint_range: info.auto_min_codepoint..=info.auto_max_codepoint,
            extra_codepoints: info.extra_codepoints,
            region_byte_stride: info.range_size,
            regions: info.format_options.into_iter().map(FormatRegion::from).collect(),
            private_use_base: info.private_use_base,
            requested_mode: options.requested_mode,
            alternate_glyph_scale: options.alternate_glyph_scale,
            alternate_weight_delta: options.alternate_weight_delta,
        }
    }

    /// The ordered source codepoints copied into every active region.
    ///
    /// Duplicates are kept; each occurrence claims its own destination slot.
    pub fn repertoire(&self) -> Vec<Codepoint> {
        self.base_codepoint_range
            .clone()
            .chain(self.extra_codepoints.iter().copied())
            .collect()
    }

    /// Whether any region that will run draws from the alternate source.
    pub fn needs_alternate(&self) -> bool {
        self.regions
            .iter()
            .any(|r| r.use_alternate_source && r.is_active(self.requested_mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "AutoMinCodepoint": 65,
        "AutoMaxCodepoint": 67,
        "ExtraCodepoints": [32],
        "RangeSize": 16,
        "FormatOptions": [
            { "Format": { "ItalicAmt": -13.0, "HorizFlip": false, "VertFlip": false, "Antiqua": false },
              "FontModes": [0, 2] },
            { "Format": { "ItalicAmt": null, "HorizFlip": true, "VertFlip": true, "Antiqua": true },
              "FontModes": [1] },
            { "Format": { "HorizFlip": true, "VertFlip": false, "Antiqua": false } }
        ]
    }"#;

    #[test]
    fn parses_font_info() {
        let info = FontInfo::from_json(SAMPLE).unwrap();
        assert_eq!(info.auto_min_codepoint, 65);
        assert_eq!(info.range_size, 16);
        assert_eq!(info.private_use_base, DEFAULT_PRIVATE_USE_BASE);
        assert_eq!(info.format_options.len(), 3);
        assert_eq!(info.format_options[0].format.italic_amt, Some(-13.0));
        assert_eq!(info.format_options[1].format.italic_amt, None);
        assert_eq!(info.format_options[2].format.italic_amt, None);
        assert!(info.format_options[2].font_modes.is_empty());
    }

    #[test]
    fn repertoire_is_base_then_extras() {
        let config = RunConfig::new(FontInfo::from_json(SAMPLE).unwrap(), RunOptions::default());
        assert_eq!(config.repertoire(), vec![65, 66, 67, 32]);
    }

    #[test]
    fn inverted_base_range_is_empty() {
        let mut info = FontInfo::from_json(SAMPLE).unwrap();
        info.auto_min_codepoint = 100;
        info.auto_max_codepoint = 90;
        let config = RunConfig::new(info, RunOptions::default());
        assert_eq!(config.repertoire(), vec![32]);
    }

    #[test]
    fn mode_filter_activates_listed_regions() {
        let config = RunConfig::new(FontInfo::from_json(SAMPLE).unwrap(), RunOptions::default());
        let italic = &config.regions[0];
        let antiqua = &config.regions[1];
        let unrestricted = &config.regions[2];

        assert!(italic.is_active(None));
        assert!(italic.is_active(Some(2)));
        assert!(!italic.is_active(Some(1)));
        assert!(antiqua.is_active(None));
        assert!(!antiqua.is_active(Some(0)));
        assert!(unrestricted.is_active(Some(0)));
        assert!(unrestricted.is_active(Some(7)));
    }

    #[test]
    fn alternate_needed_only_for_active_regions() {
        let info = FontInfo::from_json(SAMPLE).unwrap();
        let all = RunConfig::new(info.clone(), RunOptions::default());
        assert!(all.needs_alternate());

        let options = RunOptions { requested_mode: Some(0), ..RunOptions::default() };
        assert!(!RunConfig::new(info, options).needs_alternate());
    }

    #[test]
    fn missing_field_is_config_error() {
        let err = FontInfo::from_json(r#"{ "AutoMinCodepoint": 1 }"#).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn wrong_shape_is_config_error() {
        let json = SAMPLE.replace("\"HorizFlip\": false", "\"HorizFlip\": \"no\"");
        assert!(matches!(FontInfo::from_json(&json), Err(Error::Config { .. })));
    }

    #[test]
    fn explicit_private_use_base() {
        let json = SAMPLE.replace("\"RangeSize\": 16", "\"RangeSize\": 16, \"PrivateUseBase\": 983040");
        assert_eq!(FontInfo::from_json(&json).unwrap().private_use_base, 0xF0000);
    }
}
