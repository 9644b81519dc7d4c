//! Placement of variant glyphs in the private use area.

use crate::{Codepoint, PipelineError};

/// Largest Unicode scalar value.
const MAX_CODEPOINT: u64 = 0x10FFFF;

/// `private_use_base + region_index * region_byte_stride + repertoire_index`.
///
/// Injective over `(region_index, repertoire_index)` as long as the stride is
/// at least the repertoire length. Computed in `u64` so oversized layouts are
/// reported instead of wrapping.
pub fn destination_codepoint(
    private_use_base: Codepoint,
    region_byte_stride: u32,
    region_index: usize,
    repertoire_index: usize,
) -> u64 {
    u64::from(private_use_base)
        + region_index as u64 * u64::from(region_byte_stride)
        + repertoire_index as u64
}

/// Destination layout for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointMapper {
    pub private_use_base: Codepoint,
    pub region_byte_stride: u32,
}

impl CodepointMapper {
    pub fn new(private_use_base: Codepoint, region_byte_stride: u32) -> Self {
        Self { private_use_base, region_byte_stride }
    }

    /// The destination as a codepoint a cmap can hold.
    pub fn destination(
        &self,
        region_index: usize,
        repertoire_index: usize,
    ) -> Result<Codepoint, PipelineError> {
        let raw = destination_codepoint(
            self.private_use_base,
            self.region_byte_stride,
            region_index,
            repertoire_index,
        );
        let in_range = raw <= MAX_CODEPOINT && !(0xD800..=0xDFFF).contains(&raw);
        match u32::try_from(raw) {
            Ok(codepoint) if in_range => Ok(codepoint),
            _ => Err(PipelineError::CodepointOutOfRange { region: region_index, codepoint: raw }),
        }
    }
}
