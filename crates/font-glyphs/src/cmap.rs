//! Unicode cmap reading.

use std::collections::BTreeMap;

use read_fonts::{
    FontRef, TableProvider,
    tables::cmap::{Cmap, CmapSubtable, PlatformId},
    types::GlyphId,
};

/// Read the codepoint to glyph mapping from the best Unicode subtable.
///
/// Format 12 (full repertoire) is preferred over format 4 (BMP). A missing
/// cmap yields an empty mapping.
pub(crate) fn read_mappings(font: &FontRef) -> BTreeMap<u32, GlyphId> {
    let Ok(cmap) = font.cmap() else {
        return BTreeMap::new();
    };
    let Some(subtable) = find_best_subtable(&cmap) else {
        return BTreeMap::new();
    };
    subtable.iter().filter(|(_, gid)| gid.to_u32() != 0).collect()
}

fn find_best_subtable<'a>(cmap: &'a Cmap<'a>) -> Option<CmapSubtable<'a>> {
    let records = cmap.encoding_records();

    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 10))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format12(_))
        {
            return Some(subtable);
        }
    }

    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 1))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format4(_))
        {
            return Some(subtable);
        }
    }

    records.iter().find_map(|r| r.subtable(cmap.offset_data()).ok())
}
