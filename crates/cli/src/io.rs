//! Reading the base font and writing the extended one.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use font_glyphs::OutlineFont;

/// Load the font being extended.
pub(crate) fn read_font(path: &Path) -> Result<OutlineFont> {
    let data =
        fs::read(path).with_context(|| format!("Failed to read font: {}", path.display()))?;
    OutlineFont::from_bytes(data)
        .with_context(|| format!("Failed to load font: {}", path.display()))
}

/// Serialize `font` to `path`, creating the output directory if needed.
///
/// Serialization happens before anything touches the filesystem.
pub(crate) fn write_font(font: &OutlineFont, path: &Path) -> Result<()> {
    let data = font.to_bytes().context("Failed to serialize font")?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, data).with_context(|| format!("Failed to write font: {}", path.display()))
}
