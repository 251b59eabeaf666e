//! Embedded seed data and marker file loading.

use crate::markers::Marker;
use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Embeds all assets from the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Name of the seed marker list inside [`Assets`].
pub const SEED_MARKERS: &str = "markers.ron";

/// Name of the indicator arrow glyph inside [`Assets`]. Points up.
pub const DIRECTION_ARROW: &str = "direction-arrow.svg";

/// Errors that can occur when loading embedded assets or marker lists.
#[derive(Error, Debug)]
pub enum AssetLoadError {
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid UTF-8 in marker list: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse marker list: {0}")]
    ParseError(#[from] ron::de::SpannedError),
}

/// Parses a RON list of markers.
pub fn parse_markers(source: &str) -> Result<Vec<Marker>, AssetLoadError> {
    Ok(ron::from_str(source)?)
}

/// Loads the marker list shipped with the application.
pub fn load_seed_markers() -> Result<Vec<Marker>, AssetLoadError> {
    let file = Assets::get(SEED_MARKERS)
        .ok_or_else(|| AssetLoadError::AssetNotFound(SEED_MARKERS.to_string()))?;
    let source = std::str::from_utf8(&file.data)?;
    let markers = parse_markers(source)?;
    log::debug!("Loaded {} seed markers", markers.len());
    Ok(markers)
}

/// Returns the SVG source of the indicator arrow.
pub fn load_direction_arrow() -> Result<Cow<'static, [u8]>, AssetLoadError> {
    let file = Assets::get(DIRECTION_ARROW)
        .ok_or_else(|| AssetLoadError::AssetNotFound(DIRECTION_ARROW.to_string()))?;
    Ok(file.data)
}

/// Loads a marker list from a RON file on disk.
pub fn load_markers_file(path: &Path) -> Result<Vec<Marker>, AssetLoadError> {
    let source = fs::read_to_string(path).map_err(|source| AssetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_markers(&source)
}
