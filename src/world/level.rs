//! Level loading and saving
//!
//! Levels are stored as pretty-printed JSON:
//! - `level`: map of `"x,y"` keys to tile names
//! - `camera_x`: horizontal scroll offset in pixels
//! - `world_w` / `world_h`: world size in cells
//!
//! Loading decodes the whole document before anything is applied. Bad
//! entries (unknown tile, malformed key, outside the world) are skipped and
//! counted; only a document that cannot be decoded at all is an error.

use std::collections::BTreeMap;
use std::path::Path;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use super::{GridCoord, LevelStore, TileType, WorldDimensions};
use crate::storage::{LocalStorage, StorageError};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum size of a level document on disk
    pub const MAX_DOCUMENT_BYTES: usize = 64 * 1024 * 1024;
    /// Maximum world dimension (width or height) in cells
    pub const MAX_WORLD_TILES: u32 = 65_536;
}

/// Error type for level loading and saving
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// The document exists but could not be read
    #[error("could not read level document: {0}")]
    Open(StorageError),
    /// The document is not valid JSON of the expected shape
    #[error("level document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    /// The document decoded but describes an impossible world
    #[error("level document failed validation: {0}")]
    Invalid(String),
    /// The level could not be encoded
    #[error("could not encode level document: {0}")]
    Encode(serde_json::Error),
    /// The document could not be written
    #[error("could not write level document: {0}")]
    Write(StorageError),
}

/// Why a single document entry was skipped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("unknown tile name {name} at {key}")]
    UnknownTile { key: String, name: String },
    #[error("invalid coordinate format '{0}'")]
    MalformedCoordinate(String),
    #[error("cell {0} lies outside the world")]
    OutOfBounds(String),
}

/// On-disk document layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDocument {
    #[serde(default)]
    pub level: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub camera_x: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_h: Option<u32>,
}

/// Per-entry outcome counts of a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_unknown_tile: usize,
    pub skipped_malformed_coordinate: usize,
    pub skipped_out_of_bounds: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.skipped_unknown_tile + self.skipped_malformed_coordinate + self.skipped_out_of_bounds
    }

    fn record(&mut self, err: &EntryError) {
        match err {
            EntryError::UnknownTile { .. } => self.skipped_unknown_tile += 1,
            EntryError::MalformedCoordinate(_) => self.skipped_malformed_coordinate += 1,
            EntryError::OutOfBounds(_) => self.skipped_out_of_bounds += 1,
        }
    }
}

/// A fully decoded and validated level, ready to apply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLevel {
    /// Valid entries in (x, y) order
    pub entries: Vec<(GridCoord, TileType)>,
    /// Camera offset as stored (not yet clamped to a viewport)
    pub camera_x: i64,
    /// World size; cell size is carried over from the caller
    pub dims: WorldDimensions,
    pub report: LoadReport,
}

/// Parse a `"x,y"` key: two decimal integers joined by one comma, no spaces
///
/// Negative and oversized values still parse; bounds are checked by the caller.
pub fn parse_coord_key(key: &str) -> Option<(i64, i64)> {
    let (x, y) = key.split_once(',')?;
    Some((parse_int(x)?, parse_int(y)?))
}

/// Optional `-` then digits; values past the `i64` range saturate
fn parse_int(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = match digits.parse::<i64>() {
        Ok(v) => v,
        Err(_) => i64::MAX,
    };
    Some(if negative { -value } else { value })
}

/// Validate a single entry
fn parse_entry(
    key: &str,
    value: &serde_json::Value,
    dims: &WorldDimensions,
) -> Result<(GridCoord, TileType), EntryError> {
    let (x, y) = parse_coord_key(key).ok_or_else(|| EntryError::MalformedCoordinate(key.to_string()))?;

    let tile = value
        .as_str()
        .and_then(TileType::from_name)
        .ok_or_else(|| EntryError::UnknownTile {
            key: key.to_string(),
            name: value.to_string(),
        })?;

    let coord = match (u32::try_from(x), u32::try_from(y)) {
        (Ok(x), Ok(y)) => GridCoord::new(x, y),
        _ => return Err(EntryError::OutOfBounds(key.to_string())),
    };
    if !dims.contains(coord) {
        return Err(EntryError::OutOfBounds(key.to_string()));
    }
    Ok((coord, tile))
}

/// Validate world dimensions from a document
fn validate_dims(doc: &LevelDocument, fallback: WorldDimensions) -> Result<WorldDimensions, LevelError> {
    let width = doc.world_w.unwrap_or(fallback.width_tiles);
    let height = doc.world_h.unwrap_or(fallback.height_tiles);

    for (axis, value) in [("world_w", width), ("world_h", height)] {
        if value == 0 {
            return Err(LevelError::Invalid(format!("{} must be positive", axis)));
        }
        if value > limits::MAX_WORLD_TILES {
            return Err(LevelError::Invalid(format!(
                "{} too large ({} > {})",
                axis,
                value,
                limits::MAX_WORLD_TILES
            )));
        }
    }
    Ok(fallback.with_extent(width, height))
}

/// Decode level data from bytes
///
/// `fallback` supplies the world size when the document omits it, and the
/// cell size (which documents never carry).
pub fn parse_level_data(bytes: &[u8], fallback: WorldDimensions) -> Result<ParsedLevel, LevelError> {
    if bytes.len() > limits::MAX_DOCUMENT_BYTES {
        return Err(LevelError::Invalid(format!(
            "document too large ({} > {} bytes)",
            bytes.len(),
            limits::MAX_DOCUMENT_BYTES
        )));
    }

    let doc: LevelDocument = serde_json::from_slice(bytes)?;
    let dims = validate_dims(&doc, fallback)?;

    let mut report = LoadReport::default();
    let mut entries = Vec::with_capacity(doc.level.len());
    for (key, value) in &doc.level {
        match parse_entry(key, value, &dims) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!("Skipping level entry: {}", e);
                report.record(&e);
            }
        }
    }
    entries.sort_by_key(|(coord, _)| *coord);
    report.loaded = entries.len();

    Ok(ParsedLevel {
        entries,
        camera_x: doc.camera_x,
        dims,
        report,
    })
}

/// Build the on-disk document for a level
pub fn level_document(store: &LevelStore, camera_x: i32, dims: &WorldDimensions) -> LevelDocument {
    LevelDocument {
        level: store
            .iter()
            .map(|(coord, tile)| (coord.to_key(), serde_json::Value::from(tile.name())))
            .collect(),
        camera_x: camera_x as i64,
        world_w: Some(dims.width_tiles),
        world_h: Some(dims.height_tiles),
    }
}

/// Serialize a level to pretty JSON bytes
pub fn serialize_level(store: &LevelStore, camera_x: i32, dims: &WorldDimensions) -> Result<Vec<u8>, LevelError> {
    let doc = level_document(store, camera_x, dims);
    serde_json::to_vec_pretty(&doc).map_err(LevelError::Encode)
}

/// Load a level using the storage backend
///
/// Returns `Ok(None)` when the document does not exist.
pub fn load_level(
    storage: &LocalStorage,
    path: &Path,
    fallback: WorldDimensions,
) -> Result<Option<ParsedLevel>, LevelError> {
    let bytes = match storage.read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.is_not_found() => {
            info!("No level at {}, starting fresh", path.display());
            return Ok(None);
        }
        Err(e) => {
            error!("Could not open level {}: {}", path.display(), e);
            return Err(LevelError::Open(e));
        }
    };

    match parse_level_data(&bytes, fallback) {
        Ok(parsed) => {
            let r = &parsed.report;
            info!(
                "Loaded level from {}: {} tiles, {} unknown tiles, {} malformed coordinates, {} out of bounds; world {}x{}",
                path.display(),
                r.loaded,
                r.skipped_unknown_tile,
                r.skipped_malformed_coordinate,
                r.skipped_out_of_bounds,
                parsed.dims.width_tiles,
                parsed.dims.height_tiles,
            );
            Ok(Some(parsed))
        }
        Err(e) => {
            error!("Level {} is unusable: {}", path.display(), e);
            Err(e)
        }
    }
}

/// Save a level using the storage backend
pub fn save_level(
    storage: &LocalStorage,
    path: &Path,
    store: &LevelStore,
    camera_x: i32,
    dims: &WorldDimensions,
) -> Result<(), LevelError> {
    let data = serialize_level(store, camera_x, dims)?;
    match storage.write(path, &data) {
        Ok(()) => {
            info!("Saved {} tiles to {}", store.len(), path.display());
            Ok(())
        }
        Err(e) => {
            error!("Could not save level to {}: {}", path.display(), e);
            Err(LevelError::Write(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dims() -> WorldDimensions {
        WorldDimensions::new(100, 24, 32)
    }

    #[test]
    fn test_parse_coord_key() {
        assert_eq!(parse_coord_key("2,3"), Some((2, 3)));
        assert_eq!(parse_coord_key("120,0"), Some((120, 0)));
        assert_eq!(parse_coord_key("x,y"), None);
        assert_eq!(parse_coord_key("2, 3"), None);
        assert_eq!(parse_coord_key("2,3,4"), None);
        assert_eq!(parse_coord_key("-1,3"), Some((-1, 3)));
        assert_eq!(parse_coord_key("23"), None);
        assert_eq!(parse_coord_key(",3"), None);
        assert_eq!(parse_coord_key("-,3"), None);
        assert_eq!(parse_coord_key("99999999999,3"), Some((99_999_999_999, 3)));
        assert_eq!(parse_coord_key("99999999999999999999,3"), Some((i64::MAX, 3)));
    }

    #[test]
    fn test_integer_keys_outside_world_are_out_of_bounds() {
        let json = br#"{"level": {"-1,3": "Coin", "4294967296,1": "Brick", "2,-7": "Coin", "1,1": "Coin"}}"#;
        let parsed = parse_level_data(json, dims()).unwrap();
        assert_eq!(parsed.entries, vec![(GridCoord::new(1, 1), TileType::Coin)]);
        assert_eq!(parsed.report.skipped_out_of_bounds, 3);
        assert_eq!(parsed.report.skipped_malformed_coordinate, 0);
    }

    #[test]
    fn test_partial_corruption_tolerance() {
        let json = br#"{"level": {"2,3": "Coin", "9,9": "NotATile"}}"#;
        let parsed = parse_level_data(json, dims()).unwrap();
        assert_eq!(parsed.entries, vec![(GridCoord::new(2, 3), TileType::Coin)]);
        assert_eq!(parsed.report.skipped_unknown_tile, 1);
        assert_eq!(parsed.report.loaded, 1);
    }

    #[test]
    fn test_malformed_key_tolerance() {
        let json = br#"{"level": {"x,y": "Coin"}}"#;
        let parsed = parse_level_data(json, dims()).unwrap();
        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.report.skipped_malformed_coordinate, 1);
        assert_eq!(parsed.report.skipped_unknown_tile, 0);
    }

    #[test]
    fn test_every_entry_skipped_still_succeeds() {
        let json = br#"{"level": {"a": "Coin", "1,1": 7, "500,1": "Brick"}, "camera_x": 64}"#;
        let parsed = parse_level_data(json, dims()).unwrap();
        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.report.skipped_malformed_coordinate, 1);
        assert_eq!(parsed.report.skipped_unknown_tile, 1);
        assert_eq!(parsed.report.skipped_out_of_bounds, 1);
        assert_eq!(parsed.report.skipped(), 3);
        assert_eq!(parsed.camera_x, 64);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let parsed = parse_level_data(b"{}", dims()).unwrap();
        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.camera_x, 0);
        assert_eq!(parsed.dims, dims());
    }

    #[test]
    fn test_document_dimensions_win() {
        let json = br#"{"level": {"150,30": "Goomba"}, "world_w": 200, "world_h": 40}"#;
        let parsed = parse_level_data(json, dims()).unwrap();
        assert_eq!(parsed.dims, WorldDimensions::new(200, 40, 32));
        assert_eq!(parsed.entries, vec![(GridCoord::new(150, 30), TileType::Goomba)]);
    }

    #[test]
    fn test_legacy_names_load() {
        let json = br#"{"level": {"1,1": "? Block", "2,1": "Pipe Top Left"}}"#;
        let parsed = parse_level_data(json, dims()).unwrap();
        assert_eq!(
            parsed.entries,
            vec![
                (GridCoord::new(1, 1), TileType::QuestionBlock),
                (GridCoord::new(2, 1), TileType::PipeTopLeft),
            ]
        );
    }

    #[test]
    fn test_corrupt_documents_rejected() {
        assert!(matches!(parse_level_data(b"{\"level\": {", dims()), Err(LevelError::Corrupt(_))));
        assert!(matches!(parse_level_data(b"[1, 2, 3]", dims()), Err(LevelError::Corrupt(_))));
        assert!(matches!(parse_level_data(br#"{"level": []}"#, dims()), Err(LevelError::Corrupt(_))));
        assert!(matches!(parse_level_data(br#"{"camera_x": "far"}"#, dims()), Err(LevelError::Corrupt(_))));
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(matches!(parse_level_data(br#"{"world_w": 0}"#, dims()), Err(LevelError::Invalid(_))));
        assert!(matches!(
            parse_level_data(br#"{"world_h": 10000000}"#, dims()),
            Err(LevelError::Invalid(_))
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let mut store = LevelStore::new(100, 24);
        store.set(GridCoord::new(2, 3), TileType::QuestionBlock).unwrap();
        let bytes = serialize_level(&store, 96, &dims()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["level"]["2,3"], "QuestionBlock");
        assert_eq!(value["camera_x"], 96);
        assert_eq!(value["world_w"], 100);
        assert_eq!(value["world_h"], 24);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        let world = WorldDimensions::new(60, 20, 32);

        let mut store = LevelStore::new(60, 20);
        store.set(GridCoord::new(0, 19), TileType::Ground).unwrap();
        store.set(GridCoord::new(59, 0), TileType::PlayerStart).unwrap();
        store.set(GridCoord::new(10, 10), TileType::PipeRight).unwrap();

        save_level(&storage, Path::new("level.json"), &store, 320, &world).unwrap();
        let parsed = load_level(&storage, Path::new("level.json"), dims()).unwrap().unwrap();

        assert_eq!(parsed.entries, store.snapshot());
        assert_eq!(parsed.camera_x, 320);
        assert_eq!(parsed.dims, world);
        assert_eq!(parsed.report.skipped(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        assert!(load_level(&storage, Path::new("nope.json"), dims()).unwrap().is_none());
    }

    #[test]
    fn test_save_failure_reported() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        std::fs::create_dir(dir.path().join("level.json")).unwrap();

        let store = LevelStore::new(10, 10);
        let result = save_level(&storage, Path::new("level.json"), &store, 0, &dims());
        assert!(matches!(result, Err(LevelError::Write(_))));
    }
}
