//! Editor session: the single owner of everything a level edit touches
//!
//! Holds the store, camera, world dimensions, viewport, selected tool and
//! the transient status message. The frame loop owns exactly one session
//! and feeds it `EditorCommand`s.

use std::path::{Path, PathBuf};

use log::{debug, info};

use super::camera::{Camera, CameraTransform, Viewport};
use super::controller::EditorCommand;
use super::pipeline::RenderPipeline;
use crate::storage::LocalStorage;
use crate::world::{self, GridCoord, LevelError, LevelStore, LoadReport, StoreError, TileType, Tool, WorldDimensions};

/// Seconds a success message stays on screen
const STATUS_SHORT: f64 = 3.0;
/// Seconds an error message stays on screen
const STATUS_LONG: f64 = 5.0;

/// Result of a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No document at the path: empty level, camera at 0
    Fresh,
    /// Document applied; counts of loaded and skipped entries
    Loaded(LoadReport),
}

pub struct EditorSession {
    store: LevelStore,
    camera: Camera,
    dims: WorldDimensions,
    viewport: Viewport,
    storage: LocalStorage,

    /// Tool used by left-button painting
    pub tool: Tool,
    /// Grid overlay visible
    pub show_grid: bool,
    /// Target of the save/load shortcuts
    pub level_path: PathBuf,
    /// Target of PNG export
    pub export_path: PathBuf,

    /// (message, expiry time on `clock`)
    status_message: Option<(String, f64)>,
    /// Seconds elapsed, advanced by `tick`
    clock: f64,
}

impl EditorSession {
    pub fn new(dims: WorldDimensions, viewport: Viewport, storage: LocalStorage, level_path: impl Into<PathBuf>) -> Self {
        Self {
            store: LevelStore::new(dims.width_tiles, dims.height_tiles),
            camera: Camera::new(),
            dims,
            viewport,
            storage,
            tool: Tool::default(),
            show_grid: true,
            level_path: level_path.into(),
            export_path: PathBuf::from("level.png"),
            status_message: None,
            clock: 0.0,
        }
    }

    pub fn store(&self) -> &LevelStore {
        &self.store
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn dims(&self) -> WorldDimensions {
        self.dims
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Camera + world snapshot for this frame
    pub fn transform(&self) -> CameraTransform {
        self.camera.transform(self.dims)
    }

    /// Adopt a new editing-area size (window resize)
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.camera.clamp_to(&self.dims, viewport.width);
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Put `tile` at `coord`; `Ok(false)` when the cell already holds it
    pub fn place(&mut self, coord: GridCoord, tile: TileType) -> Result<bool, StoreError> {
        self.store.set(coord, tile)
    }

    /// Clear `coord`, returning what was there
    pub fn erase(&mut self, coord: GridCoord) -> Option<TileType> {
        self.store.erase(coord)
    }

    /// Scroll the camera by `delta` pixels, clamped to the world
    pub fn scroll(&mut self, delta: i32) {
        self.camera.scroll(delta, &self.dims, self.viewport.width);
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            debug!("Selected {}", tool.label());
            self.tool = tool;
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the level to `path`; the in-memory level is untouched either way
    pub fn save(&mut self, path: &Path) -> Result<(), LevelError> {
        match world::save_level(&self.storage, path, &self.store, self.camera.offset_x, &self.dims) {
            Ok(()) => {
                self.set_status(&format!("Saved {}", path.display()), STATUS_SHORT);
                Ok(())
            }
            Err(e) => {
                self.set_status(&format!("Save failed: {}", e), STATUS_LONG);
                Err(e)
            }
        }
    }

    /// Replace the level with the document at `path`
    ///
    /// A missing file gives an empty level. Any other failure also leaves
    /// an empty level with the camera at 0, and the error is returned.
    pub fn load(&mut self, path: &Path) -> Result<LoadOutcome, LevelError> {
        match world::load_level(&self.storage, path, self.dims) {
            Ok(None) => {
                self.reset();
                self.set_status("New level", STATUS_SHORT);
                Ok(LoadOutcome::Fresh)
            }
            Ok(Some(parsed)) => {
                self.dims = parsed.dims;
                self.store.resize(parsed.dims.width_tiles, parsed.dims.height_tiles);
                let dropped = self.store.restore(parsed.entries);
                if dropped > 0 {
                    debug!("{} entries dropped while applying level", dropped);
                }
                self.camera.set_offset(parsed.camera_x, &self.dims, self.viewport.width);

                let report = parsed.report;
                let message = if report.skipped() > 0 {
                    format!("Loaded {} tiles, skipped {}", report.loaded, report.skipped())
                } else {
                    format!("Loaded {} tiles", report.loaded)
                };
                self.set_status(&message, STATUS_SHORT);
                Ok(LoadOutcome::Loaded(report))
            }
            Err(e) => {
                self.reset();
                self.set_status(&format!("Load failed: {}", e), STATUS_LONG);
                Err(e)
            }
        }
    }

    /// Render the whole world to `path` as a PNG
    pub fn export(&mut self, path: &Path) {
        let target = self.storage.resolve(path);
        match RenderPipeline::new().export_png(&self.store, self.dims, self.show_grid, &target) {
            Ok(()) => self.set_status(&format!("Exported {}", path.display()), STATUS_SHORT),
            Err(e) => self.set_status(&format!("Export failed: {}", e), STATUS_LONG),
        }
    }

    fn reset(&mut self) {
        self.store.clear();
        self.camera = Camera::new();
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Apply one command
    ///
    /// Commands that need the host (file dialogs) are handed back.
    pub fn apply(&mut self, command: EditorCommand) -> Option<EditorCommand> {
        match command {
            EditorCommand::Place(coord, tile) => {
                if let Err(e) = self.place(coord, tile) {
                    debug!("Ignoring placement: {}", e);
                }
            }
            EditorCommand::Erase(coord) => {
                self.erase(coord);
            }
            EditorCommand::Scroll(delta) => self.scroll(delta),
            EditorCommand::SelectTool(tool) => self.select_tool(tool),
            EditorCommand::ToggleGrid => {
                self.show_grid = !self.show_grid;
                info!("Grid {}", if self.show_grid { "on" } else { "off" });
            }
            EditorCommand::Save => {
                let path = self.level_path.clone();
                // Failure is reported through the status line
                let _ = self.save(&path);
            }
            EditorCommand::Load => {
                let path = self.level_path.clone();
                let _ = self.load(&path);
            }
            EditorCommand::Export => {
                let path = self.export_path.clone();
                self.export(&path);
            }
            EditorCommand::SaveAs | EditorCommand::Open => return Some(command),
        }
        None
    }

    // =========================================================================
    // Status line
    // =========================================================================

    /// Advance the session clock by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        self.clock += dt.max(0.0);
    }

    /// Show a status message for `duration_secs`
    pub fn set_status(&mut self, message: &str, duration_secs: f64) {
        self.status_message = Some((message.to_string(), self.clock + duration_secs));
    }

    /// Current status message if not expired
    pub fn status(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, expiry)) if self.clock < *expiry => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> EditorSession {
        EditorSession::new(
            WorldDimensions::default(),
            Viewport::new(1024, 648),
            LocalStorage::with_base_dir(dir.path()),
            "level.json",
        )
    }

    #[test]
    fn test_place_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let c = GridCoord::new(4, 5);
        assert_eq!(s.place(c, TileType::Brick), Ok(true));
        assert_eq!(s.place(c, TileType::Brick), Ok(false));
        assert_eq!(s.store().len(), 1);
        assert_eq!(s.erase(c), Some(TileType::Brick));
        assert_eq!(s.erase(c), None);
    }

    #[test]
    fn test_place_out_of_bounds() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert!(s.place(GridCoord::new(100, 0), TileType::Coin).is_err());
        assert!(s.store().is_empty());
    }

    #[test]
    fn test_scroll_clamps() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.scroll(10_000);
        assert_eq!(s.camera().offset_x, 2176);
        s.scroll(-20_000);
        assert_eq!(s.camera().offset_x, 0);
    }

    #[test]
    fn test_viewport_change_reclamps_camera() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.scroll(10_000);
        s.set_viewport(Viewport::new(2048, 648));
        assert_eq!(s.camera().offset_x, 1152);
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.place(GridCoord::new(2, 3), TileType::Brick).unwrap();
        s.place(GridCoord::new(50, 20), TileType::PipeTopLeft).unwrap();
        s.scroll(320);
        s.save(Path::new("level.json")).unwrap();

        let mut t = session(&dir);
        let outcome = t.load(Path::new("level.json")).unwrap();
        match outcome {
            LoadOutcome::Loaded(report) => assert_eq!(report.loaded, 2),
            LoadOutcome::Fresh => panic!("expected a loaded level"),
        }
        assert_eq!(t.store().snapshot(), s.store().snapshot());
        assert_eq!(t.camera().offset_x, 320);
    }

    #[test]
    fn test_missing_file_is_fresh() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.place(GridCoord::new(1, 1), TileType::Coin).unwrap();
        s.scroll(100);
        assert!(matches!(s.load(Path::new("nope.json")), Ok(LoadOutcome::Fresh)));
        assert!(s.store().is_empty());
        assert_eq!(s.camera().offset_x, 0);
        assert_eq!(s.dims(), WorldDimensions::default());
    }

    #[test]
    fn test_corrupt_file_resets() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), b"{ not json").unwrap();
        let mut s = session(&dir);
        s.place(GridCoord::new(1, 1), TileType::Coin).unwrap();
        s.scroll(100);

        assert!(matches!(s.load(Path::new("bad.json")), Err(LevelError::Corrupt(_))));
        assert!(s.store().is_empty());
        assert_eq!(s.camera().offset_x, 0);
        assert!(s.status().is_some_and(|m| m.starts_with("Load failed")));
    }

    #[test]
    fn test_unopenable_file_resets() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("folder.json")).unwrap();
        let mut s = session(&dir);
        s.place(GridCoord::new(1, 1), TileType::Coin).unwrap();
        s.scroll(100);

        assert!(matches!(s.load(Path::new("folder.json")), Err(LevelError::Open(_))));
        assert!(s.store().is_empty());
        assert_eq!(s.camera().offset_x, 0);
        assert!(s.status().is_some_and(|m| m.starts_with("Load failed")));
    }

    #[test]
    fn test_loaded_camera_is_clamped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("level.json"),
            br#"{"level": {"1,1": "Brick"}, "camera_x": 99999, "world_w": 40, "world_h": 24}"#,
        )
        .unwrap();
        let mut s = session(&dir);
        s.load(Path::new("level.json")).unwrap();
        assert_eq!(s.dims().width_tiles, 40);
        assert_eq!(s.camera().offset_x, 40 * 32 - 1024);
    }

    #[test]
    fn test_apply_commands() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let c = GridCoord::new(3, 3);
        assert_eq!(s.apply(EditorCommand::Place(c, TileType::Goomba)), None);
        assert_eq!(s.store().get(c), Some(TileType::Goomba));
        s.apply(EditorCommand::Erase(c));
        assert!(s.store().is_empty());

        s.apply(EditorCommand::SelectTool(Tool::Eraser));
        assert_eq!(s.tool, Tool::Eraser);
        s.apply(EditorCommand::ToggleGrid);
        assert!(!s.show_grid);
        s.apply(EditorCommand::Scroll(15));
        assert_eq!(s.camera().offset_x, 15);

        assert_eq!(s.apply(EditorCommand::SaveAs), Some(EditorCommand::SaveAs));
        assert_eq!(s.apply(EditorCommand::Open), Some(EditorCommand::Open));
    }

    #[test]
    fn test_save_and_load_commands() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.apply(EditorCommand::Place(GridCoord::new(7, 7), TileType::Coin));
        s.apply(EditorCommand::Save);
        assert!(dir.path().join("level.json").is_file());

        s.apply(EditorCommand::Erase(GridCoord::new(7, 7)));
        s.apply(EditorCommand::Load);
        assert_eq!(s.store().get(GridCoord::new(7, 7)), Some(TileType::Coin));
    }

    #[test]
    fn test_export_command() {
        let dir = TempDir::new().unwrap();
        let mut s = EditorSession::new(
            WorldDimensions::new(4, 3, 8),
            Viewport::new(64, 48),
            LocalStorage::with_base_dir(dir.path()),
            "level.json",
        );
        s.export_path = dir.path().join("out.png");
        s.apply(EditorCommand::Export);
        assert!(dir.path().join("out.png").is_file());
        assert!(s.status().is_some_and(|m| m.starts_with("Exported")));
    }

    #[test]
    fn test_status_expires() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert_eq!(s.status(), None);
        s.set_status("Hello", 2.0);
        assert_eq!(s.status(), Some("Hello"));
        s.tick(1.5);
        assert_eq!(s.status(), Some("Hello"));
        s.tick(1.0);
        assert_eq!(s.status(), None);
    }
}
