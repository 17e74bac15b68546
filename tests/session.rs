//! End-to-end editing: place, erase, scroll, save, load

use std::path::Path;

use brickworks::editor::{Camera, EditorSession, LoadOutcome, RenderPipeline, Viewport};
use brickworks::rasterizer::{Color, Framebuffer};
use brickworks::storage::LocalStorage;
use brickworks::world::{GridCoord, LevelError, TileType, WorldDimensions};
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
fn test_edit_save_reload() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);

    for x in 0..100 {
        s.place(GridCoord::new(x, 23), TileType::Ground).unwrap();
    }
    s.place(GridCoord::new(10, 18), TileType::QuestionBlock).unwrap();
    s.place(GridCoord::new(3, 22), TileType::PlayerStart).unwrap();
    s.erase(GridCoord::new(50, 23));
    s.scroll(640);
    s.save(Path::new("level.json")).unwrap();

    let mut reloaded = session(&dir);
    let LoadOutcome::Loaded(report) = reloaded.load(Path::new("level.json")).unwrap() else {
        panic!("expected the saved level");
    };
    assert_eq!(report.loaded, 101);
    assert_eq!(report.skipped(), 0);
    assert_eq!(reloaded.store().snapshot(), s.store().snapshot());
    assert_eq!(reloaded.store().get(GridCoord::new(50, 23)), None);
    assert_eq!(reloaded.camera().offset_x, 640);
}

#[test]
fn test_saved_document_format() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);
    s.place(GridCoord::new(2, 3), TileType::Brick).unwrap();
    s.save(Path::new("level.json")).unwrap();

    let text = std::fs::read_to_string(dir.path().join("level.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["level"]["2,3"], "Brick");
    assert_eq!(doc["camera_x"], 0);
    assert_eq!(doc["world_w"], 100);
    assert_eq!(doc["world_h"], 24);
}

#[test]
fn test_partially_corrupt_document() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("level.json"),
        r#"{
            "level": {
                "2,3": "Brick",
                "4,5": "Dragon",
                "x,y": "Coin",
                "500,1": "Coin",
                "6,7": "Coin"
            },
            "camera_x": 0
        }"#,
    )
    .unwrap();

    let mut s = session(&dir);
    let LoadOutcome::Loaded(report) = s.load(Path::new("level.json")).unwrap() else {
        panic!("expected a loaded level");
    };
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped_unknown_tile, 1);
    assert_eq!(report.skipped_malformed_coordinate, 1);
    assert_eq!(report.skipped_out_of_bounds, 1);
    assert_eq!(s.store().get(GridCoord::new(2, 3)), Some(TileType::Brick));
    assert_eq!(s.store().get(GridCoord::new(6, 7)), Some(TileType::Coin));
}

#[test]
fn test_unreadable_document_resets_session() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("level.json"), "[1, 2, 3]").unwrap();

    let mut s = session(&dir);
    s.place(GridCoord::new(1, 1), TileType::Coin).unwrap();
    assert!(matches!(s.load(Path::new("level.json")), Err(LevelError::Corrupt(_))));
    assert!(s.store().is_empty());
    assert_eq!(s.camera(), Camera::new());

    // The session stays usable
    assert_eq!(s.place(GridCoord::new(1, 1), TileType::Coin), Ok(true));
}

#[test]
fn test_rendered_frame_matches_store() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);
    s.place(GridCoord::new(1, 2), TileType::SolidBlock).unwrap();
    s.place(GridCoord::new(90, 2), TileType::SolidBlock).unwrap();

    let pipeline = RenderPipeline::new();
    let mut fb = Framebuffer::new(1024, 768);
    fb.clear(Color::WHITE);
    let stats = pipeline.render_frame(&mut fb, s.store(), &s.transform(), s.viewport());
    assert_eq!(stats.drawn, 1);
    // Cell (1, 2) covers (32..64, 64..96)
    assert_ne!(fb.get_pixel(48, 80), Some(Color::WHITE));

    s.scroll(10_000);
    let mut fb = Framebuffer::new(1024, 768);
    fb.clear(Color::WHITE);
    let stats = pipeline.render_frame(&mut fb, s.store(), &s.transform(), s.viewport());
    assert_eq!(stats.drawn, 1);
    assert_eq!(fb.get_pixel(48, 80), Some(Color::WHITE));
}
