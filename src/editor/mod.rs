//! Level Editor
//!
//! Horizontal scrolling tile editor:
//! - Editing area (camera, per-tile rendering, grid overlay)
//! - Tool palette strip along the bottom
//! - Cursor coordinate tooltip and status line

mod camera;
mod controller;
mod hud;
mod palette;
mod pipeline;
mod state;
mod tiles;

pub use camera::*;
pub use controller::*;
pub use hud::*;
pub use palette::*;
pub use pipeline::*;
pub use state::*;
pub use tiles::*;
