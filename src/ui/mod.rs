//! Immediate-mode UI support for the editor window
//!
//! - `rect` - integer rectangles shared by layout, clipping and hit-testing
//! - `theme` - colors and font sizes
//! - `input` - per-frame input snapshot
//! - `label` - top-left anchored text
//! - `screen` - macroquad implementation of `Canvas`

mod input;
pub mod label;
mod rect;
mod screen;
pub mod theme;

pub use input::{EditorKey, InputState, ModifierKeys, MouseButtons};
pub use rect::*;
pub use screen::{load_bold_font, ScreenCanvas};
