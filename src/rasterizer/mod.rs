//! 2D software rasterizer
//!
//! # Module Organization
//!
//! - `types` - Color
//! - `canvas` - Canvas trait, DrawError, FontWeight, Radii
//! - `render` - Framebuffer (RGBA buffer implementing Canvas, PNG export)
//! - `glyphs` - Built-in 5x7 bitmap font
//! - `spans` - Shape coverage as horizontal runs, shared by all backends
//! - `fallback` - FallbackChain for resources that may be missing

pub mod canvas;
pub mod fallback;
pub mod glyphs;
pub mod render;
pub mod spans;
pub mod types;

pub use canvas::{Canvas, DrawError, FontWeight, Radii};
pub use fallback::FallbackChain;
pub use render::Framebuffer;
pub use types::Color;
