//! brickworks: a tile level editor for side-scrolling platformer worlds
//!
//! Paint tiles onto a wide sparse grid, scroll across it, save and load
//! JSON level documents, export the world as a PNG.
//!
//! - `world` - tile types, sparse level store, level documents
//! - `editor` - camera, tile renderers, render pipeline, session, input
//! - `rasterizer` - `Canvas` trait and the software `Framebuffer`
//! - `ui` - window canvas, input snapshot, layout helpers
//! - `storage` - local filesystem backend with atomic writes
//! - `config` - RON editor configuration

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod editor;
pub mod rasterizer;
pub mod storage;
pub mod ui;
pub mod world;
