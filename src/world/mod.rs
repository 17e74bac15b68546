//! World model
//!
//! - Tile types and editor tools
//! - Grid coordinates and world dimensions
//! - Sparse tile storage
//! - Level documents on disk

mod grid;
mod level;
mod store;
mod tile;

pub use grid::*;
pub use level::*;
pub use store::*;
pub use tile::*;
