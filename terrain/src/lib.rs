//! Box terrain generation from a heightmap.
//!
//! A heightmap CSV becomes a field of boxes: every cell is an axis-aligned
//! column rising from zero to its height. Adjacent columns share their
//! walls, so the exported mesh is a single closed surface. The result is
//! written as a body file with one fixed link.

mod error;
pub use error::TerrainError;

mod heightmap;
pub use heightmap::Heightmap;

mod mesh;
pub use mesh::{BoxTerrain, Corner, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};

mod body;
pub use body::{body_path, export, write_body};
