//! Basic value types for working with template tiles.
mod point;
mod tile;

pub use point::StartingPoint;
pub use tile::TileType;
