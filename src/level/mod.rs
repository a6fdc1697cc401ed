/// Chunked tile grid.
///
/// This module provides the data model for the dungeon: fixed-size chunks of
/// tiles and a sparse level that materializes chunks on first write.
pub mod chunk;
#[allow(clippy::module_inception)]
pub mod level;

// Re-export the types needed by other modules
pub use self::chunk::{Chunk, TileGrid, CHUNK_SIZE, TILE_COUNT};
pub use self::level::{
    get_tile, set_tile, tile_bounds, ChunkPosition, GridStore, Level, TilePosition,
};
