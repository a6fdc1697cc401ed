//! Dungeon tile grid.
//!
//! A sparse grid of 16x16 tile chunks, a room-carving dungeon generator
//! that writes into it, and render decorators that keep a bevy scene in
//! step with every write.
pub mod dungeon;
pub mod level;
pub mod profiling;
pub mod render;
pub mod tile;

pub use dungeon::{random_int, DungeonConfig, DungeonGenerator, RandomSource, Room};
pub use level::{
    get_tile, set_tile, Chunk, ChunkPosition, GridStore, Level, TileGrid, TilePosition,
    CHUNK_SIZE,
};
pub use render::{render_chunk_factory, RenderChunk, RenderLevel, SceneGraph, TilePalette};
pub use tile::Tile;
