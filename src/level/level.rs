/// Sparse level storage.
///
/// A level maps chunk coordinates to chunks. Chunks only exist where
/// something has been written; everywhere else the level reads as `Void`.
/// World tile coordinates are split into a chunk coordinate and a local
/// coordinate with Euclidean division, so negative coordinates land in the
/// right chunk.
use super::chunk::{TileGrid, CHUNK_SIZE};
use crate::tile::Tile;
use bevy::math::Vec3;
use std::collections::HashMap;
use tracing::trace;

/// Position of a chunk in chunk coordinates.
///
/// Any pair of integers is a valid chunk position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkPosition {
    pub x: i32,
    pub z: i32,
}

impl ChunkPosition {
    /// Creates a new chunk position.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World tile coordinate of this chunk's `(0, 0)` cell.
    ///
    /// Saturates at the `i32` range. Chunks beyond roughly 134 million in
    /// either direction hold no tile reachable by world coordinates.
    pub const fn origin_tile(&self) -> TilePosition {
        TilePosition {
            x: self.x.saturating_mul(CHUNK_SIZE as i32),
            z: self.z.saturating_mul(CHUNK_SIZE as i32),
        }
    }

    /// Converts the chunk position to a world-space offset.
    ///
    /// Tiles are one world unit wide and the grid lies in the XZ plane.
    /// Computed in floating point, so every chunk position has an offset.
    pub fn world_origin(&self) -> Vec3 {
        Vec3::new(
            self.x as f32 * CHUNK_SIZE as f32,
            0.0,
            self.z as f32 * CHUNK_SIZE as f32,
        )
    }
}

/// Position of a tile in world tile coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TilePosition {
    pub x: i32,
    pub z: i32,
}

impl TilePosition {
    /// Creates a new tile position.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk that owns this tile.
    pub const fn chunk(&self) -> ChunkPosition {
        ChunkPosition {
            x: self.x.div_euclid(CHUNK_SIZE as i32),
            z: self.z.div_euclid(CHUNK_SIZE as i32),
        }
    }

    /// The local coordinates of this tile inside its chunk.
    ///
    /// Both components are always in `0..CHUNK_SIZE`.
    pub const fn local(&self) -> (usize, usize) {
        (
            self.x.rem_euclid(CHUNK_SIZE as i32) as usize,
            self.z.rem_euclid(CHUNK_SIZE as i32) as usize,
        )
    }
}

/// Chunk storage for a level.
///
/// Implemented by the plain [`Level`] and by render decorators, so the
/// world-coordinate helpers and the dungeon generator work on either.
pub trait GridStore {
    /// The chunk type held by this store.
    type Chunk: TileGrid;

    /// Inserts, replaces or removes the chunk at a chunk position.
    ///
    /// Passing `None` removes the chunk; removing a missing chunk does
    /// nothing. Returns the chunk previously stored there, if any.
    fn set_chunk(
        &mut self,
        position: ChunkPosition,
        chunk: Option<Self::Chunk>,
    ) -> Option<Self::Chunk>;

    /// Gets the chunk at a chunk position, if one has been materialized.
    fn get_chunk(&self, position: ChunkPosition) -> Option<&Self::Chunk>;

    /// Gets a mutable chunk at a chunk position, if one has been materialized.
    fn get_chunk_mut(&mut self, position: ChunkPosition) -> Option<&mut Self::Chunk>;

    /// Iterates over all materialized chunks.
    ///
    /// The order is unspecified. The iterator borrows the store, so it can
    /// be recreated at any time without side effects.
    fn iter_chunks(&self) -> impl Iterator<Item = (ChunkPosition, &Self::Chunk)>;
}

/// Gets the tile at a world position.
///
/// Returns `Void` when the owning chunk has not been materialized.
pub fn get_tile<L: GridStore>(level: &L, x: i32, z: i32) -> Tile {
    let pos = TilePosition::new(x, z);
    let (local_x, local_z) = pos.local();

    level
        .get_chunk(pos.chunk())
        .map(|chunk| chunk.get_tile(local_x, local_z))
        .unwrap_or(Tile::Void)
}

/// Sets the tile at a world position.
///
/// If the owning chunk does not exist yet, `factory` builds a fresh one and
/// it is installed with [`GridStore::set_chunk`] before the write happens.
/// `factory` is not called when the chunk already exists.
///
/// # Panics
///
/// Panics if the store does not keep the chunk it was just given.
pub fn set_tile<L, F>(factory: F, level: &mut L, x: i32, z: i32, tile: Tile)
where
    L: GridStore,
    F: FnOnce() -> L::Chunk,
{
    let pos = TilePosition::new(x, z);
    let chunk_pos = pos.chunk();
    let (local_x, local_z) = pos.local();

    if level.get_chunk(chunk_pos).is_none() {
        trace!(
            chunk_x = chunk_pos.x,
            chunk_z = chunk_pos.z,
            "Materializing chunk"
        );
        level.set_chunk(chunk_pos, Some(factory()));
    }

    let chunk = level.get_chunk_mut(chunk_pos).unwrap_or_else(|| {
        panic!(
            "chunk ({}, {}) missing after set_chunk",
            chunk_pos.x, chunk_pos.z
        )
    });
    chunk.set_tile(local_x, local_z, tile);
}

/// Returns the inclusive world tile rectangle covered by materialized chunks.
///
/// The rectangle is `(min, max)`; `None` if the level has no chunks. Both
/// corners are clamped to the `i32` tile range.
pub fn tile_bounds<L: GridStore>(level: &L) -> Option<(TilePosition, TilePosition)> {
    let mut chunks = level.iter_chunks().map(|(pos, _)| pos);
    let first = chunks.next()?;
    let (min, max) = chunks.fold((first, first), |(min, max), pos| {
        (
            ChunkPosition::new(min.x.min(pos.x), min.z.min(pos.z)),
            ChunkPosition::new(max.x.max(pos.x), max.z.max(pos.z)),
        )
    });

    let last = CHUNK_SIZE as i32 - 1;
    let max_origin = max.origin_tile();
    Some((
        min.origin_tile(),
        TilePosition::new(
            max_origin.x.saturating_add(last),
            max_origin.z.saturating_add(last),
        ),
    ))
}

/// Level that keeps its chunks in a hash map keyed by chunk position.
#[derive(Debug, Clone)]
pub struct Level<C> {
    /// All materialized chunks, indexed by chunk position
    chunks: HashMap<ChunkPosition, C>,
}

impl<C> Level<C> {
    /// Creates a level with no chunks.
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
        }
    }

    /// Number of materialized chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl<C> Default for Level<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TileGrid> GridStore for Level<C> {
    type Chunk = C;

    fn set_chunk(&mut self, position: ChunkPosition, chunk: Option<C>) -> Option<C> {
        match chunk {
            Some(chunk) => self.chunks.insert(position, chunk),
            None => self.chunks.remove(&position),
        }
    }

    fn get_chunk(&self, position: ChunkPosition) -> Option<&C> {
        self.chunks.get(&position)
    }

    fn get_chunk_mut(&mut self, position: ChunkPosition) -> Option<&mut C> {
        self.chunks.get_mut(&position)
    }

    fn iter_chunks(&self) -> impl Iterator<Item = (ChunkPosition, &C)> {
        self.chunks.iter().map(|(pos, chunk)| (*pos, chunk))
    }
}
