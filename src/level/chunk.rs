/// Fixed-size chunk of tiles.
///
/// A chunk is the unit of sparse storage: a dense 16x16 block of tiles
/// addressed by local coordinates. The chunk does not know where it sits in
/// the level; that is held by whoever owns it.
use crate::tile::Tile;

/// The size of each chunk in tiles, along both axes.
pub const CHUNK_SIZE: usize = 16;

/// The number of tiles in a chunk.
pub const TILE_COUNT: usize = CHUNK_SIZE * CHUNK_SIZE;

/// Read/write access to the tiles of a single chunk.
///
/// Implemented by the plain [`Chunk`] and by render decorators that mirror
/// writes into a scene, so callers do not need to know which one they hold.
pub trait TileGrid {
    /// Sets the tile at local chunk coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `z` is not in `0..CHUNK_SIZE`.
    fn set_tile(&mut self, x: usize, z: usize, tile: Tile);

    /// Gets the tile at local chunk coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `z` is not in `0..CHUNK_SIZE`.
    fn get_tile(&self, x: usize, z: usize) -> Tile;
}

/// Converts local chunk coordinates to an index into the flat tile array.
///
/// Out of range coordinates are a caller bug and abort loudly instead of
/// wrapping into a neighbouring row.
#[inline]
pub fn local_to_index(x: usize, z: usize) -> usize {
    assert!(
        x < CHUNK_SIZE && z < CHUNK_SIZE,
        "tile coordinates ({x}, {z}) out of chunk bounds"
    );
    x * CHUNK_SIZE + z
}

/// Converts an index into the flat tile array back to local coordinates.
#[inline]
pub const fn index_to_local(index: usize) -> (usize, usize) {
    (index / CHUNK_SIZE, index % CHUNK_SIZE)
}

/// Chunk that keeps its tiles in a flat array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Tiles stored as `x * CHUNK_SIZE + z`
    tiles: Box<[Tile; TILE_COUNT]>,
}

impl Chunk {
    /// Creates a chunk with every tile set to `Void`.
    pub fn new() -> Self {
        Self {
            tiles: Box::new([Tile::Void; TILE_COUNT]),
        }
    }

    /// Iterates over every cell as `(x, z, tile)`.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(index, tile)| {
            let (x, z) = index_to_local(index);
            (x, z, *tile)
        })
    }

    /// Returns true if no cell holds anything but `Void`.
    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(|tile| tile.is_void())
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGrid for Chunk {
    #[inline]
    fn set_tile(&mut self, x: usize, z: usize, tile: Tile) {
        self.tiles[local_to_index(x, z)] = tile;
    }

    #[inline]
    fn get_tile(&self, x: usize, z: usize) -> Tile {
        self.tiles[local_to_index(x, z)]
    }
}
