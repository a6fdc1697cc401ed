//! Tile kinds for the dungeon grid.
//!
//! A tile is the atomic unit of terrain occupying one grid cell. Tiles are
//! plain values with no identity; what a tile looks like is decided by the
//! render layer, not here.

/// Types of tiles that can occupy a grid cell.
///
/// `Void` is the default and stands for "nothing here", which is also what
/// every cell of a chunk that was never materialized reads as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tile {
    /// Empty space
    #[default]
    Void,
    /// Doorway between dungeon rooms
    DungeonDoor,
    /// Walkable room floor
    DungeonFloor,
    /// Room wall
    DungeonWall,
}

impl Tile {
    /// Every tile kind, in declaration order.
    pub const ALL: [Tile; 4] = [
        Tile::Void,
        Tile::DungeonDoor,
        Tile::DungeonFloor,
        Tile::DungeonWall,
    ];

    #[inline]
    pub const fn is_void(self) -> bool {
        matches!(self, Tile::Void)
    }

    /// Single character used when dumping a level as text.
    pub const fn glyph(self) -> char {
        match self {
            Tile::Void => ' ',
            Tile::DungeonDoor => '+',
            Tile::DungeonFloor => '.',
            Tile::DungeonWall => '#',
        }
    }
}
