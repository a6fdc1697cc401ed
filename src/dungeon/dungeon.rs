/// Dungeon generation implementation.
///
/// The generator lays rooms out on a coarse grid of slots. Each slot either
/// stays empty or receives one room jittered inside the slot, and rooms are
/// written straight into the level through the world-coordinate helpers, so
/// chunks appear wherever a room lands.
use crate::level::{set_tile, GridStore};
use crate::tile::Tile;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    fn random(&mut self) -> f64;
}

impl<R: rand::RngCore> RandomSource for R {
    #[inline]
    fn random(&mut self) -> f64 {
        rand::Rng::gen::<f64>(self)
    }
}

/// Picks an integer between `lower` and `upper` by scaling and rounding.
///
/// Halves round toward positive infinity. Because of the rounding the two
/// endpoints are each half as likely as the values between them.
pub fn random_int<R: RandomSource + ?Sized>(rng: &mut R, lower: i32, upper: i32) -> i32 {
    let value = lower as f64 + (upper - lower) as f64 * rng.random();
    (value + 0.5).floor() as i32
}

/// Configuration for dungeon generation.
///
/// The defaults give a 5x5 grid of 20-tile slots where roughly half the
/// slots hold a room.
#[derive(Resource, Clone, Debug)]
pub struct DungeonConfig {
    /// Seed for the random source built by [`DungeonGenerator::from_config`]
    pub seed: u64,
    /// Number of room slots along X
    pub slots_x: i32,
    /// Number of room slots along Z
    pub slots_z: i32,
    /// Distance in tiles between the origins of neighbouring slots
    pub slot_stride: i32,
    /// Probability that a slot is left empty
    pub skip_chance: f64,
    /// Minimum offset of a room inside its slot (inclusive)
    pub min_offset: i32,
    /// Maximum offset of a room inside its slot (inclusive)
    pub max_offset: i32,
    /// Minimum room width and height (inclusive)
    pub min_room_size: i32,
    /// Maximum room width and height (inclusive)
    pub max_room_size: i32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            slots_x: 5,
            slots_z: 5,
            slot_stride: 20,
            skip_chance: 0.5,
            min_offset: 2,
            max_offset: 6,
            min_room_size: 4,
            max_room_size: 12,
        }
    }
}

/// A room placed by the generator.
///
/// `(x, z)` is the top-left wall corner; the opposite corner is at
/// `(x + width, z + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub z: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    /// Returns true if the world tile lies inside the room's walls.
    pub fn contains_floor(&self, x: i32, z: i32) -> bool {
        x > self.x && x < self.x + self.width && z > self.z && z < self.z + self.height
    }
}

/// Dungeon generator.
///
/// Owns the level it writes into. Chunks are created on demand with the
/// chunk factory, which must return an empty chunk on every call.
pub struct DungeonGenerator<R, F, L> {
    /// Random source for every decision the generator makes
    rng: R,
    /// Builds an empty chunk whenever a write lands outside existing chunks
    chunk_factory: F,
    /// Level the rooms are carved into
    level: L,
    /// Configuration for dungeon generation
    config: DungeonConfig,
}

impl<F, L> DungeonGenerator<StdRng, F, L>
where
    L: GridStore,
    F: FnMut() -> L::Chunk,
{
    /// Creates a generator whose random source is seeded from `config.seed`.
    pub fn from_config(chunk_factory: F, level: L, config: DungeonConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_config(rng, chunk_factory, level, config)
    }
}

impl<R, F, L> DungeonGenerator<R, F, L>
where
    R: RandomSource,
    L: GridStore,
    F: FnMut() -> L::Chunk,
{
    /// Creates a generator with the default configuration.
    pub fn new(rng: R, chunk_factory: F, level: L) -> Self {
        Self::with_config(rng, chunk_factory, level, DungeonConfig::default())
    }

    /// Creates a generator with the given configuration.
    pub fn with_config(rng: R, chunk_factory: F, level: L, config: DungeonConfig) -> Self {
        Self {
            rng,
            chunk_factory,
            level,
            config,
        }
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// The level being generated.
    pub fn level(&self) -> &L {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut L {
        &mut self.level
    }

    /// Consumes the generator and returns the level.
    pub fn into_level(self) -> L {
        self.level
    }

    fn set_tile(&mut self, x: i32, z: i32, tile: Tile) {
        set_tile(&mut self.chunk_factory, &mut self.level, x, z, tile);
    }

    /// Generates a dungeon.
    ///
    /// Visits every slot, X-major, and for each one first decides whether to
    /// skip it, then draws the room's X offset, Z offset, width and height,
    /// in that order. Returns the rooms that were placed.
    #[instrument(skip(self), fields(
        slots_x = self.config.slots_x,
        slots_z = self.config.slots_z,
    ))]
    pub fn generate_dungeon(&mut self) -> Vec<Room> {
        let profiler = crate::profiling::Profiler::new("generate_dungeon");
        let config = self.config.clone();
        let mut rooms = Vec::new();

        for slot_x in 0..config.slots_x {
            for slot_z in 0..config.slots_z {
                if self.rng.random() < config.skip_chance {
                    continue;
                }

                let room = Room {
                    x: config.slot_stride * slot_x
                        + random_int(&mut self.rng, config.min_offset, config.max_offset),
                    z: config.slot_stride * slot_z
                        + random_int(&mut self.rng, config.min_offset, config.max_offset),
                    width: random_int(&mut self.rng, config.min_room_size, config.max_room_size),
                    height: random_int(&mut self.rng, config.min_room_size, config.max_room_size),
                };

                debug!(
                    slot_x,
                    slot_z,
                    x = room.x,
                    z = room.z,
                    width = room.width,
                    height = room.height,
                    "Placing room"
                );
                self.generate_room(room.x, room.z, room.width, room.height);
                rooms.push(room);
            }
        }

        profiler.metric("rooms", rooms.len());
        info!(
            rooms = rooms.len(),
            slots = config.slots_x * config.slots_z,
            chunks = self.level.iter_chunks().count(),
            elapsed_us = profiler.elapsed().as_micros(),
            "Dungeon generation completed"
        );

        rooms
    }

    /// Carves a room with its top-left corner at `(x, z)`.
    ///
    /// Walls run along `x`, `x + w`, `z` and `z + h`; everything strictly
    /// inside is floor. Earlier contents are overwritten, so a room placed
    /// over another one wins wherever they overlap.
    pub fn generate_room(&mut self, x: i32, z: i32, w: i32, h: i32) {
        // Horizontal walls
        for tx in (x + 1)..(x + w) {
            self.set_tile(tx, z, Tile::DungeonWall);
            self.set_tile(tx, z + h, Tile::DungeonWall);
        }

        // Vertical walls
        for tz in (z + 1)..(z + h) {
            self.set_tile(x, tz, Tile::DungeonWall);
            self.set_tile(x + w, tz, Tile::DungeonWall);
        }

        // Corners are always walls, even for degenerate sizes
        self.set_tile(x, z, Tile::DungeonWall);
        self.set_tile(x, z + h, Tile::DungeonWall);
        self.set_tile(x + w, z, Tile::DungeonWall);
        self.set_tile(x + w, z + h, Tile::DungeonWall);

        // Floor
        for tx in (x + 1)..(x + w) {
            for tz in (z + 1)..(z + h) {
                self.set_tile(tx, tz, Tile::DungeonFloor);
            }
        }
    }
}
