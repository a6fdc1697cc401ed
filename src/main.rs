use bevy::prelude::*;
use dungeon_tiles::level::tile_bounds;
use dungeon_tiles::render::{TileGroup, TileProxy};
use dungeon_tiles::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};

fn main() {
    profiling::init_profiling();

    let config = DungeonConfig {
        seed: seed_from_args(DungeonConfig::default().seed),
        ..Default::default()
    };
    info!(seed = config.seed, "Generating dungeon");

    // The scene needs its templates before any render chunk is built
    let mut world = World::new();
    world.insert_resource(TilePalette::placeholder());
    world.insert_resource(config.clone());
    let scene = Rc::new(RefCell::new(world));

    let level = RenderLevel::new(
        Rc::clone(&scene),
        Level::<RenderChunk<Chunk, World>>::new(),
    );
    let factory = render_chunk_factory(&scene, Chunk::new);

    let mut generator = DungeonGenerator::from_config(factory, level, config);
    let rooms = generator.generate_dungeon();
    let level = generator.into_level();

    let (proxies, groups) = {
        let mut world = scene.borrow_mut();
        let proxies = world.query::<&TileProxy>().iter(&world).count();
        let groups = world
            .query_filtered::<Entity, With<TileGroup>>()
            .iter(&world)
            .count();
        (proxies, groups)
    };

    info!(
        rooms = rooms.len(),
        chunks = level.iter_chunks().count(),
        proxies,
        groups,
        "Scene built"
    );

    match ascii_map(&level) {
        Some(map) => println!("{map}"),
        None => warn!("Dungeon is empty, nothing to draw"),
    }
}

/// Reads the seed from the first command line argument.
fn seed_from_args(default: u64) -> u64 {
    let Some(arg) = std::env::args().nth(1) else {
        return default;
    };

    match arg.parse() {
        Ok(seed) => seed,
        Err(err) => {
            warn!(%arg, %err, default, "Invalid seed, using default");
            default
        }
    }
}

/// Draws the materialized part of a level, one row per Z coordinate.
fn ascii_map<L: GridStore>(level: &L) -> Option<String> {
    let (min, max) = tile_bounds(level)?;

    let mut map = String::new();
    for z in min.z..=max.z {
        let row: String = (min.x..=max.x)
            .map(|x| get_tile(level, x, z).glyph())
            .collect();
        map.push_str(row.trim_end());
        map.push('\n');
    }
    Some(map)
}
