#[cfg(test)]
mod tests {
    use crate::dungeon::{random_int, DungeonConfig, DungeonGenerator, RandomSource, Room};
    use crate::level::{get_tile, Chunk, GridStore, Level};
    use crate::tile::Tile;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays a fixed list of values, wrapping around at the end.
    struct Sequence {
        values: Vec<f64>,
        draws: usize,
    }

    impl Sequence {
        fn new(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                draws: 0,
            }
        }
    }

    impl RandomSource for Sequence {
        fn random(&mut self) -> f64 {
            let value = self.values[self.draws % self.values.len()];
            self.draws += 1;
            value
        }
    }

    type TestGenerator<R> = DungeonGenerator<R, fn() -> Chunk, Level<Chunk>>;

    fn generator<R: RandomSource>(rng: R) -> TestGenerator<R> {
        DungeonGenerator::new(rng, Chunk::new as fn() -> Chunk, Level::new())
    }

    /// A source whose every draw is just below 1.0.
    fn max_source() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_random_int_formula() {
        assert_eq!(random_int(&mut Sequence::new(&[0.0]), 2, 6), 2);
        assert_eq!(random_int(&mut Sequence::new(&[0.5]), 2, 6), 4);
        // 2 + 4 * 0.125 = 2.5 rounds up
        assert_eq!(random_int(&mut Sequence::new(&[0.125]), 2, 6), 3);
        assert_eq!(random_int(&mut Sequence::new(&[0.999]), 4, 12), 12);
        assert_eq!(random_int(&mut max_source(), 4, 12), 12);
        assert_eq!(random_int(&mut Sequence::new(&[0.3]), 7, 7), 7);
    }

    #[test]
    fn test_generate_room_layout() {
        let mut generator = generator(Sequence::new(&[0.0]));
        generator.generate_room(0, 0, 4, 4);
        let level = generator.level();

        for (x, z) in [(0, 0), (0, 4), (4, 0), (4, 4)] {
            assert_eq!(get_tile(level, x, z), Tile::DungeonWall, "corner ({x}, {z})");
        }
        for t in 1..=3 {
            assert_eq!(get_tile(level, t, 0), Tile::DungeonWall);
            assert_eq!(get_tile(level, t, 4), Tile::DungeonWall);
            assert_eq!(get_tile(level, 0, t), Tile::DungeonWall);
            assert_eq!(get_tile(level, 4, t), Tile::DungeonWall);
        }

        let mut walls = 0;
        let mut floors = 0;
        for x in -3..=8 {
            for z in -3..=8 {
                let tile = get_tile(level, x, z);
                let inside = (0..=4).contains(&x) && (0..=4).contains(&z);
                let interior = (1..=3).contains(&x) && (1..=3).contains(&z);
                match tile {
                    Tile::DungeonWall => walls += 1,
                    Tile::DungeonFloor => {
                        assert!(interior, "floor outside the room at ({x}, {z})");
                        floors += 1;
                    }
                    Tile::Void => assert!(!inside, "void inside the room at ({x}, {z})"),
                    Tile::DungeonDoor => panic!("rooms never place doors"),
                }
            }
        }

        assert_eq!(walls, 16);
        assert_eq!(floors, 9);
        // Negative neighbours were never written, so only chunk (0, 0) exists
        assert_eq!(level.len(), 1);
    }

    #[test]
    fn test_overlapping_rooms_last_write_wins() {
        let mut generator = generator(Sequence::new(&[0.0]));
        generator.generate_room(0, 0, 4, 4);
        assert_eq!(get_tile(generator.level(), 2, 2), Tile::DungeonFloor);

        generator.generate_room(2, 2, 4, 4);
        let level = generator.level();

        // Second room's corner overwrites the first room's floor
        assert_eq!(get_tile(level, 2, 2), Tile::DungeonWall);
        // Second room's floor overwrites the first room's wall
        assert_eq!(get_tile(level, 4, 3), Tile::DungeonFloor);
        // Untouched parts of the first room survive
        assert_eq!(get_tile(level, 4, 1), Tile::DungeonWall);
        assert_eq!(get_tile(level, 1, 1), Tile::DungeonFloor);
        assert_eq!(get_tile(level, 6, 6), Tile::DungeonWall);
    }

    #[test]
    fn test_rooms_across_chunk_borders() {
        let mut generator = generator(Sequence::new(&[0.0]));
        generator.generate_room(-3, 14, 5, 5);
        let level = generator.level();

        assert_eq!(get_tile(level, -3, 14), Tile::DungeonWall);
        assert_eq!(get_tile(level, 2, 19), Tile::DungeonWall);
        assert_eq!(get_tile(level, -1, 16), Tile::DungeonFloor);
        assert_eq!(get_tile(level, 0, 15), Tile::DungeonFloor);
        assert_eq!(level.len(), 4);
    }

    #[test]
    fn test_draw_order_per_slot() {
        let config = DungeonConfig {
            slots_x: 1,
            slots_z: 1,
            ..Default::default()
        };
        // skip?, x offset, z offset, width, height
        let rng = Sequence::new(&[0.9, 0.0, 0.25, 0.5, 0.75]);
        let mut generator =
            DungeonGenerator::with_config(rng, Chunk::new, Level::<Chunk>::new(), config);

        let rooms = generator.generate_dungeon();
        assert_eq!(
            rooms,
            vec![Room {
                x: 2,
                z: 3,
                width: 8,
                height: 10,
            }]
        );
        assert_eq!(get_tile(generator.level(), 2, 3), Tile::DungeonWall);
        assert_eq!(get_tile(generator.level(), 10, 13), Tile::DungeonWall);
        assert_eq!(get_tile(generator.level(), 5, 5), Tile::DungeonFloor);
    }

    #[test]
    fn test_low_draws_skip_every_slot() {
        let mut generator = generator(StepRng::new(0, 0));
        let rooms = generator.generate_dungeon();

        assert!(rooms.is_empty());
        assert!(generator.level().is_empty());
    }

    #[test]
    fn test_high_draws_fill_every_slot() {
        let mut generator = generator(max_source());
        let rooms = generator.generate_dungeon();
        assert_eq!(rooms.len(), 25);

        for room in &rooms {
            assert_eq!((room.width, room.height), (12, 12));
            assert_eq!(room.x % 20, 6);
            assert_eq!(room.z % 20, 6);
        }

        let level = generator.into_level();
        assert_eq!(get_tile(&level, 6, 6), Tile::DungeonWall);
        assert_eq!(get_tile(&level, 18, 18), Tile::DungeonWall);
        assert_eq!(get_tile(&level, 7, 7), Tile::DungeonFloor);
        assert_eq!(get_tile(&level, 97, 97), Tile::DungeonFloor);
        assert_eq!(get_tile(&level, 5, 5), Tile::Void);
        assert_eq!(get_tile(&level, 22, 10), Tile::Void);
        // Rooms span tiles 6..=98 on both axes, chunks 0..=6
        assert_eq!(level.iter_chunks().count(), 49);
    }

    #[test]
    fn test_room_sizes_stay_in_range() {
        for seed in 0..200 {
            let mut generator = generator(StdRng::seed_from_u64(seed));
            let rooms = generator.generate_dungeon();
            assert!(rooms.len() <= 25);

            for room in &rooms {
                assert!((4..=12).contains(&room.width), "seed {seed}: {room:?}");
                assert!((4..=12).contains(&room.height), "seed {seed}: {room:?}");
                assert!((2..=6).contains(&room.x.rem_euclid(20)), "seed {seed}: {room:?}");
                assert!((2..=6).contains(&room.z.rem_euclid(20)), "seed {seed}: {room:?}");
            }

            // Rooms never overlap, so every room keeps its whole floor
            let level = generator.level();
            for room in &rooms {
                let (x, z) = (room.x + 1, room.z + 1);
                assert!(room.contains_floor(x, z));
                assert_eq!(get_tile(level, x, z), Tile::DungeonFloor);
            }
        }
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let mut first = generator(StdRng::seed_from_u64(7));
        let mut second = generator(StdRng::seed_from_u64(7));
        assert_eq!(first.generate_dungeon(), second.generate_dungeon());

        for x in 0..110 {
            for z in 0..110 {
                assert_eq!(
                    get_tile(first.level(), x, z),
                    get_tile(second.level(), x, z)
                );
            }
        }
    }

    #[test]
    fn test_from_config_seeds_from_config() {
        let config = DungeonConfig {
            seed: 11,
            ..Default::default()
        };
        let mut seeded: TestGenerator<StdRng> =
            DungeonGenerator::from_config(Chunk::new as fn() -> Chunk, Level::new(), config);
        let mut manual = generator(StdRng::seed_from_u64(11));

        assert_eq!(seeded.config().seed, 11);
        assert_eq!(seeded.generate_dungeon(), manual.generate_dungeon());

        let other = DungeonConfig {
            seed: 12,
            ..Default::default()
        };
        let mut reseeded: TestGenerator<StdRng> =
            DungeonGenerator::from_config(Chunk::new as fn() -> Chunk, Level::new(), other);
        let mut manual = generator(StdRng::seed_from_u64(12));
        assert_eq!(reseeded.generate_dungeon(), manual.generate_dungeon());
    }
}
