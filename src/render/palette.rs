/// Visual templates for tile proxies.
///
/// The palette maps each tile kind to one or more mesh/material templates.
/// Which variant a cell gets depends only on its kind and coordinates, so
/// rebuilding a proxy for the same cell always picks the same look.
use crate::tile::Tile;
use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use std::collections::HashMap;

/// Scale applied to cell coordinates before sampling the variant noise.
const VARIANT_NOISE_SCALE: f64 = 0.37;

/// Component identifying a tile proxy entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileProxy {
    /// Tile kind this proxy depicts
    pub tile: Tile,
    /// Index of the palette variant used for this proxy
    pub variant: usize,
}

/// Mesh and material used to draw one variant of a tile kind.
#[derive(Clone, Debug, Default)]
pub struct TileTemplate {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Templates for every drawable tile kind.
///
/// Must be fully populated before any render decorator is built; the
/// decorators create proxies as soon as they are constructed.
#[derive(Resource, Clone, Debug)]
pub struct TilePalette {
    /// Variants for each tile kind, never holding `Void`
    variants: HashMap<Tile, Vec<TileTemplate>>,
    /// Noise used to spread variants over the grid
    variant_noise: Perlin,
}

impl TilePalette {
    /// Creates an empty palette.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the noise that picks between variants
    pub fn new(seed: u32) -> Self {
        Self {
            variants: HashMap::new(),
            variant_noise: Perlin::new(seed),
        }
    }

    /// Creates a palette with one default-handle template per drawable kind.
    ///
    /// Useful when the scene is inspected rather than drawn, and in tests.
    pub fn placeholder() -> Self {
        let mut palette = Self::new(0);
        for tile in Tile::ALL.into_iter().filter(|tile| !tile.is_void()) {
            palette.insert(tile, TileTemplate::default());
        }
        palette
    }

    /// Adds a variant for a tile kind.
    ///
    /// # Panics
    ///
    /// Panics when given `Void`, which is never drawn.
    pub fn insert(&mut self, tile: Tile, template: TileTemplate) -> &mut Self {
        assert!(!tile.is_void(), "void tiles cannot have a template");
        self.variants.entry(tile).or_default().push(template);
        self
    }

    /// Number of variants registered for a tile kind.
    pub fn variant_count(&self, tile: Tile) -> usize {
        self.variants.get(&tile).map_or(0, Vec::len)
    }

    /// Picks the variant index for a cell.
    ///
    /// Always `0` for `Void` and for kinds with a single variant.
    pub fn variant_index(&self, tile: Tile, x: usize, z: usize) -> usize {
        let count = self.variant_count(tile);
        if count <= 1 {
            return 0;
        }

        let sample = self.variant_noise.get([
            x as f64 * VARIANT_NOISE_SCALE,
            z as f64 * VARIANT_NOISE_SCALE,
        ]);
        // Perlin output is in [-1, 1]
        let normalized = ((sample + 1.0) * 0.5).clamp(0.0, 1.0);
        ((normalized * count as f64) as usize).min(count - 1)
    }

    /// Returns the template for a cell, or `None` for `Void`.
    ///
    /// # Panics
    ///
    /// Panics if a non-`Void` kind has no registered template. A missing
    /// template means the palette was built incompletely, which should be
    /// caught during development rather than drawn as something else.
    pub fn template(&self, tile: Tile, x: usize, z: usize) -> Option<&TileTemplate> {
        if tile.is_void() {
            return None;
        }

        let variants = self
            .variants
            .get(&tile)
            .filter(|variants| !variants.is_empty())
            .unwrap_or_else(|| panic!("no proxy template registered for {tile:?}"));
        Some(&variants[self.variant_index(tile, x, z)])
    }
}

impl Default for TilePalette {
    fn default() -> Self {
        Self::placeholder()
    }
}
