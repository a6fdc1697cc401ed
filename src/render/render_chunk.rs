/// Chunk decorator that mirrors tiles into a scene.
use super::scene::{SceneGraph, SharedScene};
use crate::level::chunk::{index_to_local, local_to_index, TileGrid, TILE_COUNT};
use crate::tile::Tile;
use bevy::math::Vec3;
use std::rc::Rc;
use tracing::warn;

/// Chunk that forwards to an inner chunk and keeps one proxy node per tile.
///
/// All proxies hang off a single group node. The group's own position is the
/// business of whoever owns the chunk (usually a [`RenderLevel`]); the
/// proxies are placed at their local `(x, 0, z)` offsets inside it.
///
/// Writes must go through this decorator. It owns the inner chunk, so the
/// inner contents cannot drift away from the proxies.
///
/// Dropping the decorator discards its group and all proxies with it.
///
/// [`RenderLevel`]: super::RenderLevel
pub struct RenderChunk<C, S: SceneGraph> {
    scene: SharedScene<S>,
    inner: C,
    /// Group node holding one proxy per tile
    group: S::Handle,
    /// Proxy handles stored as `x * CHUNK_SIZE + z`
    proxies: Vec<Option<S::Handle>>,
}

impl<C: TileGrid, S: SceneGraph> RenderChunk<C, S> {
    /// Wraps a chunk and builds proxies for its current tiles.
    pub fn new(scene: SharedScene<S>, inner: C) -> Self {
        let group = scene.borrow_mut().create_group();
        let mut chunk = Self {
            scene,
            inner,
            group,
            proxies: vec![None; TILE_COUNT],
        };

        for index in 0..TILE_COUNT {
            let (x, z) = index_to_local(index);
            let tile = chunk.inner.get_tile(x, z);
            chunk.sync_tile(x, z, tile);
        }

        chunk
    }

    /// Group node holding this chunk's proxies.
    pub fn group(&self) -> S::Handle {
        self.group
    }

    /// Proxy node currently standing for the tile at local coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `z` is not in `0..CHUNK_SIZE`.
    pub fn proxy(&self, x: usize, z: usize) -> S::Handle {
        self.proxies[local_to_index(x, z)].unwrap_or_else(|| {
            unreachable!("proxy ({x}, {z}) is populated during construction")
        })
    }

    /// The wrapped chunk.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The scene this chunk draws into.
    pub fn scene(&self) -> &SharedScene<S> {
        &self.scene
    }

    /// Replaces the proxy at a cell without touching the inner chunk.
    fn sync_tile(&mut self, x: usize, z: usize, tile: Tile) {
        let index = local_to_index(x, z);
        let mut scene = self.scene.borrow_mut();

        if let Some(previous) = self.proxies[index].take() {
            scene.detach(self.group, previous);
            scene.discard(previous);
        }

        let proxy = scene.create_proxy(tile, x, z);
        scene.set_offset(proxy, Vec3::new(x as f32, 0.0, z as f32));
        scene.attach(self.group, proxy);
        self.proxies[index] = Some(proxy);
    }
}

impl<C: TileGrid, S: SceneGraph> TileGrid for RenderChunk<C, S> {
    fn set_tile(&mut self, x: usize, z: usize, tile: Tile) {
        self.inner.set_tile(x, z, tile);
        self.sync_tile(x, z, tile);
    }

    fn get_tile(&self, x: usize, z: usize) -> Tile {
        self.inner.get_tile(x, z)
    }
}

impl<C, S: SceneGraph> Drop for RenderChunk<C, S> {
    fn drop(&mut self) {
        // The scene is borrowed if we are dropped while it is being mutated
        match self.scene.try_borrow_mut() {
            Ok(mut scene) => scene.discard(self.group),
            Err(_) => warn!(group = ?self.group, "Scene busy, leaving group in place"),
        }
    }
}

/// Builds a chunk factory for render chunks sharing one scene.
///
/// Each call wraps a fresh inner chunk from `inner_factory`.
pub fn render_chunk_factory<C, S, F>(
    scene: &SharedScene<S>,
    mut inner_factory: F,
) -> impl FnMut() -> RenderChunk<C, S>
where
    C: TileGrid,
    S: SceneGraph,
    F: FnMut() -> C,
{
    let scene = Rc::clone(scene);
    move || RenderChunk::new(Rc::clone(&scene), inner_factory())
}
