/// Level decorator that mirrors chunks into a scene.
use super::render_chunk::RenderChunk;
use super::scene::{SceneGraph, SharedScene};
use crate::level::{ChunkPosition, GridStore, TileGrid};
use tracing::{debug, instrument, warn};

/// Level that forwards to an inner level of render chunks and parents each
/// chunk's group under its own group node.
///
/// Chunk groups are placed at the chunk's world origin, so a proxy ends up
/// at its world tile coordinate. Reads are passed straight to the inner
/// level.
///
/// Dropping the decorator discards its group and every chunk below it.
pub struct RenderLevel<L, S: SceneGraph> {
    scene: SharedScene<S>,
    inner: L,
    /// Group node holding one child group per chunk
    group: S::Handle,
}

impl<C, S, L> RenderLevel<L, S>
where
    C: TileGrid,
    S: SceneGraph,
    L: GridStore<Chunk = RenderChunk<C, S>>,
{
    /// Wraps a level and attaches the groups of the chunks it already holds.
    #[instrument(skip_all)]
    pub fn new(scene: SharedScene<S>, inner: L) -> Self {
        crate::profile_scope!("render_level_new");
        let group = scene.borrow_mut().create_group();

        let existing: Vec<(ChunkPosition, S::Handle)> = inner
            .iter_chunks()
            .map(|(position, chunk)| (position, chunk.group()))
            .collect();

        {
            let mut scene = scene.borrow_mut();
            for &(position, chunk_group) in &existing {
                scene.attach(group, chunk_group);
                scene.set_offset(chunk_group, position.world_origin());
            }
        }

        debug!(chunks = existing.len(), "Attached existing chunks");

        Self {
            scene,
            inner,
            group,
        }
    }

    /// Group node holding the chunk groups.
    pub fn group(&self) -> S::Handle {
        self.group
    }

    /// The wrapped level.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// The scene this level draws into.
    pub fn scene(&self) -> &SharedScene<S> {
        &self.scene
    }
}

impl<C, S, L> GridStore for RenderLevel<L, S>
where
    C: TileGrid,
    S: SceneGraph,
    L: GridStore<Chunk = RenderChunk<C, S>>,
{
    type Chunk = RenderChunk<C, S>;

    /// Stores the chunk in the inner level, then swaps the chunk groups.
    ///
    /// The previous chunk's group is detached but not discarded; it goes
    /// away when the returned chunk is dropped.
    fn set_chunk(
        &mut self,
        position: ChunkPosition,
        chunk: Option<Self::Chunk>,
    ) -> Option<Self::Chunk> {
        let incoming = chunk.as_ref().map(RenderChunk::group);
        let previous = self.inner.set_chunk(position, chunk);

        let mut scene = self.scene.borrow_mut();
        if let Some(previous) = &previous {
            scene.detach(self.group, previous.group());
        }
        if let Some(chunk_group) = incoming {
            scene.attach(self.group, chunk_group);
            scene.set_offset(chunk_group, position.world_origin());
        }
        drop(scene);

        previous
    }

    fn get_chunk(&self, position: ChunkPosition) -> Option<&Self::Chunk> {
        self.inner.get_chunk(position)
    }

    fn get_chunk_mut(&mut self, position: ChunkPosition) -> Option<&mut Self::Chunk> {
        self.inner.get_chunk_mut(position)
    }

    fn iter_chunks(&self) -> impl Iterator<Item = (ChunkPosition, &Self::Chunk)> {
        self.inner.iter_chunks()
    }
}

impl<L, S: SceneGraph> Drop for RenderLevel<L, S> {
    fn drop(&mut self) {
        match self.scene.try_borrow_mut() {
            Ok(mut scene) => scene.discard(self.group),
            Err(_) => warn!(group = ?self.group, "Scene busy, leaving group in place"),
        }
    }
}
