/// Render decorators for the tile grid.
///
/// This module keeps a scene in step with a level. [`RenderChunk`] and
/// [`RenderLevel`] implement the same traits as the plain chunk and level,
/// forward every call to the value they wrap, and replace proxy nodes in a
/// [`SceneGraph`] whenever something is written. The bevy ECS `World` is the
/// scene implementation used by the binary.
pub mod palette;
pub mod render_chunk;
pub mod render_level;
pub mod scene;

// Re-export the types needed by other modules
pub use self::palette::{TilePalette, TileProxy, TileTemplate};
pub use self::render_chunk::{render_chunk_factory, RenderChunk};
pub use self::render_level::RenderLevel;
pub use self::scene::{SceneGraph, SharedScene, TileGroup};
