/// Scene graph collaborator for the render decorators.
///
/// The decorators only need a handful of operations from whatever draws the
/// level: create group and proxy nodes, position them, parent them and throw
/// them away. [`SceneGraph`] captures exactly that, and the bevy ECS world
/// implements it with entities, `Transform` and the entity hierarchy.
use super::palette::{TilePalette, TileProxy};
use crate::tile::Tile;
use bevy::prelude::*;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// Shared handle to a scene.
///
/// Chunk and level decorators write into the same scene, and everything
/// runs on one thread, so the scene lives behind `Rc<RefCell<_>>`.
pub type SharedScene<S> = Rc<RefCell<S>>;

/// Operations the render decorators need from a scene.
pub trait SceneGraph {
    /// Opaque handle to a node in the scene.
    type Handle: Copy + Eq + Debug;

    /// Creates an empty, unparented group node at the origin.
    fn create_group(&mut self) -> Self::Handle;

    /// Creates an unparented proxy node for a tile.
    ///
    /// The local coordinates may pick between cosmetic variants of the same
    /// tile kind. `Void` gets an invisible proxy.
    fn create_proxy(&mut self, tile: Tile, x: usize, z: usize) -> Self::Handle;

    /// Moves a node to an offset relative to its parent.
    fn set_offset(&mut self, node: Self::Handle, offset: Vec3);

    /// Makes `child` a child of `parent`. Attaching twice is a no-op.
    fn attach(&mut self, parent: Self::Handle, child: Self::Handle);

    /// Removes `child` from `parent`. Detaching a node that is not a child of
    /// `parent` is a no-op.
    fn detach(&mut self, parent: Self::Handle, child: Self::Handle);

    /// Destroys a node and everything below it. Discarding a node that no
    /// longer exists is a no-op.
    fn discard(&mut self, node: Self::Handle);
}

/// Marker component for group entities created by the render decorators.
#[derive(Component, Debug, Default)]
pub struct TileGroup;

/// Every node spawned by the scene carries a `Transform`.
fn contains_node(world: &World, node: Entity) -> bool {
    world.get::<Transform>(node).is_some()
}

impl SceneGraph for World {
    type Handle = Entity;

    fn create_group(&mut self) -> Entity {
        self.spawn((TileGroup, Transform::default(), Visibility::default()))
            .id()
    }

    /// # Panics
    ///
    /// Panics if the world has no [`TilePalette`] resource, or if the palette
    /// has no template for a non-`Void` tile.
    fn create_proxy(&mut self, tile: Tile, x: usize, z: usize) -> Entity {
        let palette = self.resource::<TilePalette>();
        let variant = palette.variant_index(tile, x, z);
        let template = palette.template(tile, x, z).cloned();
        let proxy = TileProxy { tile, variant };

        match template {
            Some(template) => self
                .spawn((
                    proxy,
                    Mesh3d(template.mesh),
                    MeshMaterial3d(template.material),
                    Transform::default(),
                    Visibility::Inherited,
                ))
                .id(),
            None => self
                .spawn((proxy, Transform::default(), Visibility::Hidden))
                .id(),
        }
    }

    fn set_offset(&mut self, node: Entity, offset: Vec3) {
        if let Some(mut transform) = self.get_mut::<Transform>(node) {
            transform.translation = offset;
        }
    }

    fn attach(&mut self, parent: Entity, child: Entity) {
        if self.get::<Parent>(child).map(Parent::get) == Some(parent) {
            return;
        }
        self.entity_mut(parent).add_child(child);
    }

    fn detach(&mut self, parent: Entity, child: Entity) {
        if self.get::<Parent>(child).map(Parent::get) != Some(parent) {
            return;
        }
        self.entity_mut(parent).remove_children(&[child]);
    }

    fn discard(&mut self, node: Entity) {
        if contains_node(self, node) {
            self.entity_mut(node).despawn_recursive();
        }
    }
}
