//! World: owns the game objects and the grid that indexes them

use slotmap::SlotMap;

use super::game_object::{GameObject, ObjectId, RenderHandle};
use crate::foundation::math::Transform;
use crate::spatial::{Grid, GridEntry, IndexKind, SpatialIndex};

/// Storage for every object in a world
pub type ObjectMap = SlotMap<ObjectId, GameObject>;

/// Container for game objects
///
/// Objects are inserted into the grid at their position when spawned. The
/// grid is not re-keyed as objects move unless [`World::reindex`] is called.
#[derive(Debug)]
pub struct World {
    objects: ObjectMap,
    grid: Grid,
}

impl World {
    /// Create an empty world backed by the given index kind
    pub fn new(kind: IndexKind) -> Self {
        Self {
            objects: ObjectMap::with_key(),
            grid: Grid::new(kind),
        }
    }

    /// Add an object and index it at its current position
    pub fn spawn(&mut self, object: GameObject) -> ObjectId {
        let position = object.position();
        let metadata = object.metadata;
        let id = self.objects.insert(object);
        self.grid.set(position, GridEntry::new(id, metadata));
        log::debug!("Spawned object {:?} (metadata {}) at {:?}", id, metadata, position);
        id
    }

    /// Look up an object
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Mutable object lookup
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// All objects
    pub fn objects(&self) -> &ObjectMap {
        &self.objects
    }

    /// Object identifiers in storage order
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys().collect()
    }

    /// The spatial index
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the world has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Clear the grid and insert every object at its current position
    pub fn reindex(&self) {
        self.grid.clear();
        for (id, object) in &self.objects {
            self.grid.set(object.position(), GridEntry::new(id, object.metadata));
        }
    }

    /// Renderables reachable from the indexed objects
    pub fn visible<'a>(&'a self, camera: Option<&Transform>) -> impl Iterator<Item = RenderHandle> + 'a {
        self.grid.visible(&self.objects, camera)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(IndexKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use std::collections::HashSet;

    #[test]
    fn test_spawn_indexes_object() {
        let mut world = World::new(IndexKind::Tree);
        let id = world.spawn(GameObject::at(Vec3::new(2.0, 3.0, 0.0)));

        assert_eq!(world.grid().get(Vec3::new(2.0, 3.0, 0.0)), Some(id));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_spawn_uses_object_metadata() {
        let mut world = World::new(IndexKind::Packed);
        let id = world.spawn(GameObject::at(Vec3::new(1.0, 1.0, 0.0)).with_metadata(6));

        assert_eq!(world.grid().get(Vec3::new(1.0, 1.0, 0.0)), None);
        assert_eq!(world.grid().get_tagged(Vec3::new(1.0, 1.0, 0.0), 6), Some(id));
    }

    #[test]
    fn test_reindex_follows_moves() {
        let mut world = World::new(IndexKind::Linear);
        let id = world.spawn(GameObject::at(Vec3::zeros()));

        if let Some(object) = world.get_mut(id) {
            object.transform.position = Vec3::new(5.0, 0.0, 0.0);
        }
        assert_eq!(world.grid().get(Vec3::new(5.0, 0.0, 0.0)), None);

        world.reindex();
        assert_eq!(world.grid().get(Vec3::new(5.0, 0.0, 0.0)), Some(id));
        assert_eq!(world.grid().get(Vec3::zeros()), None);
    }

    #[test]
    fn test_visible_collects_renderables() {
        let mut world = World::default();
        world.spawn(
            GameObject::at(Vec3::zeros())
                .with_renderable(RenderHandle(1))
                .with_renderable(RenderHandle(2)),
        );
        world.spawn(GameObject::at(Vec3::new(4.0, 0.0, 0.0)).with_renderable(RenderHandle(3)));
        world.spawn(GameObject::at(Vec3::new(8.0, 0.0, 0.0)));

        let visible: HashSet<RenderHandle> = world.visible(None).collect();

        assert_eq!(visible, HashSet::from([RenderHandle(1), RenderHandle(2), RenderHandle(3)]));
    }
}
