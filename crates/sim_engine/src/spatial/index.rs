//! Abstract grid interface shared by every spatial index variant
//!
//! The grid maps a discretized position to at most one game object. It
//! never owns the objects; it stores [`ObjectId`]s that resolve through
//! the world's object map.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::foundation::math::{utils, Transform, Vec2, Vec3};
use crate::scene::{ObjectId, ObjectMap, RenderHandle};

/// What gets written into a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridEntry {
    /// The stored object
    pub id: ObjectId,
    /// The object's metadata tag at insertion time
    pub metadata: u16,
}

impl GridEntry {
    /// Create a new entry
    pub fn new(id: ObjectId, metadata: u16) -> Self {
        Self { id, metadata }
    }
}

/// Grid storage contract
///
/// All methods take `&self`: implementations synchronize internally so the
/// index can be read while the tick loop writes to it. There is no
/// transaction spanning a `set` and a later `get`; callers order those.
pub trait SpatialIndex: Send + Sync {
    /// Look up a cell using an explicit metadata tag.
    ///
    /// Only indices that fold metadata into their key care about `metadata`.
    fn get_tagged(&self, coord: Vec3, metadata: u16) -> Option<ObjectId>;

    /// Look up a cell using the default (zero) metadata tag
    fn get(&self, coord: Vec3) -> Option<ObjectId> {
        self.get_tagged(coord, 0)
    }

    /// Store an entry at a coordinate
    fn set(&self, coord: Vec3, entry: GridEntry);

    /// Remove every entry
    fn clear(&self);

    /// Distinct objects currently stored, in no particular order
    fn enumerate(&self) -> HashSet<ObjectId>;

    /// Number of occupied cells
    fn len(&self) -> usize;

    /// Whether no cell is occupied
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integer-coordinate lookup
    #[allow(clippy::cast_precision_loss)]
    fn get_at(&self, x: i32, y: i32, z: i32) -> Option<ObjectId> {
        self.get(Vec3::new(x as f32, y as f32, z as f32))
    }

    /// Integer-coordinate write
    #[allow(clippy::cast_precision_loss)]
    fn set_at(&self, x: i32, y: i32, z: i32, entry: GridEntry) {
        self.set(Vec3::new(x as f32, y as f32, z as f32), entry);
    }

    /// Planar lookup at depth zero
    fn get_2d(&self, point: Vec2) -> Option<ObjectId> {
        self.get(utils::lift(point))
    }

    /// Planar write at depth zero
    fn set_2d(&self, point: Vec2, entry: GridEntry) {
        self.set(utils::lift(point), entry);
    }

    /// Renderable handles reachable from the stored objects.
    ///
    /// No culling is done; `camera` is accepted for callers that pass one.
    /// The sequence is lazy over a snapshot taken at call time.
    fn visible<'a>(
        &self,
        objects: &'a ObjectMap,
        _camera: Option<&Transform>,
    ) -> Box<dyn Iterator<Item = RenderHandle> + 'a> {
        let snapshot = self.enumerate();
        Box::new(
            snapshot
                .into_iter()
                .filter_map(move |id| objects.get(id))
                .flat_map(|object| object.renderables().iter().copied()),
        )
    }
}

pub(super) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(super) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
