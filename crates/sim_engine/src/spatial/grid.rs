//! Grid strategy selected at construction time

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::index::{GridEntry, SpatialIndex};
use super::linear::LinearIndex;
use super::packed::PackedKeyIndex;
use super::tree::TreeIndex;
use crate::foundation::math::Vec3;
use crate::scene::ObjectId;

/// Which spatial index variant backs a [`Grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IndexKind {
    /// Flat map over packed coordinate + metadata keys
    #[default]
    Packed,
    /// Unordered list, exact coordinate scan
    Linear,
    /// Nested x → y → z maps, first writer wins
    Tree,
}

/// A spatial index of one of the three kinds
#[derive(Debug)]
pub enum Grid {
    /// See [`PackedKeyIndex`]
    Packed(PackedKeyIndex),
    /// See [`LinearIndex`]
    Linear(LinearIndex),
    /// See [`TreeIndex`]
    Tree(TreeIndex),
}

impl Grid {
    /// Create an empty grid of the given kind
    pub fn new(kind: IndexKind) -> Self {
        match kind {
            IndexKind::Packed => Self::Packed(PackedKeyIndex::new()),
            IndexKind::Linear => Self::Linear(LinearIndex::new()),
            IndexKind::Tree => Self::Tree(TreeIndex::new()),
        }
    }

    /// The variant backing this grid
    pub fn kind(&self) -> IndexKind {
        match self {
            Self::Packed(_) => IndexKind::Packed,
            Self::Linear(_) => IndexKind::Linear,
            Self::Tree(_) => IndexKind::Tree,
        }
    }

    fn inner(&self) -> &dyn SpatialIndex {
        match self {
            Self::Packed(index) => index,
            Self::Linear(index) => index,
            Self::Tree(index) => index,
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(IndexKind::default())
    }
}

impl SpatialIndex for Grid {
    fn get_tagged(&self, coord: Vec3, metadata: u16) -> Option<ObjectId> {
        self.inner().get_tagged(coord, metadata)
    }

    fn get(&self, coord: Vec3) -> Option<ObjectId> {
        self.inner().get(coord)
    }

    fn set(&self, coord: Vec3, entry: GridEntry) {
        self.inner().set(coord, entry);
    }

    fn clear(&self) {
        self.inner().clear();
    }

    fn enumerate(&self) -> HashSet<ObjectId> {
        self.inner().enumerate()
    }

    fn len(&self) -> usize {
        self.inner().len()
    }
}
