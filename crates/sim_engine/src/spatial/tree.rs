//! Tree grid: nested x → y → z maps over integer coordinates

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::index::{read, write, GridEntry, SpatialIndex};
use crate::foundation::math::{utils, Vec3};
use crate::scene::ObjectId;

type Column = HashMap<i32, ObjectId>;
type Plane = HashMap<i32, Column>;

/// Nested maps giving exact O(1) lookup on truncated integer coordinates.
///
/// Writes are first-writer-wins: [`SpatialIndex::set`] on an occupied cell
/// does nothing. The cell only changes after [`SpatialIndex::clear`] or an
/// explicit [`TreeIndex::overwrite`].
#[derive(Debug, Default)]
pub struct TreeIndex {
    cells: RwLock<HashMap<i32, Plane>>,
}

impl TreeIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever occupies the cell.
    pub fn overwrite(&self, coord: Vec3, entry: GridEntry) {
        let (x, y, z) = discretize(&coord);
        write(&self.cells)
            .entry(x)
            .or_default()
            .entry(y)
            .or_default()
            .insert(z, entry.id);
    }
}

fn discretize(coord: &Vec3) -> (i32, i32, i32) {
    (
        utils::discretize(coord.x),
        utils::discretize(coord.y),
        utils::discretize(coord.z),
    )
}

impl SpatialIndex for TreeIndex {
    fn get_tagged(&self, coord: Vec3, _metadata: u16) -> Option<ObjectId> {
        let (x, y, z) = discretize(&coord);
        read(&self.cells).get(&x)?.get(&y)?.get(&z).copied()
    }

    fn set(&self, coord: Vec3, entry: GridEntry) {
        let (x, y, z) = discretize(&coord);
        let mut cells = write(&self.cells);
        match cells.entry(x).or_default().entry(y).or_default().entry(z) {
            Entry::Occupied(occupied) => {
                log::trace!(
                    "Cell ({}, {}, {}) already holds {:?}, ignoring {:?}",
                    x,
                    y,
                    z,
                    occupied.get(),
                    entry.id
                );
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry.id);
            }
        }
    }

    fn clear(&self) {
        write(&self.cells).clear();
    }

    fn enumerate(&self) -> HashSet<ObjectId> {
        read(&self.cells)
            .values()
            .flat_map(HashMap::values)
            .flat_map(HashMap::values)
            .copied()
            .collect()
    }

    fn len(&self) -> usize {
        read(&self.cells)
            .values()
            .flat_map(HashMap::values)
            .map(HashMap::len)
            .sum()
    }
}
