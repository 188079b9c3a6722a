//! Linear grid: an unordered list scanned by exact coordinate

use std::collections::HashSet;
use std::sync::RwLock;

use super::index::{read, write, GridEntry, SpatialIndex};
use crate::foundation::math::Vec3;
use crate::scene::ObjectId;

/// Unordered list of `(coordinate, object)` pairs.
///
/// Lookups and writes are O(n) scans using exact coordinate equality, so
/// this is only meant for small object counts and as a reference for the
/// other variants. Metadata is ignored.
#[derive(Debug, Default)]
pub struct LinearIndex {
    cells: RwLock<Vec<(Vec3, ObjectId)>>,
}

impl LinearIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for LinearIndex {
    fn get_tagged(&self, coord: Vec3, _metadata: u16) -> Option<ObjectId> {
        read(&self.cells)
            .iter()
            .find(|(position, _)| *position == coord)
            .map(|(_, id)| *id)
    }

    fn set(&self, coord: Vec3, entry: GridEntry) {
        let mut cells = write(&self.cells);
        match cells.iter_mut().find(|(position, _)| *position == coord) {
            Some(cell) => cell.1 = entry.id,
            None => cells.push((coord, entry.id)),
        }
    }

    fn clear(&self) {
        write(&self.cells).clear();
    }

    fn enumerate(&self) -> HashSet<ObjectId> {
        read(&self.cells).iter().map(|(_, id)| *id).collect()
    }

    fn len(&self) -> usize {
        read(&self.cells).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::scene::object_ids;

    #[test]
    fn test_round_trip() {
        let index = LinearIndex::new();
        let ids = object_ids(3);
        let coords = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.5, -2.0, 3.25),
            Vec3::new(-7.0, 8.0, -9.0),
        ];

        for (coord, id) in coords.iter().zip(&ids) {
            index.set(*coord, GridEntry::new(*id, 0));
        }

        for (coord, id) in coords.iter().zip(&ids) {
            assert_eq!(index.get(*coord), Some(*id));
        }
    }

    #[test]
    fn test_exact_equality_only() {
        let index = LinearIndex::new();
        let id = object_ids(1)[0];

        index.set(Vec3::new(1.5, 0.0, 0.0), GridEntry::new(id, 0));

        assert_eq!(index.get(Vec3::new(1.0, 0.0, 0.0)), None);
        assert_eq!(index.get(Vec3::new(1.5, 0.0, 0.0)), Some(id));
    }

    #[test]
    fn test_set_overwrites_same_coordinate() {
        let index = LinearIndex::new();
        let ids = object_ids(2);

        index.set_2d(Vec2::new(2.0, 3.0), GridEntry::new(ids[0], 0));
        index.set_2d(Vec2::new(2.0, 3.0), GridEntry::new(ids[1], 0));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get_2d(Vec2::new(2.0, 3.0)), Some(ids[1]));
    }

    #[test]
    fn test_metadata_is_ignored() {
        let index = LinearIndex::new();
        let id = object_ids(1)[0];

        index.set(Vec3::new(4.0, 4.0, 0.0), GridEntry::new(id, 9));

        assert_eq!(index.get(Vec3::new(4.0, 4.0, 0.0)), Some(id));
        assert_eq!(index.get_tagged(Vec3::new(4.0, 4.0, 0.0), 3), Some(id));
    }

    #[test]
    fn test_empty_after_clear() {
        let index = LinearIndex::new();
        assert!(index.enumerate().is_empty());

        index.set(Vec3::zeros(), GridEntry::new(object_ids(1)[0], 0));
        index.clear();

        assert!(index.enumerate().is_empty());
        assert_eq!(index.get(Vec3::zeros()), None);
    }
}
