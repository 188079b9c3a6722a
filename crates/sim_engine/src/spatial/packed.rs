//! Packed-key grid: one flat map keyed by coordinates and metadata

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::index::{read, write, GridEntry, SpatialIndex};
use crate::foundation::math::{utils, Vec3};
use crate::scene::ObjectId;

/// Pack a coordinate and a metadata tag into a single key.
///
/// Each axis is truncated toward zero and stored as a 16-bit lane; the tag
/// takes the low 16 bits. Coordinates outside the `i16` range wrap and can
/// alias other cells.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pack_key(coord: &Vec3, metadata: u16) -> u64 {
    let lane = |value: f32| u64::from(utils::discretize(value) as i16 as u16);
    (lane(coord.x) << 48) | (lane(coord.y) << 32) | (lane(coord.z) << 16) | u64::from(metadata)
}

/// Flat map from packed keys to objects.
///
/// Writes key on the entry's own metadata, so a read only finds the object
/// when it supplies the same tag. A mismatched tag lands on another key and
/// the read comes back empty. Changing an object's metadata after insertion
/// strands the old key until the index is cleared.
#[derive(Debug, Default)]
pub struct PackedKeyIndex {
    cells: RwLock<HashMap<u64, ObjectId>>,
}

impl PackedKeyIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for PackedKeyIndex {
    fn get_tagged(&self, coord: Vec3, metadata: u16) -> Option<ObjectId> {
        read(&self.cells).get(&pack_key(&coord, metadata)).copied()
    }

    fn set(&self, coord: Vec3, entry: GridEntry) {
        write(&self.cells).insert(pack_key(&coord, entry.metadata), entry.id);
    }

    fn clear(&self) {
        write(&self.cells).clear();
    }

    fn enumerate(&self) -> HashSet<ObjectId> {
        read(&self.cells).values().copied().collect()
    }

    fn len(&self) -> usize {
        read(&self.cells).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{object_ids as ids, ObjectMap};

    #[test]
    fn test_pack_key_lanes() {
        let key = pack_key(&Vec3::new(1.0, 2.0, 3.0), 4);
        assert_eq!(key, (1_u64 << 48) | (2_u64 << 32) | (3_u64 << 16) | 4);
    }

    #[test]
    fn test_pack_key_discretizes() {
        assert_eq!(pack_key(&Vec3::new(1.7, -2.2, 0.4), 0), pack_key(&Vec3::new(1.0, -2.0, 0.0), 0));
    }

    #[test]
    fn test_read_with_matching_metadata() {
        let index = PackedKeyIndex::new();
        let id = ids(1)[0];
        let coord = Vec3::new(3.0, 4.0, 0.0);

        index.set(coord, GridEntry::new(id, 7));

        assert_eq!(index.get_tagged(coord, 7), Some(id));
    }

    #[test]
    fn test_read_with_other_metadata_misses() {
        let index = PackedKeyIndex::new();
        let found = ids(2);
        let coord = Vec3::new(3.0, 4.0, 0.0);

        index.set(coord, GridEntry::new(found[0], 7));
        index.set(coord, GridEntry::new(found[1], 2));

        assert_eq!(index.get(coord), None);
        assert_eq!(index.get_tagged(coord, 5), None);
        assert_eq!(index.get_tagged(coord, 7), Some(found[0]));
        assert_eq!(index.get_tagged(coord, 2), Some(found[1]));
    }

    #[test]
    fn test_default_metadata_round_trip() {
        let index = PackedKeyIndex::new();
        let id = ids(1)[0];

        index.set_at(1, 2, 3, GridEntry::new(id, 0));

        assert_eq!(index.get_at(1, 2, 3), Some(id));
    }

    #[test]
    fn test_enumerate_deduplicates_and_clear_empties() {
        let index = PackedKeyIndex::new();
        let id = ids(1)[0];

        index.set(Vec3::new(0.0, 0.0, 0.0), GridEntry::new(id, 0));
        index.set(Vec3::new(5.0, 0.0, 0.0), GridEntry::new(id, 0));

        assert_eq!(index.len(), 2);
        assert_eq!(index.enumerate().len(), 1);

        index.clear();
        assert!(index.is_empty());
        assert!(index.enumerate().is_empty());
        assert_eq!(index.visible(&ObjectMap::with_key(), None).count(), 0);
    }
}
