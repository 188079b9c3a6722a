//! Collision records produced by collider detection

use std::hash::{Hash, Hasher};

use crate::foundation::math::Vec3;
use crate::scene::ObjectId;

/// One contact detected this tick
///
/// Equality and hashing cover the whole triple, with the contact point
/// compared bit for bit, so a contact set never holds the same contact twice.
/// Records are rebuilt every tick and never carried over.
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    /// The object whose collider ran the detection
    pub active: ObjectId,
    /// The object it touched
    pub other: ObjectId,
    /// Where the two touched
    pub contact_point: Vec3,
}

impl Collision {
    /// Create a new collision record
    pub fn new(active: ObjectId, other: ObjectId, contact_point: Vec3) -> Self {
        Self {
            active,
            other,
            contact_point,
        }
    }

    fn point_bits(&self) -> [u32; 3] {
        [
            self.contact_point.x.to_bits(),
            self.contact_point.y.to_bits(),
            self.contact_point.z.to_bits(),
        ]
    }
}

impl PartialEq for Collision {
    fn eq(&self, other: &Self) -> bool {
        self.active == other.active && self.other == other.other && self.point_bits() == other.point_bits()
    }
}

impl Eq for Collision {}

impl Hash for Collision {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.active.hash(state);
        self.other.hash(state);
        self.point_bits().hash(state);
    }
}
