//! Scene container
//!
//! Owns game objects and the grid that indexes them. Creating and
//! destroying objects is the container's job; the simulation only mutates
//! them in place.

mod game_object;
mod world;

pub use game_object::{GameObject, ObjectId, RenderHandle};
pub use world::{ObjectMap, World};

/// Fresh object identifiers for tests that only need keys
#[cfg(test)]
pub(crate) fn object_ids(count: usize) -> Vec<ObjectId> {
    let mut keys: slotmap::SlotMap<ObjectId, ()> = slotmap::SlotMap::with_key();
    (0..count).map(|_| keys.insert(())).collect()
}
