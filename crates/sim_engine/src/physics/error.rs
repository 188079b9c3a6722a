//! Physics error types

use thiserror::Error;

use crate::scene::ObjectId;

/// Errors raised while resolving physics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Resolution needed a mass ratio above one, i.e. the active body is
    /// heavier than the body it hit. That branch is not supported.
    #[error("Unsupported mass ratio {ratio} resolving {object:?} against {other:?}")]
    MassRatioInversion {
        /// The body being ticked
        object: ObjectId,
        /// The body it collided with
        other: ObjectId,
        /// `1 / (other_mass / mass)`
        ratio: f32,
    },

    /// A body taking part in a contact has a mass that cannot be divided by
    #[error("Invalid mass {mass} on {object:?}")]
    InvalidMass {
        /// The body with the bad mass
        object: ObjectId,
        /// Its mass
        mass: f32,
    },
}
