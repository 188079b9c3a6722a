//! Physics module for collision detection and response
//!
//! Colliders find contacts against the objects in the world's grid; bodies
//! integrate velocity and exchange momentum on contact.

pub mod body;
pub mod collider;
pub mod collision;
pub mod error;
pub mod inverse;
pub mod resolution;
pub mod shape;

pub use body::PhysicsBody;
pub use collider::{detect_contacts, Collider, ColliderComponent, ShapeCollider};
pub use collision::Collision;
pub use error::PhysicsError;
pub use inverse::InverseCollider;
pub use resolution::{hit_angle, resolve_contact, ContactResolution};
pub use shape::{ColliderType, Shape};
