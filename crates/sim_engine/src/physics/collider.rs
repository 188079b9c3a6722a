//! Colliders and per-tick contact detection
//!
//! A collider is a capability attached to a game object. It answers
//! shape-vs-shape and point containment questions and keeps the set of
//! contacts found during the current tick.

use std::collections::HashSet;
use std::fmt::Debug;

use super::collision::Collision;
use super::shape::{ColliderType, Shape};
use crate::foundation::math::{Transform, Vec2, Vec3};
use crate::scene::{ObjectId, World};
use crate::spatial::SpatialIndex;

/// Intersection and containment tests for one object
///
/// Colliders do not own a transform; the caller passes the transform of the
/// object the collider is attached to.
pub trait Collider: Send + Sync + Debug {
    /// Kind of shape this collider tests with
    fn collider_type(&self) -> ColliderType;

    /// Concrete geometry, when this collider has one of its own
    fn shape(&self) -> Option<&Shape>;

    /// Test against another collider, writing the contact point on a hit.
    ///
    /// `recursive` is set when this call is already the swapped half of a
    /// test the other collider could not answer; `z` is the depth given to
    /// the contact point.
    fn collides_with(
        &self,
        this: &Transform,
        other: &dyn Collider,
        other_transform: &Transform,
        contact_point: &mut Vec3,
        recursive: bool,
        z: f32,
    ) -> bool;

    /// Whether a planar point is inside
    fn point_inside_2d(&self, this: &Transform, point: Vec2) -> bool;

    /// Whether a 3D point is inside
    fn point_inside(&self, this: &Transform, point: Vec3) -> bool;
}

/// Collider backed by a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeCollider {
    shape: Shape,
}

impl ShapeCollider {
    /// Create a collider for the given shape
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    /// Circle collider
    pub fn circle(radius: f32) -> Self {
        Self::new(Shape::circle(radius))
    }

    /// Rectangle collider
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::new(Shape::rectangle(width, height))
    }
}

impl Collider for ShapeCollider {
    fn collider_type(&self) -> ColliderType {
        self.shape.collider_type()
    }

    fn shape(&self) -> Option<&Shape> {
        Some(&self.shape)
    }

    fn collides_with(
        &self,
        this: &Transform,
        other: &dyn Collider,
        other_transform: &Transform,
        contact_point: &mut Vec3,
        recursive: bool,
        z: f32,
    ) -> bool {
        let Some(other_shape) = other.shape() else {
            // Let the other side answer with the roles swapped, once
            return !recursive
                && other.collides_with(other_transform, self, this, contact_point, true, z);
        };

        match self.shape.intersect(this, other_shape, other_transform) {
            Some(contact) => {
                *contact_point = Vec3::new(contact.x, contact.y, z);
                true
            }
            None => false,
        }
    }

    fn point_inside_2d(&self, this: &Transform, point: Vec2) -> bool {
        self.shape.contains_2d(this, point)
    }

    fn point_inside(&self, this: &Transform, point: Vec3) -> bool {
        self.shape.contains_3d(this, point)
    }
}

/// Collider capability as attached to a game object
///
/// Holds the collider, whether it takes part in detection, and the contacts
/// found during the current tick.
#[derive(Debug)]
pub struct ColliderComponent {
    collider: Box<dyn Collider>,
    active: bool,
    collisions: HashSet<Collision>,
}

impl ColliderComponent {
    /// Wrap a collider; it starts inactive
    pub fn new(collider: impl Collider + 'static) -> Self {
        Self::from_boxed(Box::new(collider))
    }

    /// Wrap an already boxed collider
    pub fn from_boxed(collider: Box<dyn Collider>) -> Self {
        Self {
            collider,
            active: false,
            collisions: HashSet::new(),
        }
    }

    /// Builder form of [`ColliderComponent::set_active`]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether this collider runs detection each tick
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn detection on or off
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The wrapped collider
    pub fn collider(&self) -> &dyn Collider {
        self.collider.as_ref()
    }

    /// Contacts from the last detection pass
    pub fn collisions(&self) -> &HashSet<Collision> {
        &self.collisions
    }

    /// Replace the contact set with a freshly detected one
    pub fn set_collisions(&mut self, collisions: HashSet<Collision>) {
        self.collisions = collisions;
    }

    /// Find this tick's contacts for the object `this`.
    ///
    /// Tests against every other indexed object that has a collider, so the
    /// cost is O(N) shape tests per active collider. An inactive collider
    /// yields an empty set. Reads the world only.
    pub fn detect(&self, this: ObjectId, transform: &Transform, world: &World) -> HashSet<Collision> {
        let mut contacts = HashSet::new();
        if !self.active {
            return contacts;
        }

        for other_id in world.grid().enumerate() {
            if other_id == this {
                continue;
            }
            let Some(other) = world.get(other_id) else {
                continue;
            };
            let Some(other_collider) = other.collider() else {
                continue;
            };

            let mut contact_point = Vec3::zeros();
            if self.collider.collides_with(
                transform,
                other_collider.collider(),
                &other.transform,
                &mut contact_point,
                false,
                0.0,
            ) {
                contacts.insert(Collision::new(this, other_id, contact_point));
            }
        }

        contacts
    }
}

/// Detect contacts for one object of the world, if it has a collider
pub fn detect_contacts(world: &World, id: ObjectId) -> Option<HashSet<Collision>> {
    let object = world.get(id)?;
    let collider = object.collider()?;
    Some(collider.detect(id, &object.transform, world))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GameObject;
    use crate::spatial::IndexKind;

    fn circle_at(x: f32, y: f32, active: bool) -> GameObject {
        GameObject::at(Vec3::new(x, y, 0.0))
            .with_collider(ColliderComponent::new(ShapeCollider::circle(1.0)).with_active(active))
    }

    #[test]
    fn test_collides_with_writes_contact() {
        let a = ShapeCollider::circle(1.0);
        let b = ShapeCollider::circle(1.0);
        let mut contact = Vec3::zeros();

        let hit = a.collides_with(
            &Transform::from_position(Vec3::zeros()),
            &b,
            &Transform::from_position(Vec3::new(1.5, 0.0, 0.0)),
            &mut contact,
            false,
            2.0,
        );

        assert!(hit);
        assert_eq!(contact, Vec3::new(0.75, 0.0, 2.0));
    }

    #[test]
    fn test_detect_finds_neighbors_but_not_self() {
        let mut world = World::new(IndexKind::Linear);
        let a = world.spawn(circle_at(0.0, 0.0, true));
        let b = world.spawn(circle_at(1.5, 0.0, false));
        world.spawn(circle_at(10.0, 0.0, false));

        let contacts = detect_contacts(&world, a).unwrap();

        assert_eq!(contacts.len(), 1);
        let contact = contacts.iter().next().unwrap();
        assert_eq!(contact.active, a);
        assert_eq!(contact.other, b);
    }

    #[test]
    fn test_inactive_collider_detects_nothing() {
        let mut world = World::new(IndexKind::Linear);
        let a = world.spawn(circle_at(0.0, 0.0, false));
        world.spawn(circle_at(0.5, 0.0, true));

        assert!(detect_contacts(&world, a).unwrap().is_empty());
    }

    #[test]
    fn test_objects_without_collider_are_skipped() {
        let mut world = World::new(IndexKind::Linear);
        let a = world.spawn(circle_at(0.0, 0.0, true));
        let bare = world.spawn(GameObject::at(Vec3::new(0.5, 0.0, 0.0)));

        assert!(detect_contacts(&world, a).unwrap().is_empty());
        assert!(detect_contacts(&world, bare).is_none());
    }

    #[test]
    fn test_detection_only_sees_indexed_objects() {
        let mut world = World::new(IndexKind::Tree);
        let a = world.spawn(circle_at(0.0, 0.0, true));
        // Same cell as `a`: the tree keeps the first writer, so this one is never indexed
        world.spawn(circle_at(0.5, 0.5, false));

        assert!(detect_contacts(&world, a).unwrap().is_empty());
    }
}
