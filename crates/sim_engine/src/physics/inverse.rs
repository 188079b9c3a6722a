//! Inverse collider decorator

use super::collider::Collider;
use super::shape::{ColliderType, Shape};
use crate::foundation::math::{Transform, Vec2, Vec3};

/// Negates every answer of the collider it wraps.
///
/// Shares the wrapped collider's type and is attached to the same object;
/// "inside" becomes "outside", which turns a shape into a container.
#[derive(Debug)]
pub struct InverseCollider {
    inner: Box<dyn Collider>,
}

impl InverseCollider {
    /// Wrap a collider
    pub fn new(inner: impl Collider + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// The wrapped collider
    pub fn inner(&self) -> &dyn Collider {
        self.inner.as_ref()
    }
}

impl Collider for InverseCollider {
    fn collider_type(&self) -> ColliderType {
        self.inner.collider_type()
    }

    fn shape(&self) -> Option<&Shape> {
        None
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
        !self
            .inner
            .collides_with(this, other, other_transform, contact_point, recursive, z)
    }

    fn point_inside_2d(&self, this: &Transform, point: Vec2) -> bool {
        !self.inner.point_inside_2d(this, point)
    }

    fn point_inside(&self, this: &Transform, point: Vec3) -> bool {
        !self.inner.point_inside(this, point)
    }
}
