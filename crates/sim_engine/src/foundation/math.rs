//! Math utilities and types
//!
//! Provides the vector and quaternion types used by the simulation core.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Unit quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Transform representing position, rotation, and scale
///
/// Owned exclusively by its game object and the single source of truth
/// for where the object is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform with position and scale
    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ..Default::default()
        }
    }

    /// Create a transform from all three parts
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Compose the rotation with a (possibly non-unit) delta quaternion.
    ///
    /// The product is renormalized; a degenerate product leaves the rotation unchanged.
    pub fn rotate_by(&mut self, delta: Quaternion<f32>) {
        let product = self.rotation.into_inner() * delta;
        if let Some(rotation) = Quat::try_new(product, f32::EPSILON) {
            self.rotation = rotation;
        }
    }
}

/// Math constants
pub mod constants {
    /// Magnitude at or below which a velocity is considered at rest
    pub const REST_THRESHOLD: f32 = 0.09;

    /// Divisor turning a tick interval into a per-tick position scale
    pub const TICK_SCALE_DIVISOR: f32 = 100.0;
}

/// Math utility functions
pub mod utils {
    use super::{Vec2, Vec3};

    /// Truncate a coordinate toward zero, the way the grid discretizes positions
    #[allow(clippy::cast_possible_truncation)]
    pub fn discretize(value: f32) -> i32 {
        value as i32
    }

    /// Lift a planar point into 3D at depth zero
    pub fn lift(point: Vec2) -> Vec3 {
        Vec3::new(point.x, point.y, 0.0)
    }

    /// Drop the depth component of a 3D point
    pub fn flatten(point: &Vec3) -> Vec2 {
        Vec2::new(point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_transform_defaults() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = EPSILON);
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotate_by_scaled_identity_keeps_rotation() {
        let mut transform = Transform::identity();
        transform.rotate_by(Quaternion::identity() * 0.2);

        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_by_zero_is_ignored() {
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), 0.5);
        let mut transform = Transform::from_position_rotation(Vec3::zeros(), rotation);
        transform.rotate_by(Quaternion::new(0.0, 0.0, 0.0, 0.0));

        assert_relative_eq!(transform.rotation, rotation, epsilon = EPSILON);
    }

    #[test]
    fn test_discretize_truncates_toward_zero() {
        assert_eq!(utils::discretize(1.9), 1);
        assert_eq!(utils::discretize(-1.9), -1);
        assert_eq!(utils::discretize(0.0), 0);
    }
}
