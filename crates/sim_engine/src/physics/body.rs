//! Physics body: per-object velocity integration

use crate::foundation::math::{constants, Quaternion, Transform, Vec3};

/// Component for objects moved by the physics tick
///
/// Holds velocity, a rotation delta, mass and an inertia factor used as
/// per-tick damping. The transform and collider it works with belong to the
/// owning game object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    /// Linear velocity
    pub velocity: Vec3,

    /// Rotation delta composed onto the transform each tick (not necessarily unit)
    pub rotation_velocity: Quaternion<f32>,

    /// Mass
    pub mass: f32,

    /// Damping factor in (0, 1], multiplied into a moving velocity each tick
    pub inertia: f32,

    /// Gravity override; the world gravity applies when unset
    pub gravity: Option<Vec3>,

    /// Whether the body is ticked
    pub enabled: bool,
}

impl PhysicsBody {
    /// Create a resting body.
    ///
    /// `mass` must be positive and finite and `inertia` must lie in (0, 1].
    /// Resolution refuses a body whose mass breaks this.
    pub fn new(mass: f32, inertia: f32) -> Self {
        debug_assert!(mass.is_finite() && mass > 0.0, "mass must be positive, got {mass}");
        debug_assert!(inertia > 0.0 && inertia <= 1.0, "inertia must be in (0, 1], got {inertia}");
        Self {
            velocity: Vec3::zeros(),
            rotation_velocity: Quaternion::identity(),
            mass,
            inertia,
            gravity: None,
            enabled: true,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the rotation delta
    pub fn with_rotation_velocity(mut self, rotation_velocity: Quaternion<f32>) -> Self {
        self.rotation_velocity = rotation_velocity;
        self
    }

    /// Override the world gravity for this body
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = Some(gravity);
        self
    }

    /// Enable or disable ticking
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Gravity acting on this body given the world's gravity
    pub fn effective_gravity(&self, world_gravity: Vec3) -> Vec3 {
        self.gravity.unwrap_or(world_gravity)
    }

    /// Add a force to the velocity.
    ///
    /// The velocity grows by the component-wise square of the force, so the
    /// sign of the force is lost.
    pub fn apply_acceleration(&mut self, force: Vec3) {
        self.velocity += force.component_mul(&force);
    }

    /// Gravity then damping, the part of a tick before collisions.
    ///
    /// Above the rest threshold the velocity is scaled by `inertia`; at or
    /// below it the velocity snaps to exactly zero.
    pub fn integrate(&mut self, world_gravity: Vec3) {
        let gravity = self.effective_gravity(world_gravity);
        if gravity != Vec3::zeros() {
            self.apply_acceleration(gravity);
        }

        if self.velocity.magnitude() > constants::REST_THRESHOLD {
            self.velocity *= self.inertia;
        } else {
            self.velocity = Vec3::zeros();
        }
    }

    /// Whether the mass can be divided by
    pub fn has_valid_mass(&self) -> bool {
        self.mass.is_finite() && self.mass > 0.0
    }

    /// Whether the body is moving
    pub fn is_moving(&self) -> bool {
        self.velocity != Vec3::zeros()
    }

    /// `velocity * mass`
    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass
    }

    /// Move the transform by this tick's velocity and rotation delta
    pub fn commit(&self, transform: &mut Transform, scale: f32) {
        transform.position += self.velocity * scale;
        transform.rotate_by(self.rotation_velocity * scale);
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
