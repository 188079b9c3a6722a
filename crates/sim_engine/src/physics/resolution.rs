//! Contact resolution: the impulse exchange between two bodies
//!
//! This is a simplified exchange model rather than rigid-body physics. It
//! ignores angular momentum and assumes circular colliders. The rules below
//! are the engine's observable behavior and are kept as they are.

use super::body::PhysicsBody;
use super::collision::Collision;
use super::error::PhysicsError;
use crate::foundation::math::{Quat, Vec3};

/// New velocities produced by resolving one contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResolution {
    /// Velocity for the active body
    pub velocity: Vec3,
    /// Velocity for the other body; `None` when it has no body to write to
    pub other_velocity: Option<Vec3>,
    /// Angle the outgoing momentum was rotated by
    pub hit_angle: f32,
}

/// Angle between the contact's vertical and the direction to `p3`.
///
/// `p1` is the contact point and `p2` sits one unit above it. Note the first
/// term subtracts `p2.x`, not `p1.x`; both are equal here by construction.
pub fn hit_angle(p1: &Vec3, p2: &Vec3, p3: &Vec3) -> f32 {
    (p3.y - p1.y).atan2(p3.x - p2.x) - (p2.y - p1.y).atan2(p2.x - p1.x)
}

/// Resolve one contact of the active body.
///
/// `active_position` is the active object's position this tick and serves
/// as the third point of the hit angle. `other` is the other object's body,
/// if it has one; without a body the other object is immovable and the
/// mass ratio is one.
///
/// Fails with [`PhysicsError::InvalidMass`] when either mass is not
/// positive and finite, and with [`PhysicsError::MassRatioInversion`] when
/// `1 / (other.mass / body.mass)` exceeds one.
pub fn resolve_contact(
    collision: &Collision,
    active_position: &Vec3,
    body: &PhysicsBody,
    other: Option<&PhysicsBody>,
) -> Result<ContactResolution, PhysicsError> {
    if !body.has_valid_mass() {
        return Err(PhysicsError::InvalidMass {
            object: collision.active,
            mass: body.mass,
        });
    }
    if let Some(other) = other.filter(|other| !other.has_valid_mass()) {
        return Err(PhysicsError::InvalidMass {
            object: collision.other,
            mass: other.mass,
        });
    }

    let kinetic0 = body.momentum();
    let kinetic1 = other.map_or_else(Vec3::zeros, PhysicsBody::momentum);

    let p1 = collision.contact_point;
    let p2 = p1 + Vec3::y();
    let p3 = *active_position;
    let hit_angle = hit_angle(&p1, &p2, &p3);
    let rot0 = Quat::from_axis_angle(&Vec3::z_axis(), hit_angle);
    let rot1 = Quat::from_axis_angle(&Vec3::z_axis(), -hit_angle);

    let total_energy = kinetic0 + kinetic1;
    let momentum_difference = kinetic0 - kinetic1;
    log::trace!(
        "Contact {:?} -> {:?}: total {:?}, difference {:?}, angle {}",
        collision.active,
        collision.other,
        total_energy,
        momentum_difference,
        hit_angle
    );

    let mass_ratio = other.map_or(1.0, |other| 1.0 / (other.mass / body.mass));
    if mass_ratio > 1.0 {
        return Err(PhysicsError::MassRatioInversion {
            object: collision.active,
            other: collision.other,
            ratio: mass_ratio,
        });
    }

    let kinetic0 = rot0 * (total_energy * mass_ratio);
    let kinetic1 = rot1 * (total_energy * (mass_ratio - 1.0).abs());

    // Both velocities divide by the active body's mass
    Ok(ContactResolution {
        velocity: kinetic0 / body.mass,
        other_velocity: other.map(|_| kinetic1 / body.mass),
        hit_angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::object_ids;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn contact_at(point: Vec3) -> Collision {
        let ids = object_ids(2);
        Collision::new(ids[0], ids[1], point)
    }

    #[test]
    fn test_hit_angle_head_on_from_left() {
        let p1 = Vec3::new(1.0, 0.0, 0.0);
        let angle = hit_angle(&p1, &(p1 + Vec3::y()), &Vec3::zeros());

        // atan2(0, -1) - atan2(1, 0) = pi - pi/2
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_immovable_other() {
        let body = PhysicsBody::new(1.0, 1.0).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        let collision = contact_at(Vec3::new(1.0, 0.0, 0.0));

        let resolution = resolve_contact(&collision, &Vec3::zeros(), &body, None).unwrap();

        // Full momentum, rotated a quarter turn about Z
        assert_relative_eq!(resolution.velocity, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert!(resolution.other_velocity.is_none());
    }

    #[test]
    fn test_lighter_active_body_shares_momentum() {
        let body = PhysicsBody::new(1.0, 1.0).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        let other = PhysicsBody::new(2.0, 1.0);
        let collision = contact_at(Vec3::new(1.0, 0.0, 0.0));

        let resolution = resolve_contact(&collision, &Vec3::zeros(), &body, Some(&other)).unwrap();

        // ratio = 1 / (2 / 1) = 0.5; total momentum (1, 0, 0)
        assert_relative_eq!(resolution.velocity, Vec3::new(0.0, 0.5, 0.0), epsilon = 1e-6);
        let other_velocity = resolution.other_velocity.unwrap();
        assert_relative_eq!(other_velocity, Vec3::new(0.0, -0.5, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_other_velocity_divides_by_active_mass() {
        let body = PhysicsBody::new(2.0, 1.0).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        let other = PhysicsBody::new(8.0, 1.0);
        let collision = contact_at(Vec3::new(1.0, 0.0, 0.0));

        let resolution = resolve_contact(&collision, &Vec3::zeros(), &body, Some(&other)).unwrap();

        // total (2, 0, 0), ratio 0.25: active 0.5 / 2, other 1.5 / 2
        assert_relative_eq!(resolution.velocity, Vec3::new(0.0, 0.25, 0.0), epsilon = 1e-6);
        assert_relative_eq!(resolution.other_velocity.unwrap(), Vec3::new(0.0, -0.75, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_equal_masses_keep_full_momentum() {
        let body = PhysicsBody::new(1.0, 1.0).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        let other = PhysicsBody::new(1.0, 1.0).with_velocity(Vec3::new(-1.0, 0.0, 0.0));
        let collision = contact_at(Vec3::new(1.0, 0.0, 0.0));

        let resolution = resolve_contact(&collision, &Vec3::zeros(), &body, Some(&other)).unwrap();

        // Opposite momenta cancel: nothing left to hand out
        assert_relative_eq!(resolution.velocity, Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(resolution.other_velocity.unwrap(), Vec3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_heavier_active_body_is_fatal() {
        let body = PhysicsBody::new(3.0, 1.0).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        let other = PhysicsBody::new(1.0, 1.0);
        let collision = contact_at(Vec3::new(1.0, 0.0, 0.0));

        let result = resolve_contact(&collision, &Vec3::zeros(), &body, Some(&other));

        match result {
            Err(PhysicsError::MassRatioInversion { object, other, ratio }) => {
                assert_eq!(object, collision.active);
                assert_eq!(other, collision.other);
                assert_relative_eq!(ratio, 3.0);
            }
            other => panic!("expected mass ratio inversion, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_mass_is_rejected() {
        let mut body = PhysicsBody::new(1.0, 1.0).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        body.mass = 0.0;
        let other = PhysicsBody::new(1.0, 1.0);
        let collision = contact_at(Vec3::new(1.0, 0.0, 0.0));

        let result = resolve_contact(&collision, &Vec3::zeros(), &body, Some(&other));

        assert_eq!(
            result,
            Err(PhysicsError::InvalidMass {
                object: collision.active,
                mass: 0.0
            })
        );
    }

    #[test]
    fn test_zero_mass_other_is_rejected() {
        let body = PhysicsBody::new(1.0, 1.0).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        let mut other = PhysicsBody::new(1.0, 1.0);
        other.mass = 0.0;
        let collision = contact_at(Vec3::new(1.0, 0.0, 0.0));

        let result = resolve_contact(&collision, &Vec3::zeros(), &body, Some(&other));

        assert!(matches!(result, Err(PhysicsError::InvalidMass { object, .. }) if object == collision.other));
    }
}
