//! Planar collision shapes
//!
//! Shapes live in the XY plane of their transform. Scale stretches them;
//! rotation is ignored, so rectangles stay axis-aligned.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Transform, Vec2, Vec3};

/// Kind of shape a collider tests with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderType {
    /// Circle in the plane, sphere for 3D point tests
    Circle,
    /// Axis-aligned rectangle in the plane, extruded along Z for 3D point tests
    Rectangle,
}

/// Geometry of a collider in local units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle of the given radius
    Circle {
        /// Radius before scaling
        radius: f32,
    },
    /// Rectangle with the given half extents
    Rectangle {
        /// Half width and half height before scaling
        half_extents: Vec2,
    },
}

/// Shape placed in the world by a transform
#[derive(Debug, Clone, Copy)]
enum Placed {
    Circle { center: Vec2, radius: f32 },
    Rectangle { center: Vec2, half: Vec2 },
}

impl Shape {
    /// Create a circle
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    /// Create a rectangle from its full width and height
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::Rectangle {
            half_extents: Vec2::new(width * 0.5, height * 0.5),
        }
    }

    /// Which kind of shape this is
    pub fn collider_type(&self) -> ColliderType {
        match self {
            Self::Circle { .. } => ColliderType::Circle,
            Self::Rectangle { .. } => ColliderType::Rectangle,
        }
    }

    fn place(&self, transform: &Transform) -> Placed {
        let center = utils::flatten(&transform.position);
        match *self {
            Self::Circle { radius } => Placed::Circle {
                center,
                radius: radius * transform.scale.x.abs().max(transform.scale.y.abs()),
            },
            Self::Rectangle { half_extents } => Placed::Rectangle {
                center,
                half: Vec2::new(
                    half_extents.x * transform.scale.x.abs(),
                    half_extents.y * transform.scale.y.abs(),
                ),
            },
        }
    }

    /// Test two placed shapes for overlap, returning the planar contact point
    pub fn intersect(
        &self,
        transform: &Transform,
        other: &Shape,
        other_transform: &Transform,
    ) -> Option<Vec2> {
        match (self.place(transform), other.place(other_transform)) {
            (
                Placed::Circle { center: a, radius: ra },
                Placed::Circle { center: b, radius: rb },
            ) => circle_circle(a, ra, b, rb),
            (
                Placed::Rectangle { center: a, half: ha },
                Placed::Rectangle { center: b, half: hb },
            ) => rect_rect(a, ha, b, hb),
            (Placed::Circle { center, radius }, Placed::Rectangle { center: rc, half })
            | (Placed::Rectangle { center: rc, half }, Placed::Circle { center, radius }) => {
                circle_rect(center, radius, rc, half)
            }
        }
    }

    /// Whether a planar point lies inside the placed shape
    pub fn contains_2d(&self, transform: &Transform, point: Vec2) -> bool {
        match self.place(transform) {
            Placed::Circle { center, radius } => (point - center).norm_squared() <= radius * radius,
            Placed::Rectangle { center, half } => {
                let d = point - center;
                d.x.abs() <= half.x && d.y.abs() <= half.y
            }
        }
    }

    /// Whether a 3D point lies inside the placed shape
    pub fn contains_3d(&self, transform: &Transform, point: Vec3) -> bool {
        match *self {
            Self::Circle { radius } => {
                let radius = radius * transform.scale.abs().max();
                (point - transform.position).norm_squared() <= radius * radius
            }
            Self::Rectangle { .. } => {
                let depth = transform.scale.z.abs() * 0.5;
                (point.z - transform.position.z).abs() <= depth
                    && self.contains_2d(transform, utils::flatten(&point))
            }
        }
    }
}

fn circle_circle(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Option<Vec2> {
    let offset = b - a;
    let distance = offset.norm();
    if distance > ra + rb {
        return None;
    }

    let normal = if distance > f32::EPSILON {
        offset / distance
    } else {
        Vec2::zeros()
    };
    // Midpoint between the two surface points facing each other
    Some(((a + normal * ra) + (b - normal * rb)) * 0.5)
}

fn rect_rect(a: Vec2, ha: Vec2, b: Vec2, hb: Vec2) -> Option<Vec2> {
    let d = b - a;
    if d.x.abs() > ha.x + hb.x || d.y.abs() > ha.y + hb.y {
        return None;
    }

    let min = Vec2::new((a.x - ha.x).max(b.x - hb.x), (a.y - ha.y).max(b.y - hb.y));
    let max = Vec2::new((a.x + ha.x).min(b.x + hb.x), (a.y + ha.y).min(b.y + hb.y));
    Some((min + max) * 0.5)
}

fn circle_rect(center: Vec2, radius: f32, rect_center: Vec2, half: Vec2) -> Option<Vec2> {
    let closest = Vec2::new(
        center.x.clamp(rect_center.x - half.x, rect_center.x + half.x),
        center.y.clamp(rect_center.y - half.y, rect_center.y + half.y),
    );
    if (closest - center).norm_squared() <= radius * radius {
        Some(closest)
    } else {
        None
    }
}
