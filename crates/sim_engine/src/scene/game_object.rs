//! Game objects: a transform plus optional collision and physics capabilities

use slotmap::new_key_type;

use crate::foundation::math::{Transform, Vec3};
use crate::physics::{ColliderComponent, PhysicsBody};

new_key_type! {
    /// Stable identifier of a game object inside a [`World`](super::World)
    pub struct ObjectId;
}

/// Opaque handle to something a renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u32);

/// A simulated object
///
/// Owns its transform exclusively. Collider and physics body are optional
/// capabilities; other systems reach them through the read-only accessors.
#[derive(Debug, Default)]
pub struct GameObject {
    /// Spatial state
    pub transform: Transform,

    /// Classification tag, also folded into packed grid keys
    pub metadata: u16,

    collider: Option<ColliderComponent>,
    body: Option<PhysicsBody>,
    renderables: Vec<RenderHandle>,
}

impl GameObject {
    /// Create an object with the given transform and no capabilities
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            ..Default::default()
        }
    }

    /// Create an object at a position
    pub fn at(position: Vec3) -> Self {
        Self::new(Transform::from_position(position))
    }

    /// Set the metadata tag
    pub fn with_metadata(mut self, metadata: u16) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach a collider
    pub fn with_collider(mut self, collider: ColliderComponent) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Attach a physics body
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a renderable handle
    pub fn with_renderable(mut self, handle: RenderHandle) -> Self {
        self.renderables.push(handle);
        self
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// The collider, if any
    pub fn collider(&self) -> Option<&ColliderComponent> {
        self.collider.as_ref()
    }

    /// Mutable collider access
    pub fn collider_mut(&mut self) -> Option<&mut ColliderComponent> {
        self.collider.as_mut()
    }

    /// The physics body, if any
    pub fn body(&self) -> Option<&PhysicsBody> {
        self.body.as_ref()
    }

    /// Mutable physics body access
    pub fn body_mut(&mut self) -> Option<&mut PhysicsBody> {
        self.body.as_mut()
    }

    /// Renderable handles owned by this object
    pub fn renderables(&self) -> &[RenderHandle] {
        &self.renderables
    }
}
