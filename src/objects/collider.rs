use crate::math::{Transform, Vec2};
use crate::shapes::Shape;
use crate::world::store::BodyHandle;
use serde::{Deserialize, Serialize};

/// Initial parameters for a collider. The stored position/rotation place a
/// collider that has no rigid body (static terrain); a collider attached to
/// a body follows the body instead.
///
/// The friction defaults are deliberately stylized (well above real-world
/// coefficients) so stacked objects settle quickly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderConfig {
    pub shape: Shape,
    /// Restitution coefficient, 0 = inelastic .. 1 = perfectly elastic.
    pub elasticity: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
    pub position: Vec2,
    pub rotation: f32,
}

impl ColliderConfig {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            elasticity: 0.0,
            static_friction: 2.0,
            dynamic_friction: 1.0,
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }
}

/// A shape placed in the world, optionally backed by a rigid body. Colliders
/// without a body never move; the resolver treats them as infinite mass.
///
/// World geometry is always derived from the current transform at query
/// time, never cached across a step.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub elasticity: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
    pub(crate) body: Option<BodyHandle>,
    pub(crate) position: Vec2,
    pub(crate) rotation: f32,
}

impl Collider {
    pub(crate) fn new(config: ColliderConfig, body: Option<BodyHandle>) -> Self {
        Self {
            shape: config.shape,
            elasticity: config.elasticity,
            static_friction: config.static_friction,
            dynamic_friction: config.dynamic_friction,
            body,
            position: config.position,
            rotation: config.rotation,
        }
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// Transform for a collider that is not following a body.
    pub(crate) fn static_transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }
}
