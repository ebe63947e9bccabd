use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// Factor applied to angular velocity every integration step so spinning
/// bodies wind down instead of rotating forever.
pub const ANGULAR_DAMPING: f32 = 0.98;

/// Initial parameters for a rigid body. `mass <= 0` makes the body
/// immovable: its inverse mass is stored as zero and no force or impulse
/// will ever move it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub mass: f32,
    pub position: Vec2,
    pub rotation: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            position: Vec2::ZERO,
            rotation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }
}

/// A game object's physical presence: mass and inertia properties plus the
/// velocity state the solver works on. Does not define size or bounds; that
/// is the attached collider's job, and the collider also supplies the moment
/// of inertia when it is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub position: Vec2,
    /// Radians.
    pub rotation: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,

    mass: f32,
    inv_mass: f32,
    inertia: f32,
    inv_inertia: f32,

    force: Vec2,
}

impl RigidBody {
    pub fn new(config: BodyConfig) -> Self {
        let (mass, inv_mass) = if config.mass > 0.0 {
            (config.mass, 1.0 / config.mass)
        } else {
            (0.0, 0.0)
        };
        Self {
            position: config.position,
            rotation: config.rotation,
            linear_velocity: config.linear_velocity,
            angular_velocity: config.angular_velocity,
            mass,
            inv_mass,
            inertia: 0.0,
            inv_inertia: 0.0,
            force: Vec2::ZERO,
        }
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    /// Installs the moment of inertia computed from the attached collider's
    /// shape. Non-positive inertia leaves the body non-rotating (inverse
    /// inertia stays zero).
    pub(crate) fn set_inertia(&mut self, inertia: f32) {
        if inertia > 0.0 {
            self.inertia = inertia;
            self.inv_inertia = 1.0 / inertia;
        } else {
            self.inertia = 0.0;
            self.inv_inertia = 0.0;
        }
    }

    /// Accumulates a force for the next integration step.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies an instantaneous velocity change scaled by inverse mass.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.linear_velocity += impulse * self.inv_mass;
    }

    /// Semi-implicit Euler step: velocity first from the accumulated force,
    /// then position from the new velocity. Clears the force accumulator.
    pub fn integrate(&mut self, dt: f32) {
        if self.inv_mass == 0.0 {
            self.force = Vec2::ZERO;
            return;
        }

        let acceleration = self.force * self.inv_mass;
        self.linear_velocity += acceleration * dt;
        self.position += self.linear_velocity * dt;

        self.rotation += self.angular_velocity * dt;
        self.angular_velocity *= ANGULAR_DAMPING;

        self.force = Vec2::ZERO;

        debug_assert!(
            self.position.is_finite() && self.linear_velocity.is_finite(),
            "non-finite body state after integration"
        );
    }
}
