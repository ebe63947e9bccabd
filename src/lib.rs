//! A 2D rigid-body physics engine: circle and convex-polygon colliders,
//! SAT collision detection with polygon-clipping contact generation, and an
//! iterative impulse solver with restitution and friction.
//!
//! The game layer owns object lifetimes and rendering; this crate only
//! consumes positions, rotations, and masses, and produces corrected
//! positions and velocities plus a list of collision events per step.

pub mod collision;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{CollisionEvent, CollisionInfo, AABB};
pub use math::{Transform, Vec2};
pub use objects::{BodyConfig, Collider, ColliderConfig, RigidBody};
pub use shapes::{Circle, ConvexPolygon, Shape, ShapeError};
pub use world::{BodyHandle, ColliderHandle, PhysicsConfig, PhysicsWorld};
