pub mod collider;
pub mod rigid_body;

pub use collider::{Collider, ColliderConfig};
pub use rigid_body::{BodyConfig, RigidBody};
