pub mod physics_world;
pub(crate) mod store;

pub use physics_world::{PhysicsConfig, PhysicsWorld};
pub use store::{BodyHandle, ColliderHandle};
