pub mod aabb;
pub(crate) mod contact;
pub(crate) mod detection;
pub mod manifold;
pub(crate) mod resolver;

pub use aabb::AABB;
pub use manifold::{CollisionEvent, CollisionInfo};
