use crate::math::Vec2;
use crate::world::store::ColliderHandle;

/// Narrow-phase result for one collider pair. Rebuilt from scratch every
/// step (and every resolver pass); never persisted.
///
/// The normal is a unit vector pointing from collider A toward collider B.
/// For mixed circle/polygon pairs A is the polygon; for polygon/polygon
/// pairs A is the reference polygon (the one whose edge produced the
/// separating axis of minimum overlap).
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionInfo {
    pub collider_a: ColliderHandle,
    pub collider_b: ColliderHandle,
    pub normal: Vec2,
    /// Penetration depth along the normal.
    pub depth: f32,
    /// 0–2 world-space contact points. Empty when clipping degenerated; the
    /// resolver then falls back to the midpoint between the shape centers.
    pub contacts: Vec<Vec2>,
}

impl CollisionInfo {
    /// Minimum translation vector separating B from A.
    pub fn mtv(&self) -> Vec2 {
        self.normal * self.depth
    }
}

/// What the game layer sees of a collision: one event per colliding pair
/// per step, in discovery order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub collider_a: ColliderHandle,
    pub collider_b: ColliderHandle,
    pub normal: Vec2,
    pub depth: f32,
}
