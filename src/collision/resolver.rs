//! Iterative sequential-impulse collision resolution.
//!
//! The solver runs a fixed number of relaxation passes per step, because
//! resolving one contact can reintroduce penetration or velocity error in
//! another (Gauss-Seidel style, not a direct solve). Each pass re-detects
//! every pair from the current positions so corrections always work on
//! exact penetration depths, then applies positional correction, a
//! restitution-aware normal impulse, and a Coulomb friction impulse per
//! contact point.

use super::detection;
use super::manifold::CollisionInfo;
use crate::math::Vec2;
use crate::objects::{Collider, RigidBody};
use crate::world::store::{Arena, BodyHandle, ColliderHandle};
use crate::world::PhysicsConfig;

/// One side of a contact: mass properties plus where impulses attach.
struct ContactSide {
    body: Option<BodyHandle>,
    inv_mass: f32,
    inv_inertia: f32,
    center: Vec2,
}

impl ContactSide {
    fn resolve(collider: &Collider, bodies: &Arena<RigidBody>) -> Self {
        match collider.body().and_then(|h| bodies.get(h.0).map(|b| (h, b))) {
            Some((handle, body)) => Self {
                body: Some(handle),
                inv_mass: body.inv_mass(),
                inv_inertia: body.inv_inertia(),
                center: body.position,
            },
            // Bodyless colliders are immovable terrain.
            None => Self {
                body: None,
                inv_mass: 0.0,
                inv_inertia: 0.0,
                center: collider.static_transform().position,
            },
        }
    }

    /// Velocity of this side's material point at the contact, read fresh
    /// from the store so earlier impulses in the same pass are seen.
    fn velocity_at(&self, bodies: &Arena<RigidBody>, r: Vec2) -> Vec2 {
        match self.body.and_then(|h| bodies.get(h.0)) {
            Some(body) => body.linear_velocity + r.perpendicular() * body.angular_velocity,
            None => Vec2::ZERO,
        }
    }

    fn apply_impulse(&self, bodies: &mut Arena<RigidBody>, impulse: Vec2, r: Vec2) {
        if let Some(body) = self.body.and_then(|h| bodies.get_mut(h.0)) {
            body.linear_velocity += impulse * self.inv_mass;
            body.angular_velocity += r.cross(impulse) * self.inv_inertia;
        }
    }

    fn shift_position(&self, bodies: &mut Arena<RigidBody>, delta: Vec2) {
        if let Some(body) = self.body.and_then(|h| bodies.get_mut(h.0)) {
            body.position += delta;
        }
    }
}

/// Resolves the step's colliding pairs over `config.solver_passes` passes.
/// Pairs that separate mid-resolution drop out on re-detection.
pub(crate) fn resolve_collisions(
    bodies: &mut Arena<RigidBody>,
    colliders: &Arena<Collider>,
    pairs: &[(ColliderHandle, ColliderHandle)],
    config: &PhysicsConfig,
    dt: f32,
) {
    for _ in 0..config.solver_passes {
        for &(handle_a, handle_b) in pairs {
            let (Some(collider_a), Some(collider_b)) =
                (colliders.get(handle_a.0), colliders.get(handle_b.0))
            else {
                continue;
            };
            let transform_a = detection::collider_transform(collider_a, bodies);
            let transform_b = detection::collider_transform(collider_b, bodies);

            let Some(mut info) = detection::narrow_phase(
                handle_a, collider_a, transform_a, handle_b, collider_b, transform_b,
            ) else {
                continue;
            };
            info.contacts = detection::generate_contacts(&info, colliders, bodies);

            resolve_contact(bodies, colliders, &info, config, dt);
        }
    }
}

fn resolve_contact(
    bodies: &mut Arena<RigidBody>,
    colliders: &Arena<Collider>,
    info: &CollisionInfo,
    config: &PhysicsConfig,
    dt: f32,
) {
    let (Some(collider_a), Some(collider_b)) = (
        colliders.get(info.collider_a.0),
        colliders.get(info.collider_b.0),
    ) else {
        return;
    };

    let side_a = ContactSide::resolve(collider_a, bodies);
    let side_b = ContactSide::resolve(collider_b, bodies);

    let total_inv_mass = side_a.inv_mass + side_b.inv_mass;
    if total_inv_mass == 0.0 {
        // Two immovable colliders; nothing to push.
        return;
    }

    let normal = info.normal;

    // Positional correction: linear projection along the normal, split in
    // proportion to inverse mass. Only a fraction of the remaining depth is
    // corrected per pass to avoid jitter; depths inside the slop are left
    // alone entirely.
    let correction_magnitude = (info.depth - config.penetration_slop).max(0.0);
    if correction_magnitude > 0.0 {
        let correction =
            normal * (correction_magnitude / total_inv_mass * config.correction_percent);
        side_a.shift_position(bodies, -correction * side_a.inv_mass);
        side_b.shift_position(bodies, correction * side_b.inv_mass);
    }

    // Degenerate clipping leaves no contact points; fall back to the
    // midpoint between the shape centers.
    let midpoint = (side_a.center + side_b.center) * 0.5;
    let contacts: &[Vec2] = if info.contacts.is_empty() {
        std::slice::from_ref(&midpoint)
    } else {
        &info.contacts
    };

    for &contact in contacts {
        let r_a = contact - side_a.center;
        let r_b = contact - side_b.center;

        let relative_velocity =
            side_b.velocity_at(bodies, r_b) - side_a.velocity_at(bodies, r_a);
        let velocity_along_normal = relative_velocity.dot(normal);

        // Already separating at this point; no impulse.
        if velocity_along_normal >= 0.0 {
            continue;
        }

        // Resting contact accumulates one timestep of gravity every frame.
        // Ignore that share when deciding whether the hit is fast enough to
        // bounce, and kill restitution entirely below the threshold.
        let gravity_share = (config.gravity * dt).dot(normal);
        let adjusted_normal_speed = velocity_along_normal - gravity_share;
        let elasticity = if adjusted_normal_speed.abs() < config.restitution_threshold {
            0.0
        } else {
            (collider_a.elasticity + collider_b.elasticity) * 0.5
        };

        let ra_cross_n = r_a.cross(normal);
        let rb_cross_n = r_b.cross(normal);
        let normal_mass = total_inv_mass
            + ra_cross_n * ra_cross_n * side_a.inv_inertia
            + rb_cross_n * rb_cross_n * side_b.inv_inertia;

        let j = -(1.0 + elasticity) * velocity_along_normal / normal_mass;
        let impulse = normal * j;
        side_a.apply_impulse(bodies, -impulse, r_a);
        side_b.apply_impulse(bodies, impulse, r_b);

        // Friction along the tangent of the post-impulse relative velocity.
        let relative_velocity =
            side_b.velocity_at(bodies, r_b) - side_a.velocity_at(bodies, r_a);
        let tangent_velocity = relative_velocity - normal * relative_velocity.dot(normal);
        if tangent_velocity.magnitude_squared() < 1e-8 {
            continue;
        }
        let tangent = tangent_velocity.normalize();

        let ra_cross_t = r_a.cross(tangent);
        let rb_cross_t = r_b.cross(tangent);
        let tangent_mass = total_inv_mass
            + ra_cross_t * ra_cross_t * side_a.inv_inertia
            + rb_cross_t * rb_cross_t * side_b.inv_inertia;

        let jt = -relative_velocity.dot(tangent) / tangent_mass;

        let static_friction = (collider_a.static_friction + collider_b.static_friction) * 0.5;
        let dynamic_friction = (collider_a.dynamic_friction + collider_b.dynamic_friction) * 0.5;

        // Coulomb's law: within the static cone the contact sticks and the
        // full tangential impulse cancels sliding; outside it the contact
        // slips and friction is capped by the dynamic coefficient.
        let friction_impulse = if jt.abs() <= j * static_friction {
            tangent * jt
        } else {
            tangent * (-j * dynamic_friction)
        };

        side_a.apply_impulse(bodies, -friction_impulse, r_a);
        side_b.apply_impulse(bodies, friction_impulse, r_b);
    }
}
