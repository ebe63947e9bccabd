use crate::collision::{detection, resolver, CollisionEvent, CollisionInfo};
use crate::math::Vec2;
use crate::objects::{Collider, ColliderConfig, RigidBody};
use crate::objects::rigid_body::BodyConfig;
use crate::world::store::{Arena, BodyHandle, ColliderHandle};
use serde::{Deserialize, Serialize};

/// Tuning knobs for the simulation, with the engine's stock values as
/// defaults. Gravity is y-down screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    pub gravity: Vec2,
    /// Relaxation passes the resolver runs per step.
    pub solver_passes: usize,
    /// Penetration depth tolerated before positional correction kicks in.
    pub penetration_slop: f32,
    /// Fraction of the remaining penetration corrected per pass.
    pub correction_percent: f32,
    /// Contacts with an adjusted normal speed below this bounce not at all,
    /// whatever the colliders' elasticity. Anti-jitter policy, not physics.
    pub restitution_threshold: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 500.0),
            solver_passes: 4,
            penetration_slop: 0.1,
            correction_percent: 0.2,
            restitution_threshold: 10.0,
        }
    }
}

/// The core of the engine: owns the body and collider stores and drives the
/// per-step pipeline of integrate forces, detect collisions, resolve
/// collisions.
///
/// Everything is single-threaded and frame-stepped; the stores must not be
/// mutated while a step runs (the borrow checker enforces as much), and all
/// iteration happens in registration order so repeated runs of the same
/// scene are deterministic.
pub struct PhysicsWorld {
    bodies: Arena<RigidBody>,
    colliders: Arena<Collider>,
    pub config: PhysicsConfig,
    contacts: Vec<CollisionInfo>,
    events: Vec<CollisionEvent>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: Arena::new(),
            colliders: Arena::new(),
            config,
            contacts: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Registers a rigid body and returns its handle.
    pub fn add_body(&mut self, config: BodyConfig) -> BodyHandle {
        BodyHandle(self.bodies.insert(RigidBody::new(config)))
    }

    /// Deregisters a body. Colliders still pointing at it degrade to static
    /// terrain. Removing an unknown or already-removed handle is a no-op.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies.remove(handle.0).is_some()
    }

    /// Registers a collider, optionally attached to a body. Attachment is
    /// the moment the body's moment of inertia gets computed from the final
    /// shape parameters, so attach the collider after the body exists.
    pub fn add_collider(
        &mut self,
        config: ColliderConfig,
        body: Option<BodyHandle>,
    ) -> ColliderHandle {
        let collider = Collider::new(config, body);
        if let Some(body) = body.and_then(|h| self.bodies.get_mut(h.0)) {
            let inertia = collider.shape.moment_of_inertia(body.mass());
            body.set_inertia(inertia);
        }
        ColliderHandle(self.colliders.insert(collider))
    }

    /// Deregisters a collider; no-op if it is not currently registered.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> bool {
        self.colliders.remove(handle.0).is_some()
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.0)
    }

    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle.0)
    }

    /// Current world position of a collider (its body's, or its own static
    /// placement).
    pub fn collider_position(&self, handle: ColliderHandle) -> Option<Vec2> {
        let collider = self.colliders.get(handle.0)?;
        Some(detection::collider_transform(collider, &self.bodies).position)
    }

    /// Current world-space bounds of a collider.
    pub fn collider_aabb(&self, handle: ColliderHandle) -> Option<crate::collision::AABB> {
        let collider = self.colliders.get(handle.0)?;
        let transform = detection::collider_transform(collider, &self.bodies);
        Some(collider.shape.aabb(transform))
    }

    /// World-space vertices of a polygonal collider; `None` for circles.
    pub fn collider_world_vertices(&self, handle: ColliderHandle) -> Option<Vec<Vec2>> {
        let collider = self.colliders.get(handle.0)?;
        let transform = detection::collider_transform(collider, &self.bodies);
        match &collider.shape {
            crate::shapes::Shape::Polygon(polygon) => Some(polygon.world_vertices(transform)),
            crate::shapes::Shape::Circle(_) => None,
        }
    }

    /// Outward edge normals of a polygonal collider; `None` for circles.
    pub fn collider_normals(&self, handle: ColliderHandle) -> Option<Vec<Vec2>> {
        let collider = self.colliders.get(handle.0)?;
        let transform = detection::collider_transform(collider, &self.bodies);
        match &collider.shape {
            crate::shapes::Shape::Polygon(polygon) => Some(polygon.world_normals(transform)),
            crate::shapes::Shape::Circle(_) => None,
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Manifolds from the most recent step.
    pub fn contacts(&self) -> &[CollisionInfo] {
        &self.contacts
    }

    /// Collision events from the most recent step, for the game layer to
    /// consume.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Advances the simulation by one tick.
    ///
    /// Order matters: forces are applied and integrated first so detection
    /// sees post-integration positions, and resolution sees pre-resolution
    /// velocities so its gravity compensation matches the gravity applied
    /// here. Returns the step's collision events.
    pub fn step(&mut self, dt: f32) -> &[CollisionEvent] {
        if dt <= 0.0 {
            return &self.events;
        }

        // Simulate forces.
        for (_, body) in self.bodies.iter_mut() {
            if body.inv_mass() > 0.0 {
                let gravity_force = self.config.gravity * body.mass();
                body.add_force(gravity_force);
            }
            body.integrate(dt);
        }

        // Check collisions.
        self.contacts = detection::check_for_collisions(&self.colliders, &self.bodies);

        self.events = self
            .contacts
            .iter()
            .map(|info| CollisionEvent {
                collider_a: info.collider_a,
                collider_b: info.collider_b,
                normal: info.normal,
                depth: info.depth,
            })
            .collect();

        // Resolve collisions.
        let pairs: Vec<(ColliderHandle, ColliderHandle)> = self
            .contacts
            .iter()
            .map(|info| (info.collider_a, info.collider_b))
            .collect();
        resolver::resolve_collisions(
            &mut self.bodies,
            &self.colliders,
            &pairs,
            &self.config,
            dt,
        );

        tracing::debug!(
            bodies = self.bodies.len(),
            contacts = self.contacts.len(),
            "step complete"
        );

        &self.events
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
