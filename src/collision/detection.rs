//! Broad- and narrow-phase collision detection.
//!
//! The broad phase is a naive O(n²) sweep over all collider pairs gated by
//! an AABB overlap test. Pairs that survive go through SAT narrow phase,
//! dispatched over the shape-kind combination.

use super::contact;
use super::manifold::CollisionInfo;
use crate::math::{Transform, Vec2};
use crate::objects::{Collider, RigidBody};
use crate::shapes::{polygon, Circle, ConvexPolygon, Shape};
use crate::world::store::{Arena, ColliderHandle};

/// Resolves where a collider currently sits: on its body when it has a live
/// one, otherwise at its own static placement.
pub(crate) fn collider_transform(collider: &Collider, bodies: &Arena<RigidBody>) -> Transform {
    collider
        .body()
        .and_then(|handle| bodies.get(handle.0))
        .map(|body| Transform::new(body.position, body.rotation))
        .unwrap_or_else(|| collider.static_transform())
}

/// Runs the full detection pipeline over every live collider pair and
/// returns the step's manifolds, contact points included, in discovery
/// order.
pub(crate) fn check_for_collisions(
    colliders: &Arena<Collider>,
    bodies: &Arena<RigidBody>,
) -> Vec<CollisionInfo> {
    struct View<'a> {
        handle: ColliderHandle,
        collider: &'a Collider,
        transform: Transform,
        has_body: bool,
    }

    let views: Vec<View> = colliders
        .iter()
        .map(|(handle, collider)| View {
            handle: ColliderHandle(handle),
            collider,
            transform: collider_transform(collider, bodies),
            has_body: collider
                .body()
                .is_some_and(|handle| bodies.contains(handle.0)),
        })
        .collect();

    let mut collisions = Vec::new();

    for i in 0..views.len() {
        for j in (i + 1)..views.len() {
            let a = &views[i];
            let b = &views[j];

            // Static terrain never needs to resolve against itself.
            if !a.has_body && !b.has_body {
                continue;
            }

            let aabb_a = a.collider.shape.aabb(a.transform);
            let aabb_b = b.collider.shape.aabb(b.transform);
            if !aabb_a.intersects(&aabb_b) {
                continue;
            }

            if let Some(mut info) =
                narrow_phase(a.handle, a.collider, a.transform, b.handle, b.collider, b.transform)
            {
                info.contacts = generate_contacts(&info, colliders, bodies);
                collisions.push(info);
            }
        }
    }

    tracing::trace!(
        colliders = views.len(),
        collisions = collisions.len(),
        "narrow phase done"
    );

    collisions
}

/// SAT dispatch over the shape pair. Mixed circle/polygon pairs are
/// reordered so the polygon is always manifold side A.
pub(crate) fn narrow_phase(
    handle_a: ColliderHandle,
    collider_a: &Collider,
    transform_a: Transform,
    handle_b: ColliderHandle,
    collider_b: &Collider,
    transform_b: Transform,
) -> Option<CollisionInfo> {
    match (&collider_a.shape, &collider_b.shape) {
        (Shape::Circle(circle_a), Shape::Circle(circle_b)) => {
            circle_circle(handle_a, circle_a, transform_a, handle_b, circle_b, transform_b)
        }
        (Shape::Circle(circle), Shape::Polygon(polygon)) => {
            circle_polygon(handle_b, polygon, transform_b, handle_a, circle, transform_a)
        }
        (Shape::Polygon(polygon), Shape::Circle(circle)) => {
            circle_polygon(handle_a, polygon, transform_a, handle_b, circle, transform_b)
        }
        (Shape::Polygon(polygon_a), Shape::Polygon(polygon_b)) => polygon_polygon(
            handle_a, polygon_a, transform_a, handle_b, polygon_b, transform_b,
        ),
    }
}

/// Regenerates contact points for a manifold from the current transforms.
pub(crate) fn generate_contacts(
    info: &CollisionInfo,
    colliders: &Arena<Collider>,
    bodies: &Arena<RigidBody>,
) -> Vec<Vec2> {
    let (Some(collider_a), Some(collider_b)) = (
        colliders.get(info.collider_a.0),
        colliders.get(info.collider_b.0),
    ) else {
        return Vec::new();
    };
    let transform_a = collider_transform(collider_a, bodies);
    let transform_b = collider_transform(collider_b, bodies);

    match (&collider_a.shape, &collider_b.shape) {
        (Shape::Circle(circle), _) => vec![contact::circle_circle_contact(
            transform_a.position,
            circle.radius,
            info.normal,
        )],
        (Shape::Polygon(_), Shape::Circle(circle)) => vec![contact::polygon_circle_contact(
            transform_b.position,
            circle.radius,
            info.normal,
        )],
        (Shape::Polygon(polygon_a), Shape::Polygon(polygon_b)) => {
            contact::polygon_polygon_contacts(
                &polygon_a.world_vertices(transform_a),
                &polygon_b.world_vertices(transform_b),
                info.normal,
            )
        }
    }
}

fn circle_circle(
    handle_a: ColliderHandle,
    circle_a: &Circle,
    transform_a: Transform,
    handle_b: ColliderHandle,
    circle_b: &Circle,
    transform_b: Transform,
) -> Option<CollisionInfo> {
    let delta = transform_b.position - transform_a.position;
    let dist_sq = delta.magnitude_squared();
    let radius_sum = circle_a.radius + circle_b.radius;

    if dist_sq > radius_sum * radius_sum {
        return None;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance < 1e-6 {
        // Coincident centers: no meaningful direction, push along +Y.
        Vec2::UP
    } else {
        delta / distance
    };

    Some(CollisionInfo {
        collider_a: handle_a,
        collider_b: handle_b,
        normal,
        depth: radius_sum - distance,
        contacts: Vec::new(),
    })
}

/// Circle vs polygon SAT. Candidate axes are the polygon's edge normals
/// plus the axis from the polygon's closest vertex to the circle center
/// (which covers the circle-against-corner case). The manifold is stored
/// polygon-as-A with the normal pointing toward the circle.
fn circle_polygon(
    polygon_handle: ColliderHandle,
    polygon: &ConvexPolygon,
    polygon_transform: Transform,
    circle_handle: ColliderHandle,
    circle: &Circle,
    circle_transform: Transform,
) -> Option<CollisionInfo> {
    let verts = polygon.world_vertices(polygon_transform);
    let center = circle_transform.position;

    let mut axes = polygon::edge_normals(&verts);

    let mut closest = verts[0];
    let mut closest_dist_sq = f32::MAX;
    for &v in &verts {
        let dist_sq = v.distance_squared(center);
        if dist_sq < closest_dist_sq {
            closest_dist_sq = dist_sq;
            closest = v;
        }
    }
    let vertex_axis = center - closest;
    if vertex_axis.magnitude_squared() >= 1e-8 {
        axes.push(vertex_axis.normalize());
    }

    let mut min_overlap = f32::MAX;
    let mut min_axis = Vec2::ZERO;

    for axis in axes {
        let (poly_min, poly_max) = project_vertices(&verts, axis);
        let center_proj = center.dot(axis);
        let circle_min = center_proj - circle.radius;
        let circle_max = center_proj + circle.radius;

        if circle_max < poly_min || poly_max < circle_min {
            return None;
        }

        let overlap = circle_max.min(poly_max) - circle_min.max(poly_min);
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = axis;
        }
    }

    // Point the normal from the polygon toward the circle.
    let center_diff = center - polygon_transform.position;
    let normal = if min_axis.dot(center_diff) < 0.0 {
        -min_axis
    } else {
        min_axis
    };

    Some(CollisionInfo {
        collider_a: polygon_handle,
        collider_b: circle_handle,
        normal,
        depth: min_overlap,
        contacts: Vec::new(),
    })
}

/// Polygon vs polygon SAT over the union of both edge-normal sets, A's
/// edges first. The polygon contributing the winning axis becomes the
/// manifold's reference side A; ties keep the earliest axis.
fn polygon_polygon(
    handle_a: ColliderHandle,
    polygon_a: &ConvexPolygon,
    transform_a: Transform,
    handle_b: ColliderHandle,
    polygon_b: &ConvexPolygon,
    transform_b: Transform,
) -> Option<CollisionInfo> {
    let verts_a = polygon_a.world_vertices(transform_a);
    let verts_b = polygon_b.world_vertices(transform_b);
    let normals_a = polygon::edge_normals(&verts_a);
    let normals_b = polygon::edge_normals(&verts_b);

    let mut min_overlap = f32::MAX;
    let mut min_axis = Vec2::ZERO;
    let mut reference_is_a = true;

    let axes = normals_a
        .iter()
        .map(|&axis| (true, axis))
        .chain(normals_b.iter().map(|&axis| (false, axis)));

    for (from_a, axis) in axes {
        let (a_min, a_max) = project_vertices(&verts_a, axis);
        let (b_min, b_max) = project_vertices(&verts_b, axis);

        if a_max < b_min || b_max < a_min {
            return None;
        }

        let overlap = a_max.min(b_max) - a_min.max(b_min);
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = axis;
            reference_is_a = from_a;
        }
    }

    let (ref_handle, inc_handle, ref_center, inc_center) = if reference_is_a {
        (handle_a, handle_b, transform_a.position, transform_b.position)
    } else {
        (handle_b, handle_a, transform_b.position, transform_a.position)
    };

    let normal = if min_axis.dot(inc_center - ref_center) < 0.0 {
        -min_axis
    } else {
        min_axis
    };

    Some(CollisionInfo {
        collider_a: ref_handle,
        collider_b: inc_handle,
        normal,
        depth: min_overlap,
        contacts: Vec::new(),
    })
}

fn project_vertices(verts: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for v in verts {
        let projection = v.dot(axis);
        min = min.min(projection);
        max = max.max(projection);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{BodyConfig, ColliderConfig};
    use crate::world::store::BodyHandle;
    const EPSILON: f32 = 1e-4;

    struct Fixture {
        colliders: Arena<Collider>,
        bodies: Arena<RigidBody>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                colliders: Arena::new(),
                bodies: Arena::new(),
            }
        }

        fn add(&mut self, shape: Shape, position: Vec2, with_body: bool) -> ColliderHandle {
            let body = if with_body {
                Some(BodyHandle(self.bodies.insert(RigidBody::new(BodyConfig {
                    position,
                    ..BodyConfig::default()
                }))))
            } else {
                None
            };
            let mut config = ColliderConfig::new(shape);
            if body.is_none() {
                config.position = position;
            }
            ColliderHandle(self.colliders.insert(Collider::new(config, body)))
        }

        fn check(&self) -> Vec<CollisionInfo> {
            check_for_collisions(&self.colliders, &self.bodies)
        }
    }

    #[test]
    fn test_circle_circle_exact_depth_and_normal() {
        let mut fixture = Fixture::new();
        let a = fixture.add(Shape::circle(5.0).unwrap(), Vec2::new(0.0, 0.0), true);
        let b = fixture.add(Shape::circle(5.0).unwrap(), Vec2::new(8.0, 0.0), true);

        let collisions = fixture.check();
        assert_eq!(collisions.len(), 1);
        let info = &collisions[0];
        assert_eq!(info.collider_a, a);
        assert_eq!(info.collider_b, b);
        assert!((info.depth - 2.0).abs() < EPSILON);
        assert!((info.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        // Single contact on A's boundary toward B.
        assert_eq!(info.contacts.len(), 1);
        assert!((info.contacts[0] - Vec2::new(5.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_circle_circle_separated() {
        let mut fixture = Fixture::new();
        fixture.add(Shape::circle(5.0).unwrap(), Vec2::new(0.0, 0.0), true);
        fixture.add(Shape::circle(5.0).unwrap(), Vec2::new(10.5, 0.0), true);
        assert!(fixture.check().is_empty());
    }

    #[test]
    fn test_circle_circle_coincident_centers_fallback_normal() {
        let mut fixture = Fixture::new();
        fixture.add(Shape::circle(2.0).unwrap(), Vec2::new(0.0, 0.0), true);
        fixture.add(Shape::circle(1.0).unwrap(), Vec2::new(0.0, 0.0), true);

        let collisions = fixture.check();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].normal, Vec2::UP);
        assert!((collisions[0].depth - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_box_circle_separated() {
        let mut fixture = Fixture::new();
        fixture.add(Shape::rect(100.0, 100.0).unwrap(), Vec2::new(0.0, 0.0), false);
        fixture.add(Shape::circle(10.0).unwrap(), Vec2::new(200.0, 0.0), true);
        assert!(fixture.check().is_empty());
    }

    #[test]
    fn test_box_circle_overlapping() {
        let mut fixture = Fixture::new();
        let box_handle =
            fixture.add(Shape::rect(100.0, 100.0).unwrap(), Vec2::new(0.0, 0.0), false);
        let circle_handle = fixture.add(Shape::circle(10.0).unwrap(), Vec2::new(54.0, 0.0), true);

        let collisions = fixture.check();
        assert_eq!(collisions.len(), 1);
        let info = &collisions[0];
        // The polygon is the manifold's reference side.
        assert_eq!(info.collider_a, box_handle);
        assert_eq!(info.collider_b, circle_handle);
        // Half extent 50 + radius 10 - distance 54.
        assert!((info.depth - 6.0).abs() < 1e-3);
        assert!((info.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        // Contact on the circle, pushed back along the normal.
        assert_eq!(info.contacts.len(), 1);
        assert!((info.contacts[0] - Vec2::new(44.0, 0.0)).magnitude() < 1e-3);
    }

    #[test]
    fn test_circle_against_box_corner() {
        let mut fixture = Fixture::new();
        fixture.add(Shape::rect(2.0, 2.0).unwrap(), Vec2::new(0.0, 0.0), false);
        // Circle overlapping the (1,1) corner along the diagonal.
        let diagonal = Vec2::new(1.0, 1.0).normalize();
        let center = Vec2::new(1.0, 1.0) + diagonal * 0.4;
        fixture.add(Shape::circle(0.5).unwrap(), center, true);

        let collisions = fixture.check();
        assert_eq!(collisions.len(), 1);
        let info = &collisions[0];
        // The corner axis wins: normal along the diagonal, depth 0.1.
        assert!((info.normal - diagonal).magnitude() < 1e-3);
        assert!((info.depth - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_polygon_polygon_reference_and_contacts() {
        let mut fixture = Fixture::new();
        let a = fixture.add(Shape::rect(2.0, 2.0).unwrap(), Vec2::new(0.0, 0.0), true);
        let b = fixture.add(Shape::rect(2.0, 2.0).unwrap(), Vec2::new(1.5, 0.0), false);

        let collisions = fixture.check();
        assert_eq!(collisions.len(), 1);
        let info = &collisions[0];
        assert_eq!(info.collider_a, a);
        assert_eq!(info.collider_b, b);
        assert!((info.depth - 0.5).abs() < EPSILON);
        assert!((info.normal - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        // Two contact points on the overlapping faces.
        assert_eq!(info.contacts.len(), 2);
        for p in &info.contacts {
            assert!((p.x - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_triangle_box_collision() {
        let mut fixture = Fixture::new();
        fixture.add(Shape::rect(4.0, 1.0).unwrap(), Vec2::new(0.0, 0.0), false);
        let triangle = Shape::triangle(
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(0.0, 1.0),
        )
        .unwrap();
        fixture.add(triangle, Vec2::new(0.0, 1.2), true);

        let collisions = fixture.check();
        assert_eq!(collisions.len(), 1);
        assert!(collisions[0].depth > 0.0);
    }

    #[test]
    fn test_static_pair_skipped_in_broad_phase() {
        let mut fixture = Fixture::new();
        fixture.add(Shape::circle(5.0).unwrap(), Vec2::new(0.0, 0.0), false);
        fixture.add(Shape::circle(5.0).unwrap(), Vec2::new(3.0, 0.0), false);
        assert!(fixture.check().is_empty());
    }

    #[test]
    fn test_touching_aabbs_filtered() {
        let mut fixture = Fixture::new();
        fixture.add(Shape::rect(2.0, 2.0).unwrap(), Vec2::new(0.0, 0.0), true);
        fixture.add(Shape::rect(2.0, 2.0).unwrap(), Vec2::new(2.0, 0.0), true);
        // Exactly touching faces: strict AABB test discards the pair.
        assert!(fixture.check().is_empty());
    }

    #[test]
    fn test_collider_transform_follows_body() {
        let mut fixture = Fixture::new();
        let handle = fixture.add(Shape::circle(1.0).unwrap(), Vec2::new(3.0, 4.0), true);
        let collider = fixture.colliders.get(handle.0).unwrap();
        let t = collider_transform(collider, &fixture.bodies);
        assert_eq!(t.position, Vec2::new(3.0, 4.0));

        // Removing the body degrades the collider to its static placement.
        let body = collider.body().unwrap();
        fixture.bodies.remove(body.0);
        let collider = fixture.colliders.get(handle.0).unwrap();
        let t = collider_transform(collider, &fixture.bodies);
        assert_eq!(t.position, Vec2::ZERO);
    }
}
