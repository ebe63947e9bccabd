//! Contact-point generation.
//!
//! Circle manifolds get a single analytic contact. Polygon pairs go through
//! reference/incident edge clipping: the incident edge is clipped against
//! the side planes of the reference edge, and surviving points deeper than
//! the reference face (within tolerance) become the contact set.

use crate::math::Vec2;

/// Points beyond the reference support depth by more than this are not
/// actually penetrating the reference face and are dropped.
const CLIP_DEPTH_TOLERANCE: f32 = 0.01;

/// An edge of a polygon together with its support vertex (the vertex
/// farthest along the query normal).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub v1: Vec2,
    pub v2: Vec2,
    pub max_vertex: Vec2,
}

/// Single contact for a circle-circle manifold: the point on A's boundary
/// toward B.
pub(crate) fn circle_circle_contact(center_a: Vec2, radius_a: f32, normal: Vec2) -> Vec2 {
    center_a + normal * radius_a
}

/// Single contact for a polygon-circle manifold: the point on the circle
/// nearest the reference polygon along the collision normal (which points
/// from the polygon toward the circle).
pub(crate) fn polygon_circle_contact(circle_center: Vec2, radius: f32, normal: Vec2) -> Vec2 {
    circle_center - normal * radius
}

/// Contact points for a polygon-polygon manifold whose normal points from
/// the reference polygon (vertices `ref_verts`) toward the incident one.
///
/// Returns 0, 1, or 2 points; an empty result means clipping degenerated
/// and the caller must fall back to a midpoint contact.
pub(crate) fn polygon_polygon_contacts(
    ref_verts: &[Vec2],
    inc_verts: &[Vec2],
    normal: Vec2,
) -> Vec<Vec2> {
    let reference = find_best_edge(ref_verts, normal);
    let incident = find_best_edge(inc_verts, -normal);

    let ref_tangent = (reference.v2 - reference.v1).normalize();
    if ref_tangent == Vec2::ZERO {
        return Vec::new();
    }

    // Clip the incident edge against the two side planes of the reference
    // edge.
    let ref_start = reference.v1.dot(ref_tangent);
    let ref_end = reference.v2.dot(ref_tangent);

    let clipped = clip_segment_to_line(incident.v1, incident.v2, ref_tangent, ref_start);
    if clipped.len() < 2 {
        return Vec::new();
    }
    let clipped = clip_segment_to_line(clipped[0], clipped[1], -ref_tangent, -ref_end);
    if clipped.len() < 2 {
        return Vec::new();
    }

    // Keep only points at or below the reference face.
    let ref_depth = reference.max_vertex.dot(normal);
    clipped
        .into_iter()
        .filter(|p| p.dot(normal) <= ref_depth + CLIP_DEPTH_TOLERANCE)
        .collect()
}

/// Finds the edge most anti-parallel to `normal`: locate the support vertex
/// farthest along the normal, then pick whichever of its two adjacent edges
/// lies more perpendicular to the normal.
pub(crate) fn find_best_edge(verts: &[Vec2], normal: Vec2) -> Edge {
    let mut best_index = 0;
    let mut max_dot = f32::MIN;
    for (i, v) in verts.iter().enumerate() {
        let dot = v.dot(normal);
        if dot > max_dot {
            max_dot = dot;
            best_index = i;
        }
    }

    let n = verts.len();
    let v = verts[best_index];
    let v_prev = verts[(best_index + n - 1) % n];
    let v_next = verts[(best_index + 1) % n];

    let left_dir = (v - v_prev).normalize();
    let right_dir = (v_next - v).normalize();

    // The better edge is the one more perpendicular to the query normal.
    if right_dir.dot(normal).abs() <= left_dir.dot(normal).abs() {
        Edge {
            v1: v,
            v2: v_next,
            max_vertex: v,
        }
    } else {
        Edge {
            v1: v_prev,
            v2: v,
            max_vertex: v,
        }
    }
}

/// Sutherland-Hodgman clip of a segment against the half-plane
/// `p · normal >= offset`: endpoints on the keep side survive, and the
/// crossing point is synthesized when the segment straddles the plane.
pub(crate) fn clip_segment_to_line(v1: Vec2, v2: Vec2, normal: Vec2, offset: f32) -> Vec<Vec2> {
    let mut output = Vec::with_capacity(2);

    let dist1 = v1.dot(normal) - offset;
    let dist2 = v2.dot(normal) - offset;

    if dist1 >= 0.0 {
        output.push(v1);
    }
    if dist2 >= 0.0 {
        output.push(v2);
    }

    if dist1 * dist2 < 0.0 {
        let t = dist1 / (dist1 - dist2);
        output.push(v1 + (v2 - v1) * t);
    }

    output
}
