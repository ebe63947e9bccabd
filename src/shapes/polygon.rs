use super::ShapeError;
use crate::math::{Transform, Vec2};
use serde::{Deserialize, Serialize};

/// A convex polygon defined by its vertices in local space, ordered
/// counter-clockwise. Boxes and triangles are built through the dedicated
/// constructors; arbitrary convex vertex lists go through `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Creates a polygon from local-space vertices.
    ///
    /// Rejects fewer than 3 vertices, non-finite coordinates, and
    /// (near-)zero-area vertex sets; the collision routines rely on every
    /// polygon having usable edges.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices(vertices.len()));
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(ShapeError::NonFinite);
        }
        let polygon = Self { vertices };
        if polygon.area() < 1e-6 {
            return Err(ShapeError::DegenerateArea);
        }
        Ok(polygon)
    }

    /// Axis-aligned box of the given extents, centered on the local origin.
    pub fn rect(width: f32, height: f32) -> Result<Self, ShapeError> {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    pub fn triangle(a: Vec2, b: Vec2, c: Vec2) -> Result<Self, ShapeError> {
        Self::new(vec![a, b, c])
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Area via the shoelace formula.
    pub fn area(&self) -> f32 {
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            area += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        (area / 2.0).abs()
    }

    /// Vertices mapped into world space, winding preserved.
    pub fn world_vertices(&self, transform: Transform) -> Vec<Vec2> {
        self.vertices.iter().map(|&v| transform.apply(v)).collect()
    }

    /// One outward unit normal per edge, in world space. Normals come from
    /// consecutive vertex differences rotated 90 degrees; zero-length edges
    /// are skipped so no degenerate axis reaches the SAT loop.
    pub fn world_normals(&self, transform: Transform) -> Vec<Vec2> {
        let verts = self.world_vertices(transform);
        edge_normals(&verts)
    }

    /// Moment of inertia about the centroid for the given mass.
    ///
    /// Boxes use the rectangle formula `m(w²+h²)/12`; triangles the
    /// `m(w²+h²)/18` approximation over their bounding extents. Extents are
    /// taken from the local-space AABB.
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        let (mut min, mut max) = (self.vertices[0], self.vertices[0]);
        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        let w = max.x - min.x;
        let h = max.y - min.y;
        let divisor = if self.vertices.len() == 3 { 18.0 } else { 12.0 };
        mass * (w * w + h * h) / divisor
    }
}

/// Outward unit normals for a counter-clockwise world-space vertex loop.
pub fn edge_normals(verts: &[Vec2]) -> Vec<Vec2> {
    let n = verts.len();
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let edge = verts[(i + 1) % n] - verts[i];
        if edge.magnitude_squared() < 1e-8 {
            continue;
        }
        normals.push(Vec2::new(edge.y, -edge.x).normalize());
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_polygon_new_too_few_vertices() {
        let result = ConvexPolygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]);
        assert!(matches!(result, Err(ShapeError::TooFewVertices(2))));
    }

    #[test]
    fn test_polygon_new_rejects_non_finite() {
        let result = ConvexPolygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(f32::NAN, 0.0),
            Vec2::new(0.0, 1.0),
        ]);
        assert!(matches!(result, Err(ShapeError::NonFinite)));
    }

    #[test]
    fn test_polygon_new_rejects_collinear() {
        let result = ConvexPolygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
        ]);
        assert!(matches!(result, Err(ShapeError::DegenerateArea)));
    }

    #[test]
    fn test_rect_area() {
        let rect = ConvexPolygon::rect(4.0, 2.0).unwrap();
        assert!((rect.area() - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_triangle_area() {
        let tri = ConvexPolygon::triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((tri.area() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_rect_world_vertices_translated() {
        let rect = ConvexPolygon::rect(2.0, 2.0).unwrap();
        let t = Transform::new(Vec2::new(10.0, 5.0), 0.0);
        let verts = rect.world_vertices(t);
        assert_eq!(verts.len(), 4);
        assert_eq!(verts[0], Vec2::new(9.0, 4.0));
        assert_eq!(verts[2], Vec2::new(11.0, 6.0));
    }

    #[test]
    fn test_rect_normals_axis_aligned() {
        let rect = ConvexPolygon::rect(2.0, 2.0).unwrap();
        let normals = rect.world_normals(Transform::identity());
        assert_eq!(normals.len(), 4);
        // CCW winding from (-1,-1): bottom, right, top, left edges.
        assert!((normals[0] - Vec2::new(0.0, -1.0)).magnitude() < EPSILON);
        assert!((normals[1] - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
        assert!((normals[2] - Vec2::new(0.0, 1.0)).magnitude() < EPSILON);
        assert!((normals[3] - Vec2::new(-1.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_normals_are_outward() {
        let tri = ConvexPolygon::triangle(
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(0.0, 1.0),
        )
        .unwrap();
        let verts = tri.world_vertices(Transform::identity());
        let normals = tri.world_normals(Transform::identity());
        let centroid = (verts[0] + verts[1] + verts[2]) / 3.0;
        for (i, normal) in normals.iter().enumerate() {
            let edge_mid = (verts[i] + verts[(i + 1) % 3]) / 2.0;
            assert!(
                normal.dot(edge_mid - centroid) > 0.0,
                "normal {i} points inward"
            );
        }
    }

    #[test]
    fn test_rect_normals_follow_rotation() {
        let rect = ConvexPolygon::rect(2.0, 2.0).unwrap();
        let t = Transform::new(Vec2::ZERO, std::f32::consts::PI / 2.0);
        let normals = rect.world_normals(t);
        // Bottom edge normal (0,-1) rotates to (1,0).
        assert!((normals[0] - Vec2::new(1.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_box_inertia() {
        let rect = ConvexPolygon::rect(4.0, 2.0).unwrap();
        // I = m(w² + h²)/12 = 6 * 20 / 12 = 10
        assert!((rect.moment_of_inertia(6.0) - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_triangle_inertia_uses_extents() {
        let tri = ConvexPolygon::triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(0.0, 3.0),
        )
        .unwrap();
        // AABB extents 3x3: I = m(9 + 9)/18 = m
        assert!((tri.moment_of_inertia(5.0) - 5.0).abs() < EPSILON);
    }
}
