use crate::math::Vec2;

/// An axis-aligned bounding box, recomputed from its owning shape every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Overlap test with strict inequalities: boxes that merely touch do not
    /// intersect.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Smallest box containing all points; `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        let mut min = first;
        let mut max = first;
        for point in &points[1..] {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
        Some(AABB { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlapping() {
        let a = AABB::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = AABB::new(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_aabb_disjoint() {
        let a = AABB::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = AABB::new(Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_aabb_touching_is_not_intersecting() {
        let a = AABB::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = AABB::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_aabb_symmetry() {
        let cases = [
            (
                AABB::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)),
                AABB::new(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0)),
            ),
            (
                AABB::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)),
                AABB::new(Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0)),
            ),
            (
                AABB::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)),
                AABB::new(Vec2::new(0.0, -5.0), Vec2::new(0.5, 5.0)),
            ),
        ];
        for (a, b) in cases {
            assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }

    #[test]
    fn test_aabb_from_points() {
        let points = [
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(4.0, -1.0),
        ];
        let aabb = AABB::from_points(&points).unwrap();
        assert_eq!(aabb.min, Vec2::new(-2.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(4.0, 5.0));
        assert!(AABB::from_points(&[]).is_none());
    }

    #[test]
    fn test_aabb_new_swaps_corners() {
        let aabb = AABB::new(Vec2::new(2.0, 2.0), Vec2::new(0.0, 0.0));
        assert_eq!(aabb.min, Vec2::new(0.0, 0.0));
        assert_eq!(aabb.max, Vec2::new(2.0, 2.0));
    }
}
