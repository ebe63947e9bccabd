pub mod circle;
pub mod polygon;

pub use circle::Circle;
pub use polygon::ConvexPolygon;

use crate::collision::AABB;
use crate::math::{Transform, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected shape parameters. Shapes are validated once at construction so
/// the collision routines can assume usable geometry.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("shape coordinates must be finite")]
    NonFinite,
    #[error("polygon vertices enclose (near-)zero area")]
    DegenerateArea,
    #[error("circle radius must be positive, got {0}")]
    InvalidRadius(f32),
}

/// Geometric form of a collider. A closed set of variants: the narrow phase
/// dispatches exhaustively over pairs of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Polygon(ConvexPolygon),
}

impl Shape {
    pub fn circle(radius: f32) -> Result<Self, ShapeError> {
        Ok(Shape::Circle(Circle::new(radius)?))
    }

    pub fn rect(width: f32, height: f32) -> Result<Self, ShapeError> {
        Ok(Shape::Polygon(ConvexPolygon::rect(width, height)?))
    }

    pub fn triangle(a: Vec2, b: Vec2, c: Vec2) -> Result<Self, ShapeError> {
        Ok(Shape::Polygon(ConvexPolygon::triangle(a, b, c)?))
    }

    /// World-space axis-aligned bounds under the given transform.
    pub fn aabb(&self, transform: Transform) -> AABB {
        match self {
            Shape::Circle(circle) => {
                let r = Vec2::new(circle.radius, circle.radius);
                AABB::new(transform.position - r, transform.position + r)
            }
            Shape::Polygon(polygon) => AABB::from_points(&polygon.world_vertices(transform))
                .unwrap_or(AABB::new(transform.position, transform.position)),
        }
    }

    /// Moment of inertia about the shape's center for the given mass.
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        match self {
            Shape::Circle(circle) => circle.moment_of_inertia(mass),
            Shape::Polygon(polygon) => polygon.moment_of_inertia(mass),
        }
    }
}
