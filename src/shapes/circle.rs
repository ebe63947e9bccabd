use super::ShapeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Result<Self, ShapeError> {
        if !radius.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        if radius <= 0.0 {
            return Err(ShapeError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    /// Moment of inertia of a solid disc of the given mass: `m·r²/2`.
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        0.5 * mass * self.radius * self.radius
    }
}
