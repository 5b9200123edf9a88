//! Axis-aligned hit regions in normalized image coordinates.
//!
//! Coordinates are fractions of the image size: `(0, 0)` is the top-left
//! corner and `(1, 1)` the bottom-right.

use serde::{Deserialize, Serialize};

/// Closed rectangle `[x_min, x_max] × [y_min, y_max]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Builds a box, rejecting anything that is not finite, lies outside
    /// `[0, 1]`, or has a min edge past its max edge.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, String> {
        let bbox = Self {
            x_min,
            y_min,
            x_max,
            y_max,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> Result<(), String> {
        let edges = [
            ("x_min", self.x_min),
            ("y_min", self.y_min),
            ("x_max", self.x_max),
            ("y_max", self.y_max),
        ];
        for (edge, value) in edges {
            if !value.is_finite() {
                return Err(format!("{edge} is not a finite number"));
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{edge}={value} lies outside [0, 1]"));
            }
        }

        if self.x_min > self.x_max {
            return Err(format!(
                "x_min ({}) is greater than x_max ({})",
                self.x_min, self.x_max
            ));
        }
        if self.y_min > self.y_max {
            return Err(format!(
                "y_min ({}) is greater than y_max ({})",
                self.y_min, self.y_max
            ));
        }

        Ok(())
    }

    /// Inclusive on every edge: a click exactly on the border is a hit.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }
}
