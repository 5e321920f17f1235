//! Axis-aligned bounding boxes and the overlap test used for every
//! player/obstacle contact.
//!
//! Comparisons are strict: boxes that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from a top-left corner and a size
    #[inline]
    pub fn from_rect(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True when both axes overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        axis_overlap(self.min.x, self.max.x, other.min.x, other.max.x)
            && axis_overlap(self.min.y, self.max.y, other.min.y, other.max.y)
    }
}

/// Open-interval overlap on one axis
#[inline]
pub fn axis_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_min < b_max && a_max > b_min
}
