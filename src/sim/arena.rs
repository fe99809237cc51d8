//! Circular arena boundary
//!
//! Agents live inside a fixed circle centered on the canvas. When a step
//! would leave the circle, the configured [`ReflectionPolicy`] produces a
//! corrected position and heading.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::ReflectionPolicy;
use crate::{heading_vector, polar_to_cartesian};

/// Signed distance to a circle (negative inside)
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Fixed circular boundary, shared read-only by all agents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub center: Vec2,
    pub radius: f32,
}

impl Arena {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Arena centered on a canvas. The center uses integer halving so it
    /// lands on the same pixel the rotation pivots around.
    pub fn for_canvas(width: u32, height: u32, radius: f32) -> Self {
        Self::new(Vec2::new((width / 2) as f32, (height / 2) as f32), radius)
    }

    #[inline]
    pub fn distance(&self, p: Vec2) -> f32 {
        (p - self.center).length()
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        sd_circle(p, self.center, self.radius) <= 0.0
    }

    /// Heading from `p` toward the center.
    ///
    /// At the exact center the direction is undefined; a random heading is
    /// drawn instead so nothing downstream sees a meaningless angle.
    pub fn heading_to_center<R: Rng>(&self, p: Vec2, rng: &mut R) -> f32 {
        let to_center = self.center - p;
        if to_center.length_squared() == 0.0 {
            let heading = rng.random_range(0.0..TAU);
            log::debug!("agent at arena center, falling back to heading {heading:.3}");
            heading
        } else {
            to_center.y.atan2(to_center.x)
        }
    }

    /// Correct an out-of-bounds position. Returns the new `(position, heading)`.
    pub fn correct<R: Rng>(
        &self,
        pos: Vec2,
        heading: f32,
        policy: ReflectionPolicy,
        rng: &mut R,
    ) -> (Vec2, f32) {
        let angle_to_center = self.heading_to_center(pos, rng);
        match policy {
            ReflectionPolicy::Specular => {
                let new_heading = 2.0 * angle_to_center - heading + PI;
                let new_pos = self.center + polar_to_cartesian(self.radius, new_heading);
                (new_pos, new_heading)
            }
            ReflectionPolicy::InwardNudge { step } => {
                let new_pos = pos + heading_vector(angle_to_center) * step;
                (new_pos, angle_to_center)
            }
        }
    }
}
