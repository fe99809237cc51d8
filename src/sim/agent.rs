//! Brush agents
//!
//! Each agent is an independent brush wandering inside the arena. Its update
//! is a pure function of its own state, the arena, the settings and the
//! shared seeded RNG.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::heading_vector;
use crate::settings::{ColorDrift, Settings, SpawnPolicy, ValueRange};

/// A single brush
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Creation index; draw order follows it
    pub id: u32,
    /// Position in unrotated canvas coordinates
    pub pos: Vec2,
    /// Heading (radians, unbounded)
    pub heading: f32,
    /// Distance travelled per frame
    pub speed: f32,
    /// Color channels in [0, 255]
    pub color: [f32; 3],
    /// Current ease target (ease-to-target drift only)
    #[serde(default)]
    pub target_color: Option<[f32; 3]>,
    /// Brush radius (pixels)
    pub radius: f32,
    /// Radius change per frame; sign flips at the size bounds
    pub radius_velocity: f32,
}

impl Agent {
    /// Create an agent with randomized initial state
    pub fn spawn<R: Rng>(id: u32, settings: &Settings, arena: &Arena, rng: &mut R) -> Self {
        let pos = match settings.spawn {
            SpawnPolicy::Center => arena.center,
            SpawnPolicy::Uniform => Vec2::new(
                rng.random_range(0..settings.width.max(1)) as f32,
                rng.random_range(0..settings.height.max(1)) as f32,
            ),
        };
        let heading = rng.random_range(0.0..TAU);
        let speed = settings.speed.sample(rng);
        let color = settings.initial_color.sample(rng);
        let radius = settings.size.sample(rng);
        let radius_velocity = settings.size_change_rate.sample(rng);

        Self {
            id,
            pos,
            heading,
            speed,
            color,
            target_color: None,
            radius,
            radius_velocity,
        }
    }

    /// Advance one frame: steer, move, bounce off the arena, drift color,
    /// breathe radius.
    pub fn update<R: Rng>(&mut self, arena: &Arena, settings: &Settings, rng: &mut R) {
        if settings.heading_jitter > 0.0 {
            let jitter = settings.heading_jitter;
            self.heading += rng.random_range(-jitter..=jitter);
        }

        let candidate = self.pos + heading_vector(self.heading) * self.speed;
        if arena.contains(candidate) {
            self.pos = candidate;
        } else {
            let (pos, heading) = arena.correct(candidate, self.heading, settings.reflection, rng);
            log::trace!(
                "agent {} left arena at ({:.1}, {:.1}), corrected to ({:.1}, {:.1})",
                self.id,
                candidate.x,
                candidate.y,
                pos.x,
                pos.y
            );
            self.pos = pos;
            self.heading = heading;
        }

        self.drift_color(settings.color_drift, rng);
        self.update_radius(&settings.size);
    }

    /// Color drift step for the configured policy
    pub fn drift_color<R: Rng>(&mut self, drift: ColorDrift, rng: &mut R) {
        match drift {
            ColorDrift::RandomWalk => {
                for channel in &mut self.color {
                    let step = rng.random_range(-1i32..=1) as f32;
                    *channel = (*channel + step).rem_euclid(256.0);
                }
            }
            ColorDrift::EaseToTarget { rate, threshold } => {
                let target = match self.target_color {
                    Some(target) => target,
                    None => random_color(rng),
                };
                let mut dist_sq = 0.0f32;
                for (channel, goal) in self.color.iter_mut().zip(target) {
                    *channel = (*channel + rate * (goal - *channel)).clamp(0.0, 255.0);
                    dist_sq += (goal - *channel) * (goal - *channel);
                }
                self.target_color = if dist_sq.sqrt() < threshold {
                    Some(random_color(rng))
                } else {
                    Some(target)
                };
            }
        }
    }

    /// Elastic bounce of the radius between the size bounds
    pub fn update_radius(&mut self, bounds: &ValueRange) {
        self.radius += self.radius_velocity;
        if self.radius < bounds.min {
            self.radius = bounds.min;
            self.radius_velocity = self.radius_velocity.abs();
        } else if self.radius > bounds.max {
            self.radius = bounds.max;
            self.radius_velocity = -self.radius_velocity.abs();
        }
    }

    /// Color as drawn, rounded to 8-bit channels
    pub fn pixel_color(&self) -> [u8; 3] {
        self.color.map(|c| c.round().clamp(0.0, 255.0) as u8)
    }
}

fn random_color<R: Rng>(rng: &mut R) -> [f32; 3] {
    [
        rng.random_range(0..=255u8) as f32,
        rng.random_range(0..=255u8) as f32,
        rng.random_range(0..=255u8) as f32,
    ]
}
