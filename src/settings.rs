//! Run settings
//!
//! Everything the core consumes is fixed here before the first frame.
//! Persisted as JSON so a render can be reproduced from its settings file.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{LatheError, LatheResult};

/// How brush color evolves from frame to frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorDrift {
    /// Each channel steps by -1, 0 or +1 and wraps modulo 256
    #[default]
    RandomWalk,
    /// Channels ease toward a random target; a new target is picked once
    /// the color is within `threshold` (euclidean, channel units)
    EaseToTarget { rate: f32, threshold: f32 },
}

impl ColorDrift {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorDrift::RandomWalk => "random-walk",
            ColorDrift::EaseToTarget { .. } => "ease-to-target",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random-walk" | "walk" => Some(ColorDrift::RandomWalk),
            "ease-to-target" | "ease" => Some(ColorDrift::EaseToTarget {
                rate: COLOR_EASE_RATE,
                threshold: COLOR_EASE_THRESHOLD,
            }),
            _ => None,
        }
    }
}

/// How an agent is corrected when it steps outside the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionPolicy {
    /// Mirror the heading about the line to the center and snap onto the rim.
    /// The snapped heading points outward, so an agent that reaches the rim
    /// stays on it and crosses to the far side every frame.
    Specular,
    /// Turn toward the center and step `step` pixels inward
    InwardNudge { step: f32 },
}

impl Default for ReflectionPolicy {
    fn default() -> Self {
        ReflectionPolicy::InwardNudge { step: NUDGE_STEP }
    }
}

impl ReflectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReflectionPolicy::Specular => "specular",
            ReflectionPolicy::InwardNudge { .. } => "inward-nudge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "specular" | "reflect" => Some(ReflectionPolicy::Specular),
            "inward-nudge" | "nudge" => Some(ReflectionPolicy::InwardNudge { step: NUDGE_STEP }),
            _ => None,
        }
    }
}

/// Where agents start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Every agent starts at the canvas center
    Center,
    /// Uniformly random pixel inside the canvas (may start outside the arena)
    #[default]
    Uniform,
}

impl SpawnPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::Center => "center",
            SpawnPolicy::Uniform => "uniform",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "center" | "centre" => Some(SpawnPolicy::Center),
            "uniform" | "random" => Some(SpawnPolicy::Uniform),
            _ => None,
        }
    }
}

/// Canvas rotation speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationRate {
    DegreesPerFrame(f32),
    TurnsPerSecond(f32),
}

impl Default for RotationRate {
    fn default() -> Self {
        RotationRate::TurnsPerSecond(1.0 / SECONDS_PER_TURN)
    }
}

/// Inclusive floating point range sampled once per agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.min.is_nan() || self.max.is_nan() || self.min >= self.max {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }
}

/// Per-channel initial color range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            min: [0, 0, 0],
            max: [255, 255, 255],
        }
    }
}

impl ColorRange {
    pub fn is_valid(&self) -> bool {
        self.min.iter().zip(self.max.iter()).all(|(lo, hi)| lo <= hi)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> [f32; 3] {
        let mut color = [0.0; 3];
        for (c, channel) in color.iter_mut().enumerate() {
            let (lo, hi) = (self.min[c].min(self.max[c]), self.min[c].max(self.max[c]));
            *channel = rng.random_range(lo..=hi) as f32;
        }
        color
    }
}

/// Complete render configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducibility
    pub seed: u64,

    // === Output ===
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_seconds: u32,
    /// Canvas rotation speed
    pub rotation: RotationRate,
    /// Canvas background color
    pub background: [u8; 3],

    // === Agents ===
    pub num_agents: u32,
    /// When set, the agent count is drawn per run from `num_agents..=num_agents_max`
    pub num_agents_max: Option<u32>,
    /// Distance travelled per frame (pixels), sampled once per agent
    pub speed: ValueRange,
    /// Brush radius bounds
    pub size: ValueRange,
    /// Radius change per frame, sampled once per agent (sign = initial direction)
    pub size_change_rate: ValueRange,
    pub initial_color: ColorRange,
    /// Maximum heading perturbation per frame (radians)
    pub heading_jitter: f32,
    pub spawn: SpawnPolicy,
    pub color_drift: ColorDrift,

    // === Arena ===
    /// Arena radius; defaults to half the shorter canvas dimension
    pub boundary_radius: Option<f32>,
    pub reflection: ReflectionPolicy,

    /// Frames between progress reports (0 disables)
    pub progress_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            rotation: RotationRate::default(),
            background: BACKGROUND,

            num_agents: 1,
            num_agents_max: None,
            speed: ValueRange::fixed(BRUSH_SPEED),
            size: ValueRange::new(BRUSH_SIZE_MIN, BRUSH_SIZE_MAX),
            size_change_rate: ValueRange::new(-BRUSH_SIZE_RATE, BRUSH_SIZE_RATE),
            initial_color: ColorRange::default(),
            heading_jitter: HEADING_JITTER,
            spawn: SpawnPolicy::default(),
            color_drift: ColorDrift::default(),

            boundary_radius: None,
            reflection: ReflectionPolicy::default(),

            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

impl Settings {
    /// Total frames the run will emit
    pub fn total_frames(&self) -> u64 {
        self.fps as u64 * self.duration_seconds as u64
    }

    /// Arena radius actually used
    pub fn arena_radius(&self) -> f32 {
        self.boundary_radius
            .unwrap_or_else(|| self.width.min(self.height) as f32 / 2.0)
    }

    /// Per-frame canvas rotation in degrees
    pub fn degrees_per_frame(&self) -> f32 {
        match self.rotation {
            RotationRate::DegreesPerFrame(deg) => deg,
            RotationRate::TurnsPerSecond(turns) => {
                if self.fps == 0 {
                    0.0
                } else {
                    360.0 * turns / self.fps as f32
                }
            }
        }
    }

    /// Number of agents for this run, drawn from the run RNG when a range
    /// is configured
    pub fn agent_count<R: Rng>(&self, rng: &mut R) -> u32 {
        match self.num_agents_max {
            Some(max) if max > self.num_agents => rng.random_range(self.num_agents..=max),
            _ => self.num_agents,
        }
    }

    /// Check every constraint the simulation relies on. Fails before any
    /// frame is produced.
    pub fn validate(&self) -> LatheResult<()> {
        if self.num_agents < 1 {
            return Err(LatheError::configuration("at least one agent is required"));
        }
        self.validate_except_agent_count()
    }

    /// Every check of [`Settings::validate`] except the minimum agent count.
    /// Used for runs started from a prepared state, which may hold no agents.
    pub fn validate_except_agent_count(&self) -> LatheResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LatheError::configuration(
                "canvas width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(LatheError::configuration("fps must be non-zero"));
        }
        if self.duration_seconds == 0 {
            return Err(LatheError::configuration("duration must be non-zero"));
        }
        if let Some(max) = self.num_agents_max
            && max < self.num_agents
        {
            return Err(LatheError::configuration(format!(
                "agent count range is inverted: {} ..= {max}",
                self.num_agents
            )));
        }
        let radius = self.arena_radius();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(LatheError::configuration(format!(
                "boundary radius must be positive, got {radius}"
            )));
        }
        if !self.degrees_per_frame().is_finite() {
            return Err(LatheError::configuration("rotation rate must be finite"));
        }
        if !self.heading_jitter.is_finite() || self.heading_jitter < 0.0 {
            return Err(LatheError::configuration(
                "heading jitter must be finite and non-negative",
            ));
        }
        for (name, range) in [
            ("speed", &self.speed),
            ("size", &self.size),
            ("size_change_rate", &self.size_change_rate),
        ] {
            if !range.is_valid() {
                return Err(LatheError::configuration(format!(
                    "{name} range is invalid: {} ..= {}",
                    range.min, range.max
                )));
            }
        }
        if self.speed.min < 0.0 {
            return Err(LatheError::configuration("speed minimum must be >= 0"));
        }
        if self.size.min < 0.0 {
            return Err(LatheError::configuration("size minimum must be >= 0"));
        }
        if !self.initial_color.is_valid() {
            return Err(LatheError::configuration("initial color range is inverted"));
        }
        if let ColorDrift::EaseToTarget { rate, threshold } = self.color_drift
            && (!(rate > 0.0 && rate <= 1.0) || !threshold.is_finite() || threshold < 0.0)
        {
            return Err(LatheError::configuration(
                "ease-to-target needs 0 < rate <= 1 and a non-negative threshold",
            ));
        }
        if let ReflectionPolicy::InwardNudge { step } = self.reflection
            && (!step.is_finite() || step <= 0.0)
        {
            return Err(LatheError::configuration("inward nudge step must be positive"));
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> LatheResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> LatheResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
