//! Roto Lathe - a rotating-canvas generative art renderer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (brush agents, arena boundary, seeded RNG)
//! - `raster`: CPU raster canvas, rigid rotation warp, disc rasterization
//! - `compositor`: Rotate / draw / un-rotate cycle over the persistent canvas
//! - `driver`: Lazy frame stream tying simulation and compositing together
//! - `settings`: Data-driven run configuration

pub mod compositor;
pub mod driver;
pub mod error;
pub mod export;
pub mod progress;
pub mod raster;
pub mod settings;
pub mod sim;

pub use compositor::Compositor;
pub use driver::{Frame, FrameDriver, run};
pub use error::{LatheError, LatheResult};
pub use progress::{LogProgress, Progress, ProgressObserver};
pub use settings::{ColorDrift, ReflectionPolicy, RotationRate, Settings, SpawnPolicy};

use glam::Vec2;

/// Default run configuration constants
pub mod consts {
    /// Output resolution
    pub const DEFAULT_WIDTH: u32 = 1920;
    pub const DEFAULT_HEIGHT: u32 = 1080;
    pub const DEFAULT_FPS: u32 = 60;
    pub const DEFAULT_DURATION_SECONDS: u32 = 60;

    /// One full canvas turn every five seconds of output
    pub const SECONDS_PER_TURN: f32 = 5.0;

    /// Maximum random heading change per frame (radians)
    pub const HEADING_JITTER: f32 = 0.1;

    /// Brush defaults
    pub const BRUSH_SPEED: f32 = 1.0;
    pub const BRUSH_SIZE_MIN: f32 = 1.0;
    pub const BRUSH_SIZE_MAX: f32 = 20.0;
    pub const BRUSH_SIZE_RATE: f32 = 0.5;

    /// Ease-toward-target color drift defaults
    pub const COLOR_EASE_RATE: f32 = 0.01;
    pub const COLOR_EASE_THRESHOLD: f32 = 5.0;

    /// Inward-nudge reflection step (pixels)
    pub const NUDGE_STEP: f32 = 3.0;

    /// Canvas background (white)
    pub const BACKGROUND: [u8; 3] = [255, 255, 255];

    /// Frames between progress reports
    pub const PROGRESS_INTERVAL: u32 = 60;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit direction for a heading angle
#[inline]
pub fn heading_vector(theta: f32) -> Vec2 {
    polar_to_cartesian(1.0, theta)
}

/// Degrees to radians, computed in f64 so large frame angles keep precision
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}
