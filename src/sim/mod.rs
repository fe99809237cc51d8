//! Deterministic simulation module
//!
//! All brush motion lives here. This module must be pure and deterministic:
//! - One frame per tick
//! - Seeded RNG only
//! - Stable iteration order (by agent ID)
//! - No raster or platform dependencies

pub mod agent;
pub mod arena;
pub mod state;
pub mod tick;

pub use agent::Agent;
pub use arena::{Arena, sd_circle};
pub use state::SimulationState;
pub use tick::tick;
