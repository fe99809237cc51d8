//! Per-frame simulation step
//!
//! Advances every agent once. Agents never read each other's state, but they
//! share the run RNG, so updates run sequentially in ID order to keep the
//! random stream (and therefore the output) reproducible.

use super::state::SimulationState;
use crate::settings::Settings;

/// Advance the simulation by one frame
pub fn tick(state: &mut SimulationState, settings: &Settings) {
    state.normalize_order();

    let arena = state.arena;
    for agent in &mut state.agents {
        agent.update(&arena, settings, &mut state.rng);
    }

    state.frame_index += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ColorDrift, ReflectionPolicy, SpawnPolicy};
    use glam::Vec2;

    fn settings() -> Settings {
        Settings {
            seed: 99999,
            width: 100,
            height: 100,
            fps: 10,
            duration_seconds: 1,
            num_agents: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_counts_frames() {
        let settings = settings();
        let mut state = SimulationState::new(&settings);
        for _ in 0..7 {
            tick(&mut state, &settings);
        }
        assert_eq!(state.frame_index, 7);
        assert_eq!(state.agents.len(), 4);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let settings = settings();
        let mut state1 = SimulationState::new(&settings);
        let mut state2 = SimulationState::new(&settings);

        for _ in 0..200 {
            tick(&mut state1, &settings);
            tick(&mut state2, &settings);
        }

        assert_eq!(state1.frame_index, state2.frame_index);
        assert_eq!(state1.agents, state2.agents);
    }

    #[test]
    fn test_agents_stay_in_arena() {
        for reflection in [
            ReflectionPolicy::Specular,
            ReflectionPolicy::InwardNudge { step: 3.0 },
        ] {
            let settings = Settings {
                reflection,
                color_drift: ColorDrift::from_str("ease").unwrap(),
                ..settings()
            };
            let mut state = SimulationState::new(&settings);
            // Let uniform spawns outside the circle converge first
            for _ in 0..30 {
                tick(&mut state, &settings);
            }
            for _ in 0..500 {
                tick(&mut state, &settings);
                for agent in &state.agents {
                    assert!(state.arena.distance(agent.pos) <= state.arena.radius + 4.0);
                    assert!(settings.size.contains(agent.radius));
                }
            }
        }
    }

    #[test]
    fn test_center_scenario_single_agent() {
        let settings = Settings {
            num_agents: 1,
            spawn: SpawnPolicy::Center,
            ..settings()
        };
        let mut state = SimulationState::new(&settings);
        state.agents[0].radius = 5.0;
        assert_eq!(state.agents[0].pos, Vec2::new(50.0, 50.0));
        for _ in 0..settings.total_frames() {
            tick(&mut state, &settings);
            assert!(state.arena.distance(state.agents[0].pos) <= 50.0 + 1e-3);
        }
    }

    /// Frames with the agent on the rim and frames with a jump of more than
    /// ten pixels, over a 400-frame run from the center
    fn rim_stats(settings: &Settings) -> (usize, usize, Vec<f32>) {
        let mut state = SimulationState::new(settings);
        let mut rim = 0;
        let mut jumps = 0;
        let mut distances = Vec::new();
        for _ in 0..400 {
            let before = state.agents[0].pos;
            tick(&mut state, settings);
            let pos = state.agents[0].pos;
            let d = state.arena.distance(pos);
            if d > state.arena.radius - 0.5 {
                rim += 1;
            }
            if (pos - before).length() > 10.0 {
                jumps += 1;
            }
            distances.push(d);
        }
        (rim, jumps, distances)
    }

    #[test]
    fn test_default_reflection_keeps_agents_wandering() {
        let settings = Settings {
            num_agents: 1,
            spawn: SpawnPolicy::Center,
            ..settings()
        };
        assert_eq!(settings.reflection, ReflectionPolicy::InwardNudge { step: 3.0 });
        let (rim, jumps, distances) = rim_stats(&settings);
        assert_eq!(jumps, 0);
        assert!(rim < 100, "agent sat on the rim for {rim} of 400 frames");
        // Reached the rim at least once and came back inside afterwards
        let first_hit = distances.iter().position(|&d| d > 47.0).unwrap();
        assert!(distances[first_hit..].iter().any(|&d| d < 40.0));
    }

    #[test]
    fn test_specular_reflection_locks_onto_rim() {
        let settings = Settings {
            num_agents: 1,
            spawn: SpawnPolicy::Center,
            reflection: ReflectionPolicy::Specular,
            ..settings()
        };
        let (rim, _, distances) = rim_stats(&settings);
        let first_hit = distances.iter().position(|&d| d > 50.0 - 1e-3).unwrap();
        // Every frame from the first contact on is a rim frame
        assert!(rim >= 400 - first_hit);
        assert!(first_hit < 200);
        assert!(distances[first_hit..].iter().all(|&d| (d - 50.0).abs() < 1e-3));
    }
}
