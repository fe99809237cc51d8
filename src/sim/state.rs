//! Simulation state
//!
//! Everything that evolves between frames on the simulation side lives here:
//! the seeded RNG, the agent list and the frame counter. The canvas is owned
//! separately by the compositor.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::agent::Agent;
use super::arena::Arena;
use crate::settings::Settings;

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The only source of randomness in the run
    pub rng: Pcg32,
    /// Arena constants
    pub arena: Arena,
    /// Agents (sorted by id for determinism)
    pub agents: Vec<Agent>,
    /// Number of ticks applied so far
    pub frame_index: u64,
    /// Next agent ID
    next_id: u32,
}

impl SimulationState {
    /// Empty state with no agents
    pub fn empty(settings: &Settings) -> Self {
        Self {
            seed: settings.seed,
            rng: Pcg32::seed_from_u64(settings.seed),
            arena: Arena::for_canvas(settings.width, settings.height, settings.arena_radius()),
            agents: Vec::new(),
            frame_index: 0,
            next_id: 0,
        }
    }

    /// Create a state and spawn the run's agents. With `num_agents_max` set
    /// the count is the first draw from the run RNG.
    pub fn new(settings: &Settings) -> Self {
        let mut state = Self::empty(settings);
        let count = settings.agent_count(&mut state.rng);
        for _ in 0..count {
            state.spawn_agent(settings);
        }
        log::debug!(
            "spawned {} agents in arena r={:.1} at ({:.1}, {:.1})",
            state.agents.len(),
            state.arena.radius,
            state.arena.center.x,
            state.arena.center.y
        );
        state
    }

    /// Allocate a new agent ID
    pub fn next_agent_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one randomized agent and return its id
    pub fn spawn_agent(&mut self, settings: &Settings) -> u32 {
        let id = self.next_agent_id();
        let agent = Agent::spawn(id, settings, &self.arena, &mut self.rng);
        self.agents.push(agent);
        id
    }

    /// Ensure agents are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.agents.sort_by_key(|a| a.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spawns_agents_in_id_order() {
        let settings = Settings {
            num_agents: 5,
            ..Default::default()
        };
        let state = SimulationState::new(&settings);
        assert_eq!(state.agents.len(), 5);
        let ids: Vec<u32> = state.agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(state.frame_index, 0);
    }

    #[test]
    fn test_same_seed_same_agents() {
        let settings = Settings {
            seed: 42,
            num_agents: 3,
            ..Default::default()
        };
        let a = SimulationState::new(&settings);
        let b = SimulationState::new(&settings);
        assert_eq!(a.agents, b.agents);

        let c = SimulationState::new(&Settings { seed: 43, ..settings });
        assert_ne!(a.agents, c.agents);
    }

    #[test]
    fn test_agent_count_drawn_per_seed() {
        let settings = Settings {
            num_agents: 5,
            num_agents_max: Some(15),
            ..Default::default()
        };
        let counts: Vec<usize> = (0..20)
            .map(|seed| SimulationState::new(&Settings { seed, ..settings.clone() }).agents.len())
            .collect();
        assert!(counts.iter().all(|n| (5..=15).contains(n)));
        assert!(counts.iter().any(|&n| n != counts[0]));

        let again = SimulationState::new(&Settings { seed: 3, ..settings });
        assert_eq!(again.agents.len(), counts[3]);
        let ids: Vec<u32> = again.agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, (0..counts[3] as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_unvalidated_inverted_ranges_still_spawn() {
        let settings = Settings {
            num_agents: 3,
            initial_color: crate::settings::ColorRange {
                min: [255, 255, 255],
                max: [0, 0, 0],
            },
            size: crate::settings::ValueRange::new(20.0, 1.0),
            ..Default::default()
        };
        let state = SimulationState::new(&settings);
        assert_eq!(state.agents.len(), 3);
        assert!(state.agents.iter().all(|a| a.radius == 20.0));
    }

    #[test]
    fn test_normalize_order() {
        let settings = Settings {
            num_agents: 3,
            ..Default::default()
        };
        let mut state = SimulationState::new(&settings);
        state.agents.reverse();
        state.normalize_order();
        assert_eq!(state.agents[0].id, 0);
        assert_eq!(state.agents[2].id, 2);
    }
}
