//! The client's picture of the arena, rebuilt from each snapshot.

use shared::{AgentView, ArenaState};

#[derive(Debug, Clone, Default)]
pub struct ArenaView {
    pub my_id: Option<String>,
    pub agents: Vec<AgentView>,
    pub updates: u64,
}

impl ArenaView {
    pub fn new(my_id: Option<String>) -> Self {
        Self {
            my_id,
            agents: Vec::new(),
            updates: 0,
        }
    }

    /// Replaces the view with an authoritative snapshot.
    pub fn apply_snapshot(&mut self, agents: Vec<AgentView>) {
        self.agents = agents;
        self.updates += 1;
    }

    pub fn apply_state(&mut self, state: ArenaState) {
        self.apply_snapshot(state.agents);
    }

    pub fn me(&self) -> Option<&AgentView> {
        let my_id = self.my_id.as_deref()?;
        self.agents.iter().find(|agent| agent.id == my_id)
    }

    pub fn opponents(&self) -> impl Iterator<Item = &AgentView> {
        let my_id = self.my_id.clone();
        self.agents
            .iter()
            .filter(move |agent| Some(agent.id.as_str()) != my_id.as_deref())
    }

    /// Closest other agent and its distance, first registered wins ties.
    pub fn nearest_opponent(&self) -> Option<(&AgentView, f64)> {
        let me = self.me()?;
        self.opponents()
            .map(|other| (other, me.pos.distance_to(&other.pos)))
            .fold(None, |best, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            })
    }

    pub fn weakest(&self) -> Option<&AgentView> {
        self.agents.iter().min_by_key(|agent| agent.health)
    }
}
