//! Agent registry: the set of live combatants and their simulated state.
//!
//! Agents are kept in registration order. That order is the contract for
//! snapshot listing and for tick processing, so two ticks over the same
//! state always resolve intents in the same sequence. Agents are never
//! removed; the registry grows for the lifetime of the process.

use crate::utils::{generate_color, random_suffix};
use log::info;
use rand::Rng;
use shared::{
    visible_health, AgentView, Position, DEFAULT_NAME, DEFAULT_PERSONALITY, MAX_HEALTH,
    SPAWN_EXTENT,
};
use std::collections::HashMap;
use std::fmt;

const ID_SUFFIX_LEN: usize = 6;

/// Opaque agent identifier, unique for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(String);

impl AgentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AgentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A simulated combatant
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub personality: String,
    /// Domain value; may dip to zero or below inside a tick before respawn.
    pub health: i32,
    pub pos: Position,
    /// Assigned once at creation
    pub color: String,
}

impl Agent {
    pub fn view(&self) -> AgentView {
        AgentView {
            id: self.id.to_string(),
            name: self.name.clone(),
            health: visible_health(self.health),
            pos: self.pos,
            color: self.color.clone(),
        }
    }
}

/// Ordered store of every agent ever registered.
#[derive(Debug)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
    index: HashMap<AgentId, usize>,
    next_seq: u64,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            index: HashMap::new(),
            next_seq: 1,
        }
    }

    /// Registers a new agent with full health, a random spawn point inside
    /// the arena and a random color.
    ///
    /// Empty names and personalities fall back to the defaults. The id is a
    /// monotonically increasing sequence number plus a random suffix, so it
    /// can never collide regardless of what the random source produces.
    pub fn create<R: Rng>(
        &mut self,
        name: Option<&str>,
        personality: Option<&str>,
        rng: &mut R,
    ) -> &Agent {
        let seq = self.next_seq;
        self.next_seq += 1;

        let id = AgentId(format!("claw_{}_{}", seq, random_suffix(rng, ID_SUFFIX_LEN)));
        let pos = Position::new(
            rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT),
            rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT),
        );

        let agent = Agent {
            id: id.clone(),
            name: non_empty_or(name, DEFAULT_NAME),
            personality: non_empty_or(personality, DEFAULT_PERSONALITY),
            health: MAX_HEALTH,
            pos,
            color: generate_color(rng),
        };

        info!(
            "Registered agent {} ({}) at ({:.1}, {:.1})",
            agent.id, agent.name, agent.pos.x, agent.pos.z
        );

        let slot = self.agents.len();
        self.agents.push(agent);
        self.index.insert(id, slot);
        &self.agents[slot]
    }

    pub fn get(&self, id: &AgentId) -> Option<&Agent> {
        self.index.get(id).map(|&slot| &self.agents[slot])
    }

    pub fn get_mut(&mut self, id: &AgentId) -> Option<&mut Agent> {
        match self.index.get(id) {
            Some(&slot) => self.agents.get_mut(slot),
            None => None,
        }
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        self.index.contains_key(id)
    }

    /// All agents in registration order.
    pub fn all(&self) -> &[Agent] {
        &self.agents
    }

    /// Ids in registration order, detached from the registry borrow.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.iter().map(|agent| agent.id.clone()).collect()
    }

    pub fn views(&self) -> Vec<AgentView> {
        self.agents.iter().map(Agent::view).collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
