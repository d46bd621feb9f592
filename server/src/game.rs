//! The authoritative arena state and its simulation step.
//!
//! [`Arena`] owns every piece of mutable game state: the agent registry,
//! the credential map and the pending intents. Request handlers and the
//! tick loop share one `Arena` behind a single lock, so a tick never
//! interleaves with a registration or an intent submission.

use crate::credentials::CredentialMap;
use crate::error::ArenaError;
use crate::intent::{Intent, IntentSlots};
use crate::physics::{apply_damage, step_position, within_range};
use crate::registry::{Agent, AgentId, AgentRegistry};
use crate::utils::get_timestamp;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{
    ArenaState, Position, StateResponse, ARENA_BOUND, ATTACK_RANGE, DAMAGE_MAX, DAMAGE_MIN,
    MAX_HEALTH, MOVE_SPEED,
};

/// Tunable simulation constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub arena_bound: f64,
    pub move_speed: f64,
    pub attack_range: f64,
    pub damage_min: i32,
    pub damage_max: i32,
    pub max_health: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            arena_bound: ARENA_BOUND,
            move_speed: MOVE_SPEED,
            attack_range: ATTACK_RANGE,
            damage_min: DAMAGE_MIN,
            damage_max: DAMAGE_MAX,
            max_health: MAX_HEALTH,
        }
    }
}

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub agent: Agent,
    pub token: String,
}

/// What happened to one agent's intent during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    Moved {
        agent: AgentId,
        from: Position,
        to: Position,
    },
    Hit {
        attacker: AgentId,
        target: AgentId,
        damage: i32,
        respawned: bool,
    },
    OutOfRange {
        attacker: AgentId,
        target: AgentId,
        distance: f64,
    },
    Ignored {
        agent: AgentId,
    },
}

/// Per-agent failure inside a tick. Logged and skipped, never propagated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("agent {0} is not registered")]
    MissingAgent(AgentId),
    #[error("attack target {0} does not exist")]
    MissingTarget(AgentId),
}

#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<TickEvent>,
    pub skipped: usize,
    pub snapshot: ArenaState,
}

impl TickReport {
    pub fn respawns(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, TickEvent::Hit { respawned: true, .. }))
            .count()
    }
}

pub struct Arena {
    tick: u64,
    registry: AgentRegistry,
    credentials: CredentialMap,
    intents: IntentSlots,
    rules: Rules,
    rng: StdRng,
}

impl Arena {
    /// Creates an empty arena. A `seed` makes spawn points, colors, ids,
    /// tokens and damage rolls reproducible.
    pub fn new(rules: Rules, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            tick: 0,
            registry: AgentRegistry::new(),
            credentials: CredentialMap::new(),
            intents: IntentSlots::new(),
            rules,
            rng,
        }
    }

    /// Number of ticks stepped so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn intents(&self) -> &IntentSlots {
        &self.intents
    }

    pub fn register(&mut self, name: Option<&str>, personality: Option<&str>) -> Registration {
        let agent = self
            .registry
            .create(name, personality, &mut self.rng)
            .clone();
        let token = self.credentials.issue(&agent.id, &mut self.rng);

        Registration { agent, token }
    }

    /// Queues an intent for the next tick.
    ///
    /// An unknown agent id is reported before the token is checked. Any
    /// unconsumed intent for the agent is silently replaced.
    pub fn submit(
        &mut self,
        agent_id: &AgentId,
        token: Option<&str>,
        intent: Intent,
    ) -> Result<(), ArenaError> {
        if !self.registry.contains(agent_id) {
            return Err(ArenaError::UnknownAgent(agent_id.to_string()));
        }
        if !self.credentials.authorize(agent_id, token) {
            return Err(ArenaError::Unauthorized);
        }

        if let Some(replaced) = self.intents.submit(agent_id.clone(), intent) {
            debug!("Agent {} replaced unconsumed intent {:?}", agent_id, replaced);
        }
        Ok(())
    }

    /// Live state for one verified agent plus a readable summary of it.
    pub fn query(&self, agent_id: &AgentId, token: Option<&str>) -> Result<StateResponse, ArenaError> {
        if !self.credentials.authorize(agent_id, token) {
            return Err(ArenaError::Unauthorized);
        }
        let you = self
            .registry
            .get(agent_id)
            .ok_or_else(|| ArenaError::UnknownAgent(agent_id.to_string()))?;

        let agents = self.registry.views();
        let rich_description = describe(you, agents.len());

        Ok(StateResponse {
            tick: get_timestamp(),
            agents,
            your_id: agent_id.to_string(),
            rich_description,
        })
    }

    pub fn snapshot(&self) -> ArenaState {
        ArenaState {
            agents: self.registry.views(),
        }
    }

    /// Runs one simulation tick.
    ///
    /// Agents are visited in registration order. Each pending intent is
    /// taken out of its slot before it is resolved, so it is consumed even
    /// when resolution fails.
    pub fn step(&mut self) -> TickReport {
        self.tick += 1;

        let mut events = Vec::new();
        let mut skipped = 0;

        for agent_id in self.registry.ids() {
            let Some(intent) = self.intents.take_and_clear(&agent_id) else {
                continue;
            };

            match self.resolve(&agent_id, intent) {
                Ok(event) => events.push(event),
                Err(e) => {
                    skipped += 1;
                    debug!("Tick {}: skipped intent of {}: {}", self.tick, agent_id, e);
                }
            }
        }

        let report = TickReport {
            tick: self.tick,
            events,
            skipped,
            snapshot: self.snapshot(),
        };

        debug!(
            "Tick {}: {} agents, {} intents resolved, {} skipped",
            report.tick,
            report.snapshot.agents.len(),
            report.events.len(),
            report.skipped
        );

        report
    }

    fn resolve(&mut self, agent_id: &AgentId, intent: Intent) -> Result<TickEvent, ResolveError> {
        match intent {
            Intent::Move { dx, dz } => {
                let rules = self.rules;
                let agent = self
                    .registry
                    .get_mut(agent_id)
                    .ok_or_else(|| ResolveError::MissingAgent(agent_id.clone()))?;

                let from = agent.pos;
                agent.pos = step_position(from, dx, dz, rules.move_speed, rules.arena_bound);

                Ok(TickEvent::Moved {
                    agent: agent_id.clone(),
                    from,
                    to: agent.pos,
                })
            }
            Intent::Attack { target } => self.resolve_attack(agent_id, target),
            Intent::Unrecognized => Ok(TickEvent::Ignored {
                agent: agent_id.clone(),
            }),
        }
    }

    fn resolve_attack(
        &mut self,
        attacker_id: &AgentId,
        target_id: AgentId,
    ) -> Result<TickEvent, ResolveError> {
        let attacker_pos = self
            .registry
            .get(attacker_id)
            .ok_or_else(|| ResolveError::MissingAgent(attacker_id.clone()))?
            .pos;
        let target_pos = self
            .registry
            .get(&target_id)
            .ok_or_else(|| ResolveError::MissingTarget(target_id.clone()))?
            .pos;

        if !within_range(&attacker_pos, &target_pos, self.rules.attack_range) {
            return Ok(TickEvent::OutOfRange {
                attacker: attacker_id.clone(),
                distance: attacker_pos.distance_to(&target_pos),
                target: target_id,
            });
        }

        let damage = self
            .rng
            .gen_range(self.rules.damage_min..=self.rules.damage_max);
        let max_health = self.rules.max_health;

        let target = self
            .registry
            .get_mut(&target_id)
            .ok_or_else(|| ResolveError::MissingTarget(target_id.clone()))?;

        let (health, respawned) = apply_damage(target.health, damage, max_health);
        target.health = health;

        if respawned {
            info!(
                "{} took {} damage from {} and respawned",
                target.id, damage, attacker_id
            );
        }

        Ok(TickEvent::Hit {
            attacker: attacker_id.clone(),
            target: target_id,
            damage,
            respawned,
        })
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, agent_id: &AgentId, pos: Position) {
        if let Some(agent) = self.registry.get_mut(agent_id) {
            agent.pos = pos;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_health(&mut self, agent_id: &AgentId, health: i32) {
        if let Some(agent) = self.registry.get_mut(agent_id) {
            agent.health = health;
        }
    }
}

fn describe(agent: &Agent, agent_count: usize) -> String {
    format!(
        "You are {} ({} lobster). Health: {}%\nArena has {} claws fighting.",
        agent.name, agent.personality, agent.health, agent_count
    )
}
