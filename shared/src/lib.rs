use serde::{Deserialize, Serialize};

pub const ARENA_BOUND: f64 = 35.0;
pub const SPAWN_EXTENT: f64 = 30.0;
pub const MOVE_SPEED: f64 = 8.0;
pub const ATTACK_RANGE: f64 = 15.0;
pub const DAMAGE_MIN: i32 = 18;
pub const DAMAGE_MAX: i32 = 30;
pub const MAX_HEALTH: i32 = 100;
pub const DEFAULT_TICK_MS: u64 = 2000;

pub const DEFAULT_NAME: &str = "MysteryClaw";
pub const DEFAULT_PERSONALITY: &str = "savage";
pub const WELCOME_MESSAGE: &str = "Welcome to the arena!";
pub const ARENA_STATE_EVENT: &str = "arena_state";

/// A point on the arena floor. The arena is a flat x/z plane.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.z - self.z)
    }

    /// Moves by a direction scaled with `speed`. Does not clamp.
    pub fn offset(&self, dx: f64, dz: f64, speed: f64) -> Self {
        Self {
            x: self.x + dx * speed,
            z: self.z + dz * speed,
        }
    }

    pub fn clamped(&self, bound: f64) -> Self {
        Self {
            x: self.x.clamp(-bound, bound),
            z: self.z.clamp(-bound, bound),
        }
    }
}

/// Public projection of one agent as it appears in every snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AgentView {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub pos: Position,
    pub color: String,
}

/// Full world snapshot, also the payload of the `arena_state` push event.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ArenaState {
    pub agents: Vec<AgentView>,
}

impl ArenaState {
    pub fn find(&self, agent_id: &str) -> Option<&AgentView> {
        self.agents.iter().find(|agent| agent.id == agent_id)
    }
}

/// Named event frame sent over the push channel.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PushEvent {
    pub event: String,
    pub data: ArenaState,
}

impl PushEvent {
    pub fn arena_state(data: ArenaState) -> Self {
        Self {
            event: ARENA_STATE_EVENT.to_string(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RegisterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterResponse {
    pub success: bool,
    pub agent_id: String,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StateQuery {
    pub agent_id: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StateResponse {
    pub tick: u64,
    pub agents: Vec<AgentView>,
    pub your_id: String,
    pub rich_description: String,
}

/// Intent submission. `action` stays untyped: the server accepts anything
/// and ignores what it cannot interpret.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ActionRequest {
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub action: Option<serde_json::Value>,
}

/// Typed form of the actions a well-behaved client sends.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Move {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dz: f64,
    },
    Attack {
        target_id: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActionAccepted {
    pub accepted: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Clamps a domain health value for display.
pub fn visible_health(health: i32) -> i32 {
    health.max(0)
}
