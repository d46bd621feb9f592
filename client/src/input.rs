//! Bot policy that turns the client's view into the next action

use crate::game::ArenaView;
use shared::{Action, ATTACK_RANGE};

/// Chases the nearest opponent and attacks once it is in range.
pub struct BotBrain {
    attack_range: f64,
    next_sequence: u32,
}

impl BotBrain {
    pub fn new() -> Self {
        Self::with_range(ATTACK_RANGE)
    }

    pub fn with_range(attack_range: f64) -> Self {
        Self {
            attack_range,
            next_sequence: 1,
        }
    }

    /// Number of decisions made so far
    pub fn decisions(&self) -> u32 {
        self.next_sequence - 1
    }

    /// Returns `None` when there is nobody to fight.
    pub fn decide(&mut self, view: &ArenaView) -> Option<Action> {
        let me = view.me()?;
        let (target, distance) = view.nearest_opponent()?;

        let action = if distance < self.attack_range {
            Action::Attack {
                target_id: target.id.clone(),
            }
        } else {
            let (dx, dz) = normalize_vector(target.pos.x - me.pos.x, target.pos.z - me.pos.z);
            Action::Move { dx, dz }
        };

        self.next_sequence += 1;
        Some(action)
    }
}

impl Default for BotBrain {
    fn default() -> Self {
        Self::new()
    }
}

// Calculate normalized vector
pub fn normalize_vector(x: f64, z: f64) -> (f64, f64) {
    let magnitude = x.hypot(z);
    if magnitude > 0.0 {
        (x / magnitude, z / magnitude)
    } else {
        (0.0, 0.0)
    }
}
