//! Pending intents, one slot per agent.

use crate::registry::AgentId;
use serde_json::Value;
use std::collections::HashMap;

/// What an agent asked to do on the next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Move { dx: f64, dz: f64 },
    Attack { target: AgentId },
    /// Anything the tick cannot interpret. Still occupies the slot and is
    /// consumed as a no-op.
    Unrecognized,
}

impl Intent {
    /// Interprets a raw client action leniently.
    ///
    /// Missing or non-numeric `dx`/`dz` count as 0. An attack needs a
    /// non-empty string `target_id`. Everything else is `Unrecognized`.
    pub fn from_action(action: Option<&Value>) -> Self {
        let Some(Value::Object(fields)) = action else {
            return Intent::Unrecognized;
        };

        match fields.get("type").and_then(Value::as_str) {
            Some("move") => Intent::Move {
                dx: axis(fields.get("dx")),
                dz: axis(fields.get("dz")),
            },
            Some("attack") => match fields.get("target_id").and_then(Value::as_str) {
                Some(target) if !target.is_empty() => Intent::Attack {
                    target: AgentId::from(target),
                },
                _ => Intent::Unrecognized,
            },
            _ => Intent::Unrecognized,
        }
    }
}

fn axis(value: Option<&Value>) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Last-write-wins intent storage.
#[derive(Debug, Default)]
pub struct IntentSlots {
    pending: HashMap<AgentId, Intent>,
}

impl IntentSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an intent, returning the unconsumed one it replaced.
    pub fn submit(&mut self, agent_id: AgentId, intent: Intent) -> Option<Intent> {
        self.pending.insert(agent_id, intent)
    }

    pub fn take_and_clear(&mut self, agent_id: &AgentId) -> Option<Intent> {
        self.pending.remove(agent_id)
    }

    pub fn pending(&self, agent_id: &AgentId) -> Option<&Intent> {
        self.pending.get(agent_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_move() {
        let action = json!({ "type": "move", "dx": 1, "dz": -0.5 });
        assert_eq!(
            Intent::from_action(Some(&action)),
            Intent::Move { dx: 1.0, dz: -0.5 }
        );
    }

    #[test]
    fn test_parse_move_missing_or_bogus_axes() {
        let action = json!({ "type": "move", "dz": "north" });
        assert_eq!(
            Intent::from_action(Some(&action)),
            Intent::Move { dx: 0.0, dz: 0.0 }
        );
    }

    #[test]
    fn test_parse_attack() {
        let action = json!({ "type": "attack", "target_id": "claw_2_b" });
        assert_eq!(
            Intent::from_action(Some(&action)),
            Intent::Attack {
                target: AgentId::from("claw_2_b")
            }
        );
    }

    #[test]
    fn test_malformed_actions_are_unrecognized() {
        let cases = vec![
            json!({ "type": "attack" }),
            json!({ "type": "attack", "target_id": "" }),
            json!({ "type": "attack", "target_id": 7 }),
            json!({ "type": "dance" }),
            json!({ "dx": 1 }),
            json!("move"),
            json!(null),
        ];

        for action in cases {
            assert_eq!(
                Intent::from_action(Some(&action)),
                Intent::Unrecognized,
                "action {} should be ignored",
                action
            );
        }
        assert_eq!(Intent::from_action(None), Intent::Unrecognized);
    }

    #[test]
    fn test_submit_overwrites_pending() {
        let mut slots = IntentSlots::new();
        let id = AgentId::from("claw_1_a");

        assert!(slots.submit(id.clone(), Intent::Move { dx: 1.0, dz: 0.0 }).is_none());
        let replaced = slots.submit(id.clone(), Intent::Move { dx: 0.0, dz: 1.0 });

        assert_eq!(replaced, Some(Intent::Move { dx: 1.0, dz: 0.0 }));
        assert_eq!(slots.pending(&id), Some(&Intent::Move { dx: 0.0, dz: 1.0 }));
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn test_take_and_clear_consumes_once() {
        let mut slots = IntentSlots::new();
        let id = AgentId::from("claw_1_a");
        slots.submit(id.clone(), Intent::Unrecognized);

        assert_eq!(slots.take_and_clear(&id), Some(Intent::Unrecognized));
        assert_eq!(slots.take_and_clear(&id), None);
        assert!(slots.is_empty());
    }
}
