//! Movement and combat arithmetic used by the simulation tick.

use shared::Position;

/// Applies one tick of movement and clamps each axis to `[-bound, bound]`.
pub fn step_position(pos: Position, dx: f64, dz: f64, speed: f64, bound: f64) -> Position {
    pos.offset(dx, dz, speed).clamped(bound)
}

/// Strictly closer than `range`. Distance exactly at the range misses.
pub fn within_range(attacker: &Position, target: &Position, range: f64) -> bool {
    attacker.distance_to(target) < range
}

/// Returns the new health and whether the hit triggered a respawn.
///
/// Health at or below zero resets to `max_health`; the agent is never
/// eliminated.
pub fn apply_damage(health: i32, damage: i32, max_health: i32) -> (i32, bool) {
    let remaining = health.saturating_sub(damage);
    if remaining <= 0 {
        (max_health, true)
    } else {
        (remaining, false)
    }
}
