//! Performance benchmarks for the simulation tick and snapshot encoding

use server::broadcaster::encode_frame;
use server::game::{Arena, Rules};
use server::intent::Intent;
use server::physics::{apply_damage, step_position, within_range};
use shared::{Position, ARENA_BOUND, ATTACK_RANGE, MOVE_SPEED};
use std::time::Instant;

/// Benchmarks the range check used by every attack
#[test]
fn benchmark_range_check() {
    let a = Position::new(-10.0, 4.0);
    let b = Position::new(3.0, -2.5);

    let iterations = 100_000;
    let start = Instant::now();

    let mut hits = 0;
    for _ in 0..iterations {
        if within_range(&a, &b, ATTACK_RANGE) {
            hits += 1;
        }
    }

    let duration = start.elapsed();
    println!(
        "Range check: {} iterations in {:?} ({:.2} ns/iter)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    assert_eq!(hits, iterations);
    // Should complete in under 100ms for 100k iterations
    assert!(duration.as_millis() < 100);
}

/// Benchmarks clamped movement and damage arithmetic
#[test]
fn benchmark_movement_and_damage() {
    let iterations = 100_000;
    let start = Instant::now();

    let mut pos = Position::default();
    let mut health = 100;
    for i in 0..iterations {
        let dx = if i % 2 == 0 { 1.0 } else { -0.75 };
        pos = step_position(pos, dx, 0.5, MOVE_SPEED, ARENA_BOUND);
        health = apply_damage(health, 18 + (i % 13), 100).0;
    }

    let duration = start.elapsed();
    println!(
        "Movement and damage: {} iterations in {:?} ({:.2} ns/iter)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    assert!(pos.x.abs() <= ARENA_BOUND && pos.z.abs() <= ARENA_BOUND);
    assert!(health > 0);
    assert!(duration.as_millis() < 200);
}

/// Benchmarks full ticks with a crowded arena where every agent acts
#[test]
fn benchmark_crowded_tick() {
    let mut arena = Arena::new(Rules::default(), Some(2024));
    let agents: Vec<_> = (0..200).map(|_| arena.register(None, None)).collect();

    let ticks = 100;
    let start = Instant::now();

    for tick in 0..ticks {
        for (i, registration) in agents.iter().enumerate() {
            let intent = if (i + tick) % 3 == 0 {
                Intent::Attack {
                    target: agents[(i + 1) % agents.len()].agent.id.clone(),
                }
            } else {
                Intent::Move {
                    dx: if i % 2 == 0 { 1.0 } else { -1.0 },
                    dz: if tick % 2 == 0 { 0.5 } else { -0.5 },
                }
            };
            arena
                .submit(&registration.agent.id, Some(&registration.token), intent)
                .unwrap();
        }
        arena.step();
    }

    let duration = start.elapsed();
    println!(
        "Crowded tick: {} ticks x {} agents in {:?} ({:.2} μs/tick)",
        ticks,
        agents.len(),
        duration,
        duration.as_micros() as f64 / ticks as f64
    );

    assert_eq!(arena.tick(), ticks as u64);
    assert!(arena.intents().is_empty());
    // A tick runs every two seconds; even a crowded one should take milliseconds
    assert!(duration.as_millis() < 2000);
}

/// Benchmarks encoding the push frame for a large snapshot
#[test]
fn benchmark_snapshot_encoding() {
    let mut arena = Arena::new(Rules::default(), Some(3));
    for i in 0..500 {
        arena.register(Some(&format!("Claw{}", i)), None);
    }
    let snapshot = arena.snapshot();

    let iterations = 200;
    let start = Instant::now();

    let mut bytes = 0;
    for _ in 0..iterations {
        bytes += encode_frame(&snapshot).unwrap().len();
    }

    let duration = start.elapsed();
    println!(
        "Snapshot encoding: {} frames of {} agents in {:?} ({:.2} μs/frame, {} bytes/frame)",
        iterations,
        snapshot.agents.len(),
        duration,
        duration.as_micros() as f64 / iterations as f64,
        bytes / iterations
    );

    assert!(bytes > 0);
    assert!(duration.as_millis() < 2000);
}
