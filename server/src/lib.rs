//! # Arena Server Library
//!
//! Authoritative server for a small real-time multiplayer arena. Clients
//! register a combatant, submit one intent at a time over HTTP, and read
//! the world either by polling or by listening on a WebSocket push
//! channel.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Simulation
//! A fixed-period tick consumes each agent's pending intent, resolves
//! movement and combat against the registry, and produces a snapshot.
//! Agents are processed in registration order so every tick over the same
//! state resolves the same way.
//!
//! ### Access Control
//! Registration hands out an opaque token bound to the new agent id.
//! Every agent-scoped request must present that exact token.
//!
//! ### State Broadcasting
//! After every tick the full snapshot is pushed to all connected
//! observers. Delivery is fire-and-forget; a slow or broken observer never
//! delays the tick or other observers.
//!
//! ## Concurrency
//!
//! All mutable state lives in one [`game::Arena`] behind a single
//! `tokio::sync::RwLock`. Handlers validate and record intents under the
//! write lock and return immediately; the tick loop takes the same lock
//! for the duration of one step.
//!
//! ## Module Organization
//!
//! - `registry`: agents and their ordering
//! - `credentials`: token issue and check
//! - `intent`: one pending intent per agent
//! - `physics`: movement, range and damage arithmetic
//! - `game`: the arena and its tick step
//! - `broadcaster`: snapshot publishing and the WebSocket channel
//! - `network`: HTTP routes, shared state and the tick loop
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         port: 3000,
//!         tick_period: Duration::from_millis(2000),
//!         ..ServerConfig::default()
//!     };
//!
//!     server::network::run(config).await?;
//!     Ok(())
//! }
//! ```

pub mod broadcaster;
pub mod config;
pub mod credentials;
pub mod error;
pub mod game;
pub mod intent;
pub mod network;
pub mod physics;
pub mod registry;
pub mod utils;
