//! # Arena Client Library
//!
//! Headless participant for the arena server. It can play, by registering
//! an agent and letting a simple bot chase and attack the nearest
//! opponent, or it can spectate the push channel and log every snapshot.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! Request/response calls: register, poll state, submit an action.
//!
//! ### Game Module (`game`)
//! The client's last known picture of the arena.
//!
//! ### Input Module (`input`)
//! The bot policy that picks the next action from that picture.
//!
//! ### Spectator Module (`spectator`)
//! WebSocket observer of `arena_state` events.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::game::ArenaView;
//! use client::input::BotBrain;
//! use client::network::ArenaClient;
//!
//! # async fn play() -> Result<(), client::network::ClientError> {
//! let mut arena = ArenaClient::new("http://127.0.0.1:3000")?;
//! let me = arena.register(Some("Pinchy"), Some("bold")).await?;
//!
//! let mut view = ArenaView::new(Some(me.agent_id));
//! let mut brain = BotBrain::new();
//!
//! let state = arena.state().await?;
//! view.apply_snapshot(state.agents);
//! if let Some(action) = brain.decide(&view) {
//!     arena.act(&action).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod game;
pub mod input;
pub mod network;
pub mod spectator;
