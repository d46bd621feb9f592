//! HTTP surface, shared server state and the tick loop.

use crate::broadcaster::{ws_arena, Broadcaster};
use crate::config::ServerConfig;
use crate::error::{ArenaError, ServerError};
use crate::game::{Arena, Rules};
use crate::intent::Intent;
use crate::registry::AgentId;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use shared::{
    ActionAccepted, ActionRequest, RegisterRequest, RegisterResponse, StateQuery, StateResponse,
    WELCOME_MESSAGE,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::time::{interval, MissedTickBehavior};
use tower_http::cors::{Any, CorsLayer};

/// State shared by every request handler, observer and the tick loop.
pub struct AppState {
    pub arena: Arc<RwLock<Arena>>,
    pub broadcaster: Broadcaster,
    pub snapshot_on_connect: bool,
}

impl AppState {
    pub fn new(arena: Arena, config: &ServerConfig) -> Self {
        Self {
            arena: Arc::new(RwLock::new(arena)),
            broadcaster: Broadcaster::new(config.broadcast_capacity),
            snapshot_on_connect: config.snapshot_on_connect,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(Arena::new(Rules::default(), config.seed), config)
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tick: u64,
    pub agents: usize,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/register", post(register))
        .route("/api/state", get(get_state))
        .route("/api/action", post(submit_action))
        .route("/health", get(health))
        .route("/ws", get(ws_arena))
        .layer(cors)
        .with_state(state)
}

/// `POST /api/register`. Always succeeds; a missing, unreadable or
/// mistyped field falls back to the default name or personality.
pub async fn register(State(state): State<Arc<AppState>>, body: Bytes) -> Json<RegisterResponse> {
    let body = lenient_json(&body);
    let request = RegisterRequest {
        name: text_field(&body, "name"),
        personality: text_field(&body, "personality"),
    };

    let registration = state
        .arena
        .write()
        .await
        .register(request.name.as_deref(), request.personality.as_deref());

    Json(RegisterResponse {
        success: true,
        agent_id: registration.agent.id.to_string(),
        token: registration.token,
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// `GET /api/state?agent_id=..&token=..`
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StateQuery>,
) -> Result<Json<StateResponse>, ArenaError> {
    let agent_id = AgentId::from(query.agent_id.unwrap_or_default());
    let arena = state.arena.read().await;
    arena.query(&agent_id, query.token.as_deref()).map(Json)
}

/// `POST /api/action`. Accepted intents take effect on the next tick.
///
/// The body is read field by field, so a missing or mistyped `agent_id`
/// ends up as an unknown agent and a mistyped `token` as a bad token.
pub async fn submit_action(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ActionAccepted>, ArenaError> {
    let body = lenient_json(&body);
    let request = ActionRequest {
        agent_id: text_field(&body, "agent_id"),
        token: text_field(&body, "token"),
        action: body.get("action").cloned(),
    };

    let agent_id = AgentId::from(request.agent_id.unwrap_or_default());
    let intent = Intent::from_action(request.action.as_ref());

    state
        .arena
        .write()
        .await
        .submit(&agent_id, request.token.as_deref(), intent)?;

    Ok(Json(ActionAccepted { accepted: true }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let arena = state.arena.read().await;
    Json(HealthResponse {
        status: "ok",
        tick: arena.tick(),
        agents: arena.registry().len(),
    })
}

/// Parses a request body without failing. Anything that is not JSON reads
/// as `null`.
fn lenient_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Runs the simulation tick forever at a fixed period.
///
/// The arena lock is held only for the step itself; the snapshot is
/// published after the lock is released so slow observers never delay
/// request handlers or the next tick.
pub async fn run_game_loop(state: Arc<AppState>, tick_period: Duration) {
    let mut interval_timer = interval(tick_period);
    interval_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Skip the first tick since it fires immediately
    interval_timer.tick().await;

    loop {
        interval_timer.tick().await;

        let report = state.arena.write().await.step();
        let delivered = state.broadcaster.publish(&report.snapshot);

        if !report.events.is_empty() {
            debug!(
                "Tick {}: {} events, {} respawns, sent to {} observers",
                report.tick,
                report.events.len(),
                report.respawns(),
                delivered
            );
        }
    }
}

/// Binds the listener and serves until the process ends.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {}: {}", address, e)))?;

    info!("Arena listening on {}", address);

    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))
}

/// Starts the tick loop and the HTTP server together.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::from_config(&config));

    let game_state = Arc::clone(&state);
    let tick_period = config.tick_period;
    let game_handle = tokio::spawn(async move {
        run_game_loop(game_state, tick_period).await;
    });

    let result = start_server(&config, state).await;
    game_handle.abort();
    result
}
