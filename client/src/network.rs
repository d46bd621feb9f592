//! HTTP client for the arena's request/response surface

use log::debug;
use reqwest::StatusCode;
use shared::{
    Action, ActionAccepted, ErrorBody, RegisterRequest, RegisterResponse, StateResponse,
};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected request with {status}: {error}")]
    Rejected { status: StatusCode, error: String },

    #[error("not registered yet")]
    NotRegistered,

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Agent id and token handed out at registration
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub agent_id: String,
    pub token: String,
}

pub struct ArenaClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl ArenaClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// WebSocket URL of the push channel on the same server.
    pub fn push_url(&self) -> String {
        push_url(&self.base_url)
    }

    pub async fn register(
        &mut self,
        name: Option<&str>,
        personality: Option<&str>,
    ) -> Result<RegisterResponse, ClientError> {
        let request = RegisterRequest {
            name: name.map(str::to_string),
            personality: personality.map(str::to_string),
        };

        let response = self
            .http
            .post(format!("{}/api/register", self.base_url))
            .json(&request)
            .send()
            .await?;
        let registered: RegisterResponse = read_json(response).await?;

        debug!("Registered as {}", registered.agent_id);
        self.credentials = Some(Credentials {
            agent_id: registered.agent_id.clone(),
            token: registered.token.clone(),
        });
        Ok(registered)
    }

    pub async fn state(&self) -> Result<StateResponse, ClientError> {
        let credentials = self.credentials.as_ref().ok_or(ClientError::NotRegistered)?;

        let response = self
            .http
            .get(format!("{}/api/state", self.base_url))
            .query(&[
                ("agent_id", credentials.agent_id.as_str()),
                ("token", credentials.token.as_str()),
            ])
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn act(&self, action: &Action) -> Result<ActionAccepted, ClientError> {
        let credentials = self.credentials.as_ref().ok_or(ClientError::NotRegistered)?;

        let body = serde_json::json!({
            "agent_id": credentials.agent_id,
            "token": credentials.token,
            "action": action,
        });

        let response = self
            .http
            .post(format!("{}/api/action", self.base_url))
            .json(&body)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let error = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
    };
    Err(ClientError::Rejected { status, error })
}

pub fn push_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        format!("ws://{}", base)
    };
    format!("{}/ws", ws_base)
}
