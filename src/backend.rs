use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::BackendConfig;
use crate::error::{AppError, Result};
use crate::http;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

static SHARED: Lazy<Arc<BackendClient>> =
    Lazy::new(|| Arc::new(BackendClient::new(BackendConfig::from_env())));

/// What the auth service reports about itself when asked for the session.
///
/// The client never signs anyone in, so there is no user session to return;
/// a reachable service is the whole answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Client for the hosted backend. Building one performs no I/O.
pub struct BackendClient {
    config: BackendConfig,
    request_timeout: Duration,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        BackendClient {
            config,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Process-wide client built from the environment on first access.
    /// Load `.env` before the first call.
    pub fn shared() -> Arc<BackendClient> {
        Arc::clone(&SHARED)
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub async fn get_session(&self) -> Result<SessionState> {
        let url = format!("{}/auth/v1/health", self.config.url.trim_end_matches('/'));
        let res = http::client()
            .get(&url)
            .timeout(self.request_timeout)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .send()
            .await
            .map_err(|e| AppError::BackendError(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(AppError::BackendError(format!(
                "auth service returned {}",
                status
            )));
        }

        // Older auth servers answer with an empty body
        let body = res
            .bytes()
            .await
            .map_err(|e| AppError::BackendError(e.to_string()))?;
        if body.is_empty() {
            return Ok(SessionState::default());
        }
        serde_json::from_slice(&body).map_err(|e| AppError::BackendError(e.to_string()))
    }

    /// Asks for the session once and logs the outcome. Never fails.
    pub async fn probe_session(&self) -> bool {
        if self.config.is_placeholder() {
            warn!(url = %self.config.url, "backend configured with placeholder values");
        }
        match self.get_session().await {
            Ok(state) => {
                let version = state.version.as_deref().unwrap_or("unknown");
                info!(version, "backend connection established");
                true
            }
            Err(e) => {
                error!(error = %e, "backend connection error");
                false
            }
        }
    }
}

/// Runs [`BackendClient::probe_session`] in the background.
pub fn spawn_session_probe(client: Arc<BackendClient>) -> JoinHandle<bool> {
    tokio::spawn(async move { client.probe_session().await })
}
