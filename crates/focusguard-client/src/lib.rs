//! Client for the FocusGuard prediction service.
//!
//! The desktop monitor calls [`PredictClient::classify_activity`] for every
//! sampled window. A prediction failure never interrupts monitoring: the
//! activity is counted as [`FALLBACK_LABEL`] instead.
//! Media windows are labeled by fixed rules before the service is asked.

use std::time::Duration;

use focusguard_core::{LIVENESS_MESSAGE, activity_text, media_override};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Label assumed when the service cannot be reached.
pub const FALLBACK_LABEL: &str = "productive";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable read by [`PredictClient::from_env`].
pub const BASE_URL_ENV: &str = "FOCUSGUARD_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Serialize)]
struct PredictBody<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct PredictReply {
    prediction: String,
}

#[derive(Debug, Clone)]
pub struct PredictClient {
    client: Client,
    base_url: String,
}

impl PredictClient {
    /// Client for the service rooted at `base_url`, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Client for `$FOCUSGUARD_URL`, or [`DEFAULT_BASE_URL`] when unset.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service for the label of `text`.
    pub async fn predict(&self, text: &str) -> Result<String> {
        let url = format!("{}/predict", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&PredictBody { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { status, url });
        }

        let reply: PredictReply = response.json().await?;
        debug!(prediction = %reply.prediction, "Received prediction");
        Ok(reply.prediction)
    }

    /// Label one sampled window.
    ///
    /// Spotify and YouTube windows are labeled by [`media_override`] without a
    /// request. Other windows go to the service, falling back to
    /// [`FALLBACK_LABEL`] on error.
    pub async fn classify_activity(&self, app_name: &str, window_title: &str) -> String {
        if let Some(label) = media_override(app_name, window_title) {
            debug!(app = app_name, %label, "Media rule applied");
            return label.to_string();
        }

        let text = activity_text(app_name, window_title);
        match self.predict(&text).await {
            Ok(label) => label,
            Err(e) => {
                warn!(error = %e, app = app_name, fallback = FALLBACK_LABEL, "Prediction failed");
                FALLBACK_LABEL.to_string()
            }
        }
    }

    /// True when the service answers its liveness route.
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        Ok(response.text().await? == LIVENESS_MESSAGE)
    }
}
