//! HTTP handlers.
//!
//! * `GET /` – liveness string, independent of model state.
//! * `POST /predict` – `{"text": "..."}` in, `{"prediction": "<label>"}` out.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;

pub use focusguard_core::LIVENESS_MESSAGE;

/// Prediction request. A missing or null `text` is treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Prediction response carrying exactly one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
}

pub async fn index_handler() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Json<PredictResponse> {
    let text = request.text.unwrap_or_default();
    let prediction = state.pipeline.predict(&text).to_string();
    debug!(text_len = text.len(), %prediction, "Prediction served");

    Json(PredictResponse { prediction })
}
