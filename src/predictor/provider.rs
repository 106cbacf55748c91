//! Prediction service trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body of a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Trimmed text to classify.
    pub text: String,
    /// Minimum score the service should report.
    pub threshold: f64,
}

impl PredictRequest {
    pub fn new(text: impl Into<String>, threshold: f64) -> Self {
        Self {
            text: text.into(),
            threshold,
        }
    }
}

/// Errors that can occur when calling a prediction service.
///
/// These are transport-level failures only. A response that parses as JSON
/// but has an unexpected shape is not an error.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Prediction service returned status {status}")]
    Api { status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// Trait for emotion prediction backends.
#[async_trait]
pub trait EmotionPredictor: Send + Sync {
    /// Get the backend's name (e.g., "http").
    fn name(&self) -> &str;

    /// Where requests are sent, for display in messages.
    fn endpoint(&self) -> &str;

    /// Classify a text, returning the decoded response body as-is.
    ///
    /// The body is meant to be fed to `normalize_predictions`.
    async fn predict(&self, request: &PredictRequest) -> Result<Value, PredictorError>;
}
