//! HTTP client for the external prediction service.

use super::provider::{EmotionPredictor, PredictRequest, PredictorError};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default prediction endpoint of a locally running service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict";

/// Prediction backend reached with a JSON `POST` request.
pub struct HttpPredictor {
    client: Client,
    endpoint: Url,
    timeout: Option<Duration>,
}

fn map_request_error(e: reqwest::Error) -> PredictorError {
    if e.is_timeout() {
        PredictorError::Timeout
    } else {
        PredictorError::Connection(e.to_string())
    }
}

impl HttpPredictor {
    /// Create a new predictor.
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the prediction route (e.g., "http://localhost:8000/predict").
    /// * `timeout` - Optional per-request timeout. `None` waits indefinitely.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, PredictorError> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder()
            .build()
            .map_err(|e| PredictorError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// Scheme, host and port of the endpoint, e.g. "http://localhost:8000".
    pub fn origin(&self) -> String {
        self.endpoint.origin().ascii_serialization()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Parses an endpoint URL, accepting only http and https.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, PredictorError> {
    let url = Url::parse(endpoint.trim())
        .map_err(|e| PredictorError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PredictorError::InvalidEndpoint(format!(
            "{}: unsupported scheme {}",
            endpoint, other
        ))),
    }
}

#[async_trait]
impl EmotionPredictor for HttpPredictor {
    fn name(&self) -> &str {
        "http"
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn predict(&self, request: &PredictRequest) -> Result<Value, PredictorError> {
        debug!(
            endpoint = %self.endpoint,
            text_chars = request.text.chars().count(),
            threshold = request.threshold,
            "Sending prediction request"
        );

        let mut req_builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(timeout) = self.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let response = req_builder.send().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "Prediction request failed");
            map_request_error(e)
        })?;

        // Non-2xx bodies are not inspected
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "Prediction service error");
            return Err(PredictorError::Api {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "Unreadable prediction response");
            if e.is_timeout() {
                PredictorError::Timeout
            } else {
                PredictorError::InvalidResponse(format!(
                    "Failed to parse prediction response: {}",
                    e
                ))
            }
        })?;

        debug!(status = status.as_u16(), "Received prediction response");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predictor_creation() {
        let predictor = HttpPredictor::new(DEFAULT_ENDPOINT, None).unwrap();
        assert_eq!(predictor.endpoint(), "http://localhost:8000/predict");
        assert_eq!(predictor.origin(), "http://localhost:8000");
        assert_eq!(predictor.name(), "http");
        assert!(predictor.timeout().is_none());
    }

    #[test]
    fn test_predictor_with_timeout() {
        let predictor =
            HttpPredictor::new("https://emotions.example.com/v1/predict", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(predictor.origin(), "https://emotions.example.com");
        assert_eq!(predictor.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_endpoints() {
        assert!(matches!(
            HttpPredictor::new("not a url", None),
            Err(PredictorError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            HttpPredictor::new("ftp://localhost/predict", None),
            Err(PredictorError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_endpoint_is_trimmed() {
        let url = parse_endpoint("  http://127.0.0.1:9000/predict ").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/predict");
    }
}
