//! End-to-end tests for the HTTP predictor
//!
//! Runs `HttpPredictor` against a mock prediction service and feeds the
//! decoded bodies through the normalizer.

mod common;

use common::{
    unreachable_endpoint, MockPredictionService, MockReply, FLAT_PAYLOAD, LIST_PAYLOAD,
    SCORES_PAYLOAD, WRAPPED_PAYLOAD,
};
use emotions_prediction::{
    known_labels, normalize_predictions, EmotionPredictor, HttpPredictor, PredictRequest,
    PredictorError,
};
use serde_json::json;
use std::time::Duration;

async fn predict_ids(payload: &str) -> Vec<(String, f64)> {
    let service = MockPredictionService::spawn(MockReply::json(payload)).await;
    let predictor = HttpPredictor::new(&service.endpoint(), None).unwrap();

    let body = predictor
        .predict(&PredictRequest::new("Some text to classify", 0.09))
        .await
        .unwrap();

    normalize_predictions(&body, known_labels())
        .into_iter()
        .map(|p| (p.id, p.score))
        .collect()
}

// =============================================================================
// Payload Shapes
// =============================================================================

#[tokio::test]
async fn test_bare_list_payload() {
    let predictions = predict_ids(LIST_PAYLOAD).await;
    assert_eq!(
        predictions,
        vec![
            ("gratitude".to_string(), 0.87),
            ("joy".to_string(), 0.42),
            ("anger".to_string(), 0.05),
        ]
    );
}

#[tokio::test]
async fn test_wrapped_list_payload() {
    let predictions = predict_ids(WRAPPED_PAYLOAD).await;
    assert_eq!(
        predictions,
        vec![("nervousness".to_string(), 0.66), ("fear".to_string(), 0.31)]
    );
}

#[tokio::test]
async fn test_scores_map_payload() {
    let predictions = predict_ids(SCORES_PAYLOAD).await;
    assert_eq!(
        predictions,
        vec![
            ("love".to_string(), 1.0),
            ("caring".to_string(), 0.55),
            ("remorse".to_string(), 0.0),
        ]
    );
}

#[tokio::test]
async fn test_flat_labels_payload() {
    let predictions = predict_ids(FLAT_PAYLOAD).await;
    assert_eq!(
        predictions,
        vec![
            ("surprise".to_string(), 0.73),
            ("realization".to_string(), 0.4)
        ]
    );
}

#[tokio::test]
async fn test_unrecognized_payload_is_empty() {
    let predictions = predict_ids(r#"{"status": "ok"}"#).await;
    assert!(predictions.is_empty());
}

// =============================================================================
// Request
// =============================================================================

#[tokio::test]
async fn test_request_body() {
    let service = MockPredictionService::spawn(MockReply::json("[]")).await;
    let predictor = HttpPredictor::new(&service.endpoint(), None).unwrap();

    predictor
        .predict(&PredictRequest::new("I can't stop smiling", 0.09))
        .await
        .unwrap();

    assert_eq!(
        service.requests(),
        vec![json!({ "text": "I can't stop smiling", "threshold": 0.09 })]
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_error_status_body_is_ignored() {
    let service = MockPredictionService::spawn(MockReply::status(
        503,
        r#"[{"label": "joy", "score": 1}]"#,
    ))
    .await;
    let predictor = HttpPredictor::new(&service.endpoint(), None).unwrap();

    let result = predictor
        .predict(&PredictRequest::new("Anybody there?", 0.09))
        .await;

    assert!(matches!(result, Err(PredictorError::Api { status: 503 })));
}

#[tokio::test]
async fn test_malformed_body() {
    let service = MockPredictionService::spawn(MockReply::json("joy: 0.9")).await;
    let predictor = HttpPredictor::new(&service.endpoint(), None).unwrap();

    let result = predictor
        .predict(&PredictRequest::new("Anybody there?", 0.09))
        .await;

    assert!(matches!(result, Err(PredictorError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_connection_refused() {
    let predictor = HttpPredictor::new(&unreachable_endpoint().await, None).unwrap();

    let result = predictor
        .predict(&PredictRequest::new("Anybody there?", 0.09))
        .await;

    assert!(matches!(result, Err(PredictorError::Connection(_))));
}

#[tokio::test]
async fn test_request_timeout() {
    let service = MockPredictionService::spawn(
        MockReply::json(LIST_PAYLOAD).delayed(Duration::from_secs(5)),
    )
    .await;
    let predictor =
        HttpPredictor::new(&service.endpoint(), Some(Duration::from_millis(200))).unwrap();

    let result = predictor
        .predict(&PredictRequest::new("Take your time", 0.09))
        .await;

    assert!(matches!(result, Err(PredictorError::Timeout)));
}
