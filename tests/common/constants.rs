//! Shared constants for end-to-end tests

// ============================================================================
// Mock Service
// ============================================================================

/// Route the mock prediction service answers on
pub const PREDICT_PATH: &str = "/predict";

/// Maximum time to wait for the mock service to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness checks (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

// ============================================================================
// Payloads
// ============================================================================

/// Bare list of label/score items, deliberately unsorted
pub const LIST_PAYLOAD: &str = r#"[
    {"label": "Joy", "score": 0.42},
    {"label": "gratitude", "score": 0.87},
    {"label": "anger", "score": "0.05"}
]"#;

/// List wrapped under a "predictions" key, using alternate field names
pub const WRAPPED_PAYLOAD: &str = r#"{
    "predictions": [
        {"emotion": "Nervousness", "confidence": 0.66},
        {"name": "fear", "probability": 0.31},
        {"tag": "", "value": 0.9}
    ]
}"#;

/// Label to score map under "scores"
pub const SCORES_PAYLOAD: &str = r#"{"scores": {"Love": 1.7, "caring": 0.55, "Remorse": -0.2}}"#;

/// Known labels as top-level keys next to unrelated fields
pub const FLAT_PAYLOAD: &str = r#"{"surprise": 0.73, "realization": "0.4", "model": "go-emotions", "latency_ms": 12}"#;
