//! Prediction service abstraction layer.
//!
//! The session talks to a trait object so it can run against the real HTTP
//! service or against an in-process stand-in.

mod http;
mod provider;

pub use http::{parse_endpoint, HttpPredictor, DEFAULT_ENDPOINT};
pub use provider::{EmotionPredictor, PredictRequest, PredictorError};
