//! Emotions Prediction Library
//!
//! Sends text to a remote emotion-classification service and turns whatever
//! JSON comes back into a ranked, displayable list of emotions.

pub mod cli_style;
pub mod config;
pub mod emotions;
pub mod prediction;
pub mod predictor;
pub mod report;
pub mod session;

// Re-export commonly used types for convenience
pub use emotions::{known_labels, lookup_metadata, EnrichedPrediction, KnownLabels};
pub use prediction::{
    determine_threshold, normalize_predictions, slugify_label, LengthType, NormalizedPrediction,
};
pub use predictor::{EmotionPredictor, HttpPredictor, PredictRequest, PredictorError};
pub use session::{AnalysisSession, ResultView, SubmissionOutcome};
