//! Turning prediction service output into ranked emotions.

mod normalizer;
mod slug;
mod threshold;

pub use normalizer::{normalize_predictions, NormalizedPrediction};
pub use slug::slugify_label;
pub use threshold::{
    determine_threshold, LengthType, ThresholdSelection, DEFAULT_THRESHOLD, SHORT_TEXT_WORD_LIMIT,
};
