mod catalog;
mod metadata;
mod suggestions;

pub use catalog::{details_for, known_labels, EmotionDetails, KnownLabels, EMOTION_CATALOG};
pub use metadata::{
    enrich_predictions, lookup_metadata, to_title_case, EmotionMetadata, EnrichedPrediction,
    FALLBACK_DESCRIPTION,
};
pub use suggestions::{suggestion, SUGGESTIONS};
