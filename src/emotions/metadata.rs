//! Display metadata for normalized predictions.

use super::catalog::details_for;
use crate::prediction::NormalizedPrediction;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Description used for labels that are not part of the catalog.
pub const FALLBACK_DESCRIPTION: &str =
    "We do not have additional context for this label yet, but the score passed your threshold.";

lazy_static! {
    static ref WORD_SEPARATORS: Regex = Regex::new(r"[\s_-]+").unwrap();
}

/// Title and description shown for an emotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionMetadata {
    pub title: String,
    pub description: String,
}

/// A normalized prediction together with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPrediction {
    pub id: String,
    pub raw_label: String,
    pub score: f64,
    pub title: String,
    pub description: String,
}

/// Capitalizes every word of `value`, treating runs of whitespace,
/// underscores and hyphens as word separators.
///
/// `"weird_tag"` becomes `"Weird Tag"`.
pub fn to_title_case(value: &str) -> String {
    WORD_SEPARATORS
        .split(&value.to_lowercase())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks up title and description for a prediction.
///
/// Labels missing from the catalog get a title derived from the raw label
/// and [`FALLBACK_DESCRIPTION`], so every prediction stays displayable.
pub fn lookup_metadata(prediction: &NormalizedPrediction) -> EmotionMetadata {
    match details_for(&prediction.id) {
        Some(details) => EmotionMetadata {
            title: details.title.to_string(),
            description: details.description.to_string(),
        },
        None => EmotionMetadata {
            title: to_title_case(&prediction.raw_label),
            description: FALLBACK_DESCRIPTION.to_string(),
        },
    }
}

impl From<&NormalizedPrediction> for EnrichedPrediction {
    fn from(prediction: &NormalizedPrediction) -> Self {
        let metadata = lookup_metadata(prediction);
        EnrichedPrediction {
            id: prediction.id.clone(),
            raw_label: prediction.raw_label.clone(),
            score: prediction.score,
            title: metadata.title,
            description: metadata.description,
        }
    }
}

/// Attaches metadata to every prediction, keeping the ranking order.
pub fn enrich_predictions(predictions: &[NormalizedPrediction]) -> Vec<EnrichedPrediction> {
    predictions.iter().map(EnrichedPrediction::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(id: &str, raw_label: &str, score: f64) -> NormalizedPrediction {
        NormalizedPrediction {
            id: id.to_string(),
            raw_label: raw_label.to_string(),
            score,
        }
    }

    #[test]
    fn test_to_title_case() {
        assert_eq!(to_title_case("weird_tag"), "Weird Tag");
        assert_eq!(to_title_case("SOME-very   odd__label"), "Some Very Odd Label");
        assert_eq!(to_title_case("  padded "), "Padded");
        assert_eq!(to_title_case("___"), "");
        assert_eq!(to_title_case("élan vital"), "Élan Vital");
    }

    #[test]
    fn test_lookup_known_label() {
        let metadata = lookup_metadata(&prediction("joy", "JOY", 0.5));
        assert_eq!(metadata.title, "Joy");
        assert_eq!(
            metadata.description,
            "Bright, uplifting happiness that energizes the entire message."
        );
    }

    #[test]
    fn test_lookup_unknown_label_falls_back() {
        let metadata = lookup_metadata(&prediction("weird-tag", "weird_tag", 0.4));
        assert_eq!(metadata.title, "Weird Tag");
        assert_eq!(metadata.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_enrich_keeps_order() {
        let predictions = vec![
            prediction("fear", "Fear", 0.8),
            prediction("mystery", "Mystery", 0.6),
            prediction("joy", "joy", 0.1),
        ];

        let enriched = enrich_predictions(&predictions);
        let titles: Vec<_> = enriched.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Fear", "Mystery", "Joy"]);
        assert_eq!(enriched[1].description, FALLBACK_DESCRIPTION);
        assert_eq!(enriched[0].score, 0.8);
    }
}
