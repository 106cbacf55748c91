//! Static dictionary of the emotions the classifier is known to emit.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Title and description of a known emotion label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmotionDetails {
    /// Canonical slug, as produced by `slugify_label`.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const fn details(
    id: &'static str,
    title: &'static str,
    description: &'static str,
) -> EmotionDetails {
    EmotionDetails {
        id,
        title,
        description,
    }
}

/// All known emotions, in display order.
pub const EMOTION_CATALOG: [EmotionDetails; 28] = [
    details(
        "admiration",
        "Admiration",
        "Warm approval and appreciation of someone’s qualities or achievements.",
    ),
    details(
        "amusement",
        "Amusement",
        "Playful enjoyment and light-hearted delight in the situation.",
    ),
    details(
        "anger",
        "Anger",
        "Intense displeasure or hostility toward something perceived as wrong.",
    ),
    details(
        "annoyance",
        "Annoyance",
        "Irritation and mild frustration that something is getting in the way.",
    ),
    details(
        "approval",
        "Approval",
        "Positive acknowledgement that something meets expectations or values.",
    ),
    details(
        "caring",
        "Caring",
        "Supportive concern and willingness to help or comfort someone.",
    ),
    details(
        "confusion",
        "Confusion",
        "Uncertainty about what is happening or what decision to make.",
    ),
    details(
        "curiosity",
        "Curiosity",
        "A desire to explore, learn more, or understand the unknown.",
    ),
    details(
        "desire",
        "Desire",
        "A strong wish or longing for an outcome or experience.",
    ),
    details(
        "disappointment",
        "Disappointment",
        "Let-down feelings caused by outcomes falling short of hopes.",
    ),
    details(
        "disapproval",
        "Disapproval",
        "Judgement that something is not acceptable or is misaligned with values.",
    ),
    details(
        "disgust",
        "Disgust",
        "Revulsion and rejection triggered by something unpleasant or offensive.",
    ),
    details(
        "embarrassment",
        "Embarrassment",
        "Awkwardness and self-consciousness about how something looks to others.",
    ),
    details(
        "excitement",
        "Excitement",
        "High energy and anticipation focused on something positive ahead.",
    ),
    details(
        "fear",
        "Fear",
        "Unease or alarm about potential danger or negative consequences.",
    ),
    details(
        "gratitude",
        "Gratitude",
        "A thankful recognition of help, support, or kindness received.",
    ),
    details(
        "grief",
        "Grief",
        "Deep sorrow that lingers after a meaningful loss or tragedy.",
    ),
    details(
        "joy",
        "Joy",
        "Bright, uplifting happiness that energizes the entire message.",
    ),
    details(
        "love",
        "Love",
        "Warm affection, care, and emotional closeness toward someone or something.",
    ),
    details(
        "nervousness",
        "Nervousness",
        "Restless tension and worry about what might happen next.",
    ),
    details(
        "optimism",
        "Optimism",
        "Confidence that things will work out well, even if challenges remain.",
    ),
    details(
        "pride",
        "Pride",
        "Satisfaction and honor connected to achievements or identity.",
    ),
    details(
        "realization",
        "Realization",
        "A new understanding or fresh insight that reshapes the perspective.",
    ),
    details(
        "relief",
        "Relief",
        "Release of tension after worries ease or a risk passes.",
    ),
    details(
        "remorse",
        "Remorse",
        "Regret and self-reproach about a past choice or consequence.",
    ),
    details(
        "sadness",
        "Sadness",
        "Quiet heaviness and sorrow about a loss, hardship, or unmet need.",
    ),
    details(
        "surprise",
        "Surprise",
        "A sudden reaction to something unexpected or out of the ordinary.",
    ),
    details(
        "neutral",
        "Neutral",
        "Balanced, matter-of-fact delivery without strong emotional signals.",
    ),
];

/// Set of canonical label slugs.
///
/// Used by the normalizer to decide whether a bare top-level key of a
/// response is an emotion score or some unrelated field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownLabels {
    labels: HashSet<String>,
}

impl KnownLabels {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.labels.contains(slug)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownLabels {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

lazy_static! {
    static ref KNOWN_LABELS: KnownLabels = EMOTION_CATALOG.iter().map(|d| d.id).collect();
    static ref DETAILS_BY_ID: HashMap<&'static str, &'static EmotionDetails> =
        EMOTION_CATALOG.iter().map(|d| (d.id, d)).collect();
}

/// The known-label set built from [`EMOTION_CATALOG`].
pub fn known_labels() -> &'static KnownLabels {
    &KNOWN_LABELS
}

/// Dictionary entry for a canonical id, if the id is known.
pub fn details_for(id: &str) -> Option<&'static EmotionDetails> {
    DETAILS_BY_ID.get(id).copied()
}
