use serde::{Deserialize, Serialize};

/// Texts with at most this many words are classified as short.
pub const SHORT_TEXT_WORD_LIMIT: usize = 35;

/// Threshold sent to the prediction service for every text length.
pub const DEFAULT_THRESHOLD: f64 = 0.09;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthType {
    Short,
    Long,
}

impl LengthType {
    pub fn label(&self) -> &'static str {
        match self {
            LengthType::Short => "Short text",
            LengthType::Long => "Long text",
        }
    }
}

/// Threshold chosen for a text, plus the length classification it was based on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSelection {
    pub threshold: f64,
    pub length_type: LengthType,
}

/// Classifies `text` by word count and picks the threshold to send.
///
/// The classification is informational: the threshold is
/// [`DEFAULT_THRESHOLD`] for both short and long texts.
pub fn determine_threshold(text: &str) -> ThresholdSelection {
    let words = text.split_whitespace().count();
    let length_type = if words <= SHORT_TEXT_WORD_LIMIT {
        LengthType::Short
    } else {
        LengthType::Long
    };

    ThresholdSelection {
        threshold: DEFAULT_THRESHOLD,
        length_type,
    }
}
