//! Serializable summary of an analysis, and small formatting helpers.

use crate::emotions::{enrich_predictions, EnrichedPrediction};
use crate::prediction::{LengthType, NormalizedPrediction};
use crate::session::SessionState;
use serde::Serialize;

/// Formats a `[0, 1]` score as a whole percentage, e.g. `0.456` -> `"46%"`.
pub fn format_percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

/// Horizontal bar of `width` cells, filled in proportion to `score`.
pub fn score_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub threshold: Option<f64>,
    pub length_type: Option<LengthType>,
    pub primary: Option<EnrichedPrediction>,
    pub ranking: Vec<EnrichedPrediction>,
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Report of a session's latest submission.
    pub fn from_state(state: &SessionState, max_ranked: usize) -> Self {
        let mut report = Self::from_predictions(&state.analysis.predictions, max_ranked);
        report.text = Some(state.text.trim().to_string()).filter(|t| !t.is_empty());
        report.threshold = state.analysis.threshold;
        report.length_type = state.analysis.length_type;
        report.error = state.error.clone();
        report
    }

    /// Report of already normalized predictions, without request details.
    pub fn from_predictions(predictions: &[NormalizedPrediction], max_ranked: usize) -> Self {
        let ranking: Vec<_> = enrich_predictions(predictions)
            .into_iter()
            .take(max_ranked)
            .collect();
        Self {
            text: None,
            threshold: None,
            length_type: None,
            primary: ranking.first().cloned(),
            ranking,
            error: None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Analysis;

    fn prediction(id: &str, score: f64) -> NormalizedPrediction {
        NormalizedPrediction {
            id: id.to_string(),
            raw_label: id.to_string(),
            score,
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(0.456), "46%");
        assert_eq!(format_percent(0.125), "13%");
        assert_eq!(format_percent(1.0), "100%");
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0.5, 10), "█████░░░░░");
        assert_eq!(score_bar(0.0, 4), "░░░░");
        assert_eq!(score_bar(1.0, 4), "████");
        assert_eq!(score_bar(3.0, 4), "████");
    }

    #[test]
    fn test_report_from_state() {
        let state = SessionState {
            text: "  Such a relief  ".to_string(),
            analysis: Analysis {
                predictions: vec![prediction("relief", 0.8), prediction("joy", 0.3)],
                threshold: Some(0.09),
                length_type: Some(LengthType::Short),
            },
            has_attempt: true,
            ..Default::default()
        };

        let report = AnalysisReport::from_state(&state, 1);
        assert_eq!(report.text.as_deref(), Some("Such a relief"));
        assert_eq!(report.primary.as_ref().unwrap().title, "Relief");
        assert_eq!(report.ranking.len(), 1);

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["length_type"], "short");
        assert_eq!(json["ranking"][0]["id"], "relief");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_report_without_predictions() {
        let report = AnalysisReport::from_predictions(&[], 8);
        assert!(report.primary.is_none());
        assert!(report.ranking.is_empty());
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert!(json.get("text").is_none());
    }
}
