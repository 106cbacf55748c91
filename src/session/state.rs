use crate::emotions::{enrich_predictions, EnrichedPrediction};
use crate::prediction::{LengthType, NormalizedPrediction};
use serde::Serialize;

/// Result of the latest completed submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub predictions: Vec<NormalizedPrediction>,
    pub threshold: Option<f64>,
    pub length_type: Option<LengthType>,
}

/// Everything the front-ends need to render a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub text: String,
    pub analysis: Analysis,
    pub is_loading: bool,
    pub error: Option<String>,
    /// A non-empty text was submitted since the last clear.
    pub has_attempt: bool,
}

/// What the result panel should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    /// Nothing submitted yet.
    Idle,
    Loading,
    Failed(String),
    /// The service answered but no emotion survived normalization.
    Empty,
    Ranked {
        primary: EnrichedPrediction,
        /// Top predictions, primary included.
        ranking: Vec<EnrichedPrediction>,
    },
}

impl SessionState {
    pub fn view(&self, max_ranked: usize) -> ResultView {
        if !self.has_attempt {
            return ResultView::Idle;
        }
        if self.is_loading {
            return ResultView::Loading;
        }
        if let Some(error) = &self.error {
            return ResultView::Failed(error.clone());
        }

        let ranking = enrich_predictions(&self.analysis.predictions);
        match ranking.first().cloned() {
            None => ResultView::Empty,
            Some(primary) => ResultView::Ranked {
                primary,
                ranking: ranking.into_iter().take(max_ranked).collect(),
            },
        }
    }
}
