//! Submission lifecycle of the analysis form.
//!
//! Only the latest submission may update the session: starting a new one
//! cancels the request in flight, and a response belonging to an older
//! generation is dropped instead of overwriting newer state.

use super::state::{Analysis, ResultView, SessionState};
use crate::emotions::{known_labels, suggestion, KnownLabels};
use crate::prediction::{determine_threshold, normalize_predictions};
use crate::predictor::{parse_endpoint, EmotionPredictor, PredictRequest};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Trimmed texts shorter than this cannot be submitted.
pub const MIN_SUBMIT_CHARS: usize = 5;

/// How many predictions the ranking shows by default.
pub const DEFAULT_MAX_RANKED: usize = 8;

pub const THRESHOLD_HINT: &str =
    "Default threshold 0.09 applied automatically for this text length.";

pub const IDLE_PLACEHOLDER: &str =
    "Paste or type any message to reveal its emotional fingerprint in real time.";

pub const EMPTY_RESULT_MESSAGE: &str = "No emotions passed the current threshold, but your text is captured. Try adding more detail or lowering the threshold to surface subtler tones.";

/// User-facing message for any transport or service failure.
pub fn service_unavailable_message(origin: &str) -> String {
    format!(
        "Не удалось получить ответ от сервиса. Убедитесь, что API доступен по {} и попробуйте ещё раз.",
        origin
    )
}

/// How a call to [`AnalysisSession::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The text was blank; the result was discarded without a request.
    Cleared,
    /// The service answered; `predictions` survived normalization.
    Completed { predictions: usize },
    /// The request failed; the session now shows the error message.
    Failed,
    /// A newer submission started before this one finished.
    Superseded,
}

struct Inner {
    state: SessionState,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl Inner {
    /// Cancels the request in flight, if any, and starts a new generation.
    fn next_generation(&mut self) -> u64 {
        if let Some(token) = self.in_flight.take() {
            debug!(generation = self.generation, "Cancelling superseded request");
            token.cancel();
        }
        self.generation += 1;
        self.generation
    }
}

/// State of one analysis form, shared by whoever drives it.
pub struct AnalysisSession {
    predictor: Arc<dyn EmotionPredictor>,
    known_labels: KnownLabels,
    failure_message: String,
    inner: Mutex<Inner>,
}

impl AnalysisSession {
    /// Create a session recognizing the built-in emotion labels.
    pub fn new(predictor: Arc<dyn EmotionPredictor>) -> Self {
        Self::with_known_labels(predictor, known_labels().clone())
    }

    pub fn with_known_labels(predictor: Arc<dyn EmotionPredictor>, known_labels: KnownLabels) -> Self {
        let origin = parse_endpoint(predictor.endpoint())
            .map(|url| url.origin().ascii_serialization())
            .unwrap_or_else(|_| predictor.endpoint().to_string());

        Self {
            predictor,
            known_labels,
            failure_message: service_unavailable_message(&origin),
            inner: Mutex::new(Inner {
                state: SessionState::default(),
                generation: 0,
                in_flight: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn predictor(&self) -> &Arc<dyn EmotionPredictor> {
        &self.predictor
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.lock().state.text = text.into();
    }

    /// Whether the current text may be submitted.
    pub fn can_submit(&self) -> bool {
        let inner = self.lock();
        !inner.state.is_loading && inner.state.text.trim().chars().count() >= MIN_SUBMIT_CHARS
    }

    /// Submits whatever text the session currently holds.
    pub async fn submit_current(&self) -> SubmissionOutcome {
        let text = self.lock().state.text.clone();
        self.submit(&text).await
    }

    /// Replaces the text with the 1-based sample `index` and submits it.
    ///
    /// Returns `None` when there is no such sample.
    pub async fn submit_sample(&self, index: usize) -> Option<SubmissionOutcome> {
        let text = suggestion(index)?;
        Some(self.submit(text).await)
    }

    /// Sets the text and runs a prediction for it.
    ///
    /// A blank text clears the previous result without contacting the
    /// service. Otherwise the result is fully replaced with the new
    /// predictions, or cleared and replaced by the failure message.
    pub async fn submit(&self, text: &str) -> SubmissionOutcome {
        let trimmed = text.trim();

        let (generation, token, selection) = {
            let mut inner = self.lock();
            inner.state.text = text.to_string();
            let generation = inner.next_generation();

            if trimmed.is_empty() {
                inner.state.analysis = Analysis::default();
                inner.state.has_attempt = false;
                inner.state.error = None;
                inner.state.is_loading = false;
                return SubmissionOutcome::Cleared;
            }

            let selection = determine_threshold(trimmed);
            let token = CancellationToken::new();
            inner.in_flight = Some(token.clone());
            inner.state.is_loading = true;
            inner.state.error = None;
            inner.state.has_attempt = true;
            (generation, token, selection)
        };

        info!(
            generation,
            predictor = self.predictor.name(),
            length_type = ?selection.length_type,
            "Running prediction"
        );

        let request = PredictRequest::new(trimmed, selection.threshold);
        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = self.predictor.predict(&request) => Some(result),
        };

        let mut inner = self.lock();
        let result = match result {
            Some(result) if inner.generation == generation => result,
            _ => {
                debug!(generation, "Discarding superseded prediction");
                return SubmissionOutcome::Superseded;
            }
        };

        inner.in_flight = None;
        inner.state.is_loading = false;

        match result {
            Ok(body) => {
                let predictions = normalize_predictions(&body, &self.known_labels);
                let count = predictions.len();
                debug!(generation, predictions = count, "Prediction completed");
                inner.state.analysis = Analysis {
                    predictions,
                    threshold: Some(selection.threshold),
                    length_type: Some(selection.length_type),
                };
                SubmissionOutcome::Completed { predictions: count }
            }
            Err(e) => {
                warn!(generation, error = %e, "Prediction failed");
                inner.state.analysis = Analysis {
                    predictions: Vec::new(),
                    threshold: Some(selection.threshold),
                    length_type: Some(selection.length_type),
                };
                inner.state.error = Some(self.failure_message.clone());
                SubmissionOutcome::Failed
            }
        }
    }

    /// Discards the text, the result and any request in flight.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.next_generation();
        inner.state = SessionState::default();
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn view(&self, max_ranked: usize) -> ResultView {
        self.lock().state.view(max_ranked)
    }

    /// Hint shown next to the threshold once a text was classified.
    pub fn threshold_hint(&self) -> Option<&'static str> {
        self.lock()
            .state
            .analysis
            .length_type
            .map(|_| THRESHOLD_HINT)
    }
}
