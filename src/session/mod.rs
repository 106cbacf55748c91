mod analysis;
mod state;

pub use analysis::{
    service_unavailable_message, AnalysisSession, SubmissionOutcome, DEFAULT_MAX_RANKED,
    EMPTY_RESULT_MESSAGE, IDLE_PLACEHOLDER, MIN_SUBMIT_CHARS, THRESHOLD_HINT,
};
pub use state::{Analysis, ResultView, SessionState};
