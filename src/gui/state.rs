use std::path::PathBuf;

use crate::{OnnxDetector, ScanOutcome, ScanSession};

/// State owned by the scan window: the session (model, log, state machine)
/// and the last run's outcome.
pub struct AppState {
    pub session: ScanSession<OnnxDetector>,
    pub outcome: Option<ScanOutcome>,
    pub model_path: PathBuf,
}
