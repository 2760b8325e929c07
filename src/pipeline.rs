use std::path::Path;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

use crate::detection::ScanPipeline;
use crate::detection::detector::Detector;
use crate::models::{ScanError, ScanOutcome};

/// One timestamped line of the user-visible run log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: OffsetDateTime,
    pub message: String,
}

impl LogEntry {
    pub fn display_line(&self) -> String {
        match self.at.format(&Rfc3339) {
            Ok(stamp) => format!("[{}] {}", stamp, self.message),
            Err(_) => self.message.clone(),
        }
    }
}

/// In-memory log of pipeline activity, newest entry first.
///
/// Diagnostic output for display to the user; not a contract anyone should
/// parse.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a line; `entries()[0]` is always the most recent.
    pub fn push(&mut self, message: impl Into<String>) {
        let at = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.entries.insert(
            0,
            LogEntry {
                at,
                message: message.into(),
            },
        );
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lifecycle of a scan session.
///
/// `Failed` is entered only by an unsuccessful model load and is persistent;
/// stage failures during a run return the session to `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ModelLoading,
    Ready,
    Capturing,
    Processing,
    Failed,
}

/// Owns the loaded detector, the pipeline, and the run log for one hosting
/// view, and enforces the session's state transitions.
///
/// One run exists at a time: `begin_capture` is the busy guard hosts check
/// before starting a new capture, and a run requested while no model is
/// loaded is rejected before the detector is touched.
pub struct ScanSession<D> {
    pipeline: ScanPipeline,
    detector: Option<D>,
    state: SessionState,
    log: RunLog,
}

impl<D: Detector> ScanSession<D> {
    pub fn new(pipeline: ScanPipeline) -> Self {
        Self {
            pipeline,
            detector: None,
            state: SessionState::Idle,
            log: RunLog::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    pub fn pipeline(&self) -> &ScanPipeline {
        &self.pipeline
    }

    /// Idle -> ModelLoading. Returns false if loading already started.
    pub fn begin_model_load(&mut self) -> bool {
        if self.state != SessionState::Idle {
            return false;
        }
        self.state = SessionState::ModelLoading;
        self.log.push("Loading detector model");
        true
    }

    /// ModelLoading -> Ready, or Failed on error.
    ///
    /// A failed load is persistent: the session never becomes available and
    /// the error stays visible as its status. The model is never re-loaded
    /// implicitly.
    pub fn finish_model_load(&mut self, result: Result<D, ScanError>) -> Result<(), ScanError> {
        match result {
            Ok(detector) => {
                self.detector = Some(detector);
                self.state = SessionState::Ready;
                self.log.push("Model loaded, ready to scan");
                Ok(())
            }
            Err(e) => {
                warn!("model load failed: {}", e);
                self.state = SessionState::Failed;
                self.log.push(format!("Model load error: {}", e));
                Err(e)
            }
        }
    }

    /// Convenience for hosts that load synchronously.
    pub fn load_model(
        &mut self,
        load: impl FnOnce() -> Result<D, ScanError>,
    ) -> Result<(), ScanError> {
        if !self.begin_model_load() {
            return Err(ScanError::ModelLoad(
                "session was already initialized".to_string(),
            ));
        }
        self.finish_model_load(load())
    }

    /// Ready -> Capturing. Returns false while busy or unavailable; hosts use
    /// this as the single-flight guard before opening a picker or shutter.
    pub fn begin_capture(&mut self) -> bool {
        if self.state != SessionState::Ready {
            return false;
        }
        self.state = SessionState::Capturing;
        true
    }

    /// Capturing -> Ready. A cancelled pick is a no-op, not an error.
    pub fn cancel_capture(&mut self) {
        if self.state == SessionState::Capturing {
            self.state = SessionState::Ready;
        }
    }

    /// Run the pipeline once on the acquired source image.
    ///
    /// Rejected, before the detector is touched, if no model is loaded. Any
    /// stage failure is logged, terminates the run, and returns the session
    /// to `Ready` so the user may retry from acquisition.
    pub fn process(&mut self, source: &Path) -> Result<ScanOutcome, ScanError> {
        let Some(detector) = self.detector.as_ref() else {
            warn!("run rejected: model is not loaded");
            self.log.push("Run rejected: model is not loaded");
            return Err(ScanError::ModelNotReady);
        };

        self.state = SessionState::Processing;
        let result = self.pipeline.run(detector, source, &mut self.log);
        self.state = SessionState::Ready;
        result
    }
}
