use serde::Serialize;

/// Raw detector output: parallel class-index and confidence arrays.
///
/// Index `i` in `classes` corresponds to index `i` in `scores`. The detector
/// reports a fixed number of slots per inference call; both arrays must be at
/// least that long.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetections {
    pub classes: Vec<u32>,
    pub scores: Vec<f32>,
}

/// A detection that survived thresholding, with its class resolved to a
/// display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledDetection {
    pub label: String,
    pub score: f32,
}

/// Result of one full pipeline run.
///
/// `Empty` means the run succeeded but nothing cleared the confidence
/// threshold. Callers render it as a neutral empty state, never as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Found(Vec<LabeledDetection>),
    Empty,
}

impl ScanOutcome {
    /// Detections in slot order, empty for `Empty`.
    pub fn detections(&self) -> &[LabeledDetection] {
        match self {
            ScanOutcome::Found(detections) => detections,
            ScanOutcome::Empty => &[],
        }
    }
}

/// Stage-level failures. Each pipeline stage maps its own failures onto one
/// of these kinds; a failed stage terminates the run and nothing downstream
/// sees its output.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The detector failed to initialize. The session stays unavailable.
    #[error("model failed to load: {0}")]
    ModelLoad(String),

    /// A run was requested before the model finished loading.
    #[error("model is not loaded")]
    ModelNotReady,

    /// Normalization could not produce a fixed-size encoded image.
    #[error("image processing failed: {0}")]
    ImageProcessing(String),

    /// The normalized bytes could not be decoded into the expected layout.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The external detector call failed or broke its output contract.
    #[error("inference failed: {0}")]
    Inference(String),
}
