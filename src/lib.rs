pub mod detection;
pub mod models;
pub mod pipeline;

pub use detection::detector::{Detector, DetectorSpec};
pub use detection::labels::LabelTable;
pub use detection::onnx::OnnxDetector;
pub use detection::{PipelineConfig, ScanPipeline};
pub use models::{LabeledDetection, RawDetections, ScanError, ScanOutcome};
pub use pipeline::{LogEntry, RunLog, ScanSession, SessionState};

#[cfg(feature = "gui")]
pub mod gui;
