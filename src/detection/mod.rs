pub mod decode;
pub mod detector;
pub mod labels;
pub mod normalize;
pub mod onnx;
pub mod postprocess;

use std::path::Path;
use tracing::info;

use crate::detection::detector::Detector;
use crate::detection::labels::LabelTable;
use crate::models::{ScanError, ScanOutcome};
use crate::pipeline::RunLog;

/// Tuning parameters for one pipeline instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Detector input edge length; normalized images are exactly this square.
    pub input_size: u32,
    /// Quality used when re-encoding the normalized JPEG.
    pub jpeg_quality: u8,
    /// A detection is reported only if its score strictly exceeds this.
    pub threshold: f32,
    /// Number of detection slots the model reports per inference call.
    pub slots: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_size: 320,
            jpeg_quality: 100,
            threshold: 0.4,
            slots: 25,
        }
    }
}

/// The capture pipeline: normalize, decode, infer, post-process.
///
/// Stages run strictly forward; the first failure terminates the run and no
/// stage ever sees output of a failed predecessor. Every intermediate
/// artifact is created fresh per run and dropped when the run ends.
pub struct ScanPipeline {
    config: PipelineConfig,
    labels: LabelTable,
}

impl ScanPipeline {
    pub fn new(config: PipelineConfig, labels: LabelTable) -> Self {
        Self { config, labels }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Run all four stages on one source image.
    ///
    /// Each stage appends a line to `log`; stage failures are logged with a
    /// short description before the run aborts.
    pub fn run(
        &self,
        detector: &dyn Detector,
        source: &Path,
        log: &mut RunLog,
    ) -> Result<ScanOutcome, ScanError> {
        log.push(format!("Processing {}", source.display()));

        let normalized =
            match normalize::normalize(source, self.config.input_size, self.config.jpeg_quality) {
                Ok(normalized) => normalized,
                Err(e) => {
                    log.push(format!("Image processing error: {}", e));
                    return Err(e);
                }
            };
        info!(
            "normalized {} to {}x{}",
            source.display(),
            normalized.size(),
            normalized.size()
        );
        log.push(format!(
            "Normalized to {}x{}",
            normalized.size(),
            normalized.size()
        ));

        let frame = match decode::decode(normalized.path(), normalized.size()) {
            Ok(frame) => frame,
            Err(e) => {
                log.push(format!("Decode error: {}", e));
                return Err(e);
            }
        };
        info!("decoded {} bytes of pixel data", frame.data().len());
        log.push(format!("Decoded {} bytes of pixel data", frame.data().len()));

        let raw = match detector.detect(&frame) {
            Ok(raw) => raw,
            Err(e) => {
                let e = ScanError::Inference(e.to_string());
                log.push(format!("Inference error: {}", e));
                return Err(e);
            }
        };
        log.push(format!("Detector returned {} slots", raw.classes.len()));

        let outcome = match postprocess::label_detections(
            &raw,
            &self.labels,
            self.config.threshold,
            self.config.slots,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                log.push(format!("Inference error: {}", e));
                return Err(e);
            }
        };

        match &outcome {
            ScanOutcome::Found(detections) => {
                info!("{} detection(s) above threshold", detections.len());
                log.push(format!(
                    "{} detection(s) above threshold {}",
                    detections.len(),
                    self.config.threshold
                ));
            }
            ScanOutcome::Empty => {
                info!("no detections above threshold");
                log.push("No detections found");
            }
        }

        Ok(outcome)
    }
}

impl Default for ScanPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default(), LabelTable::default())
    }
}
