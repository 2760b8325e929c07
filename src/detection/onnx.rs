use std::path::Path;
use tract_onnx::prelude::*;

use crate::detection::decode::DecodedFrame;
use crate::detection::detector::{Detector, DetectorSpec};
use crate::models::{RawDetections, ScanError};

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Detector backed by an ONNX model file run through tract.
pub struct OnnxDetector {
    model: OnnxPlan,
    spec: DetectorSpec,
}

impl OnnxDetector {
    /// Load and optimize the model. The file is read once; the loaded plan is
    /// read-only afterwards and lives as long as the detector.
    pub fn load(path: &Path, spec: DetectorSpec) -> Result<Self, ScanError> {
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| ScanError::ModelLoad(format!("{}: {}", path.display(), e)))?;

        Ok(Self { model, spec })
    }

    pub fn spec(&self) -> &DetectorSpec {
        &self.spec
    }
}

impl Detector for OnnxDetector {
    fn detect(&self, frame: &DecodedFrame) -> anyhow::Result<RawDetections> {
        let size = self.spec.input_size;
        anyhow::ensure!(
            frame.width() == size && frame.height() == size,
            "frame is {}x{}, model expects {}x{}",
            frame.width(),
            frame.height(),
            size,
            size
        );

        let input = Tensor::from_shape(
            &[1, size as usize, size as usize, 3],
            frame.data(),
        )?;
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;

        let classes = output_buffer(&outputs, self.spec.classes_output)?;
        let scores = output_buffer(&outputs, self.spec.scores_output)?;

        Ok(RawDetections {
            classes: classes.iter().map(|&class| class as u32).collect(),
            scores,
        })
    }
}

fn output_buffer(outputs: &TVec<TValue>, index: usize) -> anyhow::Result<Vec<f32>> {
    let buffer = outputs
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("model has no output buffer {}", index))?;
    let view = buffer.to_array_view::<f32>()?;
    Ok(view.iter().copied().collect())
}
