use crate::detection::decode::DecodedFrame;
use crate::models::RawDetections;

/// Boundary to the external pretrained detector.
///
/// Implementations receive the flat W*H*3 pixel buffer and return the raw
/// parallel class/score arrays. Anything the runtime throws is surfaced as an
/// error here and mapped to an inference failure by the pipeline; no partial
/// detections are ever returned.
pub trait Detector {
    fn detect(&self, frame: &DecodedFrame) -> anyhow::Result<RawDetections>;
}

/// Output-signature configuration for a concrete model file.
///
/// The input size and the positions of the class and score buffers in the
/// model's output list are fixed by the bundled model's signature. They are
/// configuration, not something inferred at runtime; a different model means
/// a different spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorSpec {
    /// Expected input edge length (input tensor is 1 x size x size x 3).
    pub input_size: u32,
    /// Index of the output buffer holding per-detection class indices.
    pub classes_output: usize,
    /// Index of the output buffer holding per-detection confidence scores.
    pub scores_output: usize,
}

impl Default for DetectorSpec {
    fn default() -> Self {
        Self {
            input_size: 320,
            classes_output: 1,
            scores_output: 2,
        }
    }
}
