use crate::detection::labels::LabelTable;
use crate::models::{LabeledDetection, RawDetections, ScanError, ScanOutcome};

/// Filter raw detections by confidence and resolve class indices to labels.
///
/// Only the first `slots` positions are considered; the model reports a fixed
/// number of slots per call and anything beyond them is padding. A detection
/// is kept iff its score is strictly greater than `threshold`. Slot order is
/// preserved in the output; results are not sorted by confidence.
pub fn label_detections(
    raw: &RawDetections,
    labels: &LabelTable,
    threshold: f32,
    slots: usize,
) -> Result<ScanOutcome, ScanError> {
    if raw.classes.len() != raw.scores.len() {
        return Err(ScanError::Inference(format!(
            "class and score arrays have lengths {} and {}",
            raw.classes.len(),
            raw.scores.len()
        )));
    }
    if raw.classes.len() < slots {
        return Err(ScanError::Inference(format!(
            "detector reported {} slots, expected at least {}",
            raw.classes.len(),
            slots
        )));
    }

    let mut detections = Vec::new();
    for i in 0..slots {
        if raw.scores[i] > threshold {
            detections.push(LabeledDetection {
                label: labels.lookup(raw.classes[i]),
                score: raw.scores[i],
            });
        }
    }

    if detections.is_empty() {
        Ok(ScanOutcome::Empty)
    } else {
        Ok(ScanOutcome::Found(detections))
    }
}
