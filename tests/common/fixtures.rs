use image::{ImageBuffer, Rgb, Rgba};
use std::cell::RefCell;
use tempfile::NamedTempFile;

use vehiscan::detection::decode::DecodedFrame;
use vehiscan::{Detector, LabelTable, RawDetections};

/// Creates a width x height RGB gradient test image as a temp PNG.
/// The file is automatically cleaned up when dropped.
pub fn create_test_image(width: u32, height: u32) -> NamedTempFile {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Solid-color variant of `create_test_image`.
pub fn create_solid_image(width: u32, height: u32, color: [u8; 3]) -> NamedTempFile {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb(color));
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// PNG with a varying alpha channel, for exercising channel reduction.
pub fn create_rgba_image(width: u32, height: u32) -> NamedTempFile {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            200,
            ((x * 7 + y * 13) % 256) as u8,
        ])
    });
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Detector double returning a fixed result and recording the byte length of
/// every frame it was handed.
pub struct ScriptedDetector {
    result: RawDetections,
    pub calls: RefCell<Vec<usize>>,
}

impl ScriptedDetector {
    pub fn new(classes: Vec<u32>, scores: Vec<f32>) -> Self {
        Self {
            result: RawDetections { classes, scores },
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Detector for ScriptedDetector {
    fn detect(&self, frame: &DecodedFrame) -> anyhow::Result<RawDetections> {
        self.calls.borrow_mut().push(frame.data().len());
        Ok(self.result.clone())
    }
}

/// Detector double that always fails, like a runtime throwing.
pub struct FailingDetector;

impl Detector for FailingDetector {
    fn detect(&self, _frame: &DecodedFrame) -> anyhow::Result<RawDetections> {
        anyhow::bail!("detector runtime error")
    }
}

/// Small label table covering the traffic classes the app cares about.
pub fn traffic_labels() -> LabelTable {
    LabelTable::from_entries([
        (0, "person".to_string()),
        (1, "bicycle".to_string()),
        (2, "car".to_string()),
        (3, "motorcycle".to_string()),
        (5, "bus".to_string()),
        (7, "truck".to_string()),
    ])
}
