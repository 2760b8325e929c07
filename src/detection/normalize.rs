use image::ImageReader;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::models::ScanError;

/// A freshly re-encoded square image matching the detector's input size.
///
/// Owns its temporary file; the file is removed when the value is dropped,
/// so normalized images never outlive the run that produced them.
#[derive(Debug)]
pub struct NormalizedImage {
    file: NamedTempFile,
    size: u32,
}

impl NormalizedImage {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Edge length; width and height are always equal.
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Resize the source to size x size and re-encode it as baseline JPEG.
///
/// Arbitrary aspect ratios are accepted; the image is stretched, not cropped.
/// The source file is never modified.
pub fn normalize(source: &Path, size: u32, quality: u8) -> Result<NormalizedImage, ScanError> {
    let img = ImageReader::open(source)
        .map_err(|e| ScanError::ImageProcessing(format!("cannot open {}: {}", source.display(), e)))?
        .with_guessed_format()
        .map_err(|e| ScanError::ImageProcessing(format!("cannot read {}: {}", source.display(), e)))?
        .decode()
        .map_err(|e| {
            ScanError::ImageProcessing(format!("cannot decode {}: {}", source.display(), e))
        })?;

    let resized = img.resize_exact(size, size, FilterType::Triangle);

    let mut file = tempfile::Builder::new()
        .prefix("vehiscan-")
        .suffix(".jpg")
        .tempfile()
        .map_err(|e| ScanError::ImageProcessing(format!("cannot create temp file: {}", e)))?;

    let encoder = JpegEncoder::new_with_quality(&mut file, quality);
    resized
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| ScanError::ImageProcessing(format!("cannot encode jpeg: {}", e)))?;

    Ok(NormalizedImage { file, size })
}
