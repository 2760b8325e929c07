use image::ImageReader;
use std::io::Cursor;
use std::path::Path;

use crate::models::ScanError;

/// Flat interleaved R,G,B pixel buffer, row-major, no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl DecodedFrame {
    /// Always exactly width * height * 3 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Read a normalized image back and reduce it to a three-channel buffer.
///
/// The encoded bytes are read fully into memory, decoded to interleaved RGBA
/// samples, and the alpha channel is dropped. The decoded dimensions must
/// match `expected_size` exactly.
pub fn decode(path: &Path, expected_size: u32) -> Result<DecodedFrame, ScanError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ScanError::Decode(format!("cannot read {}: {}", path.display(), e)))?;

    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ScanError::Decode(format!("cannot sniff image format: {}", e)))?
        .decode()
        .map_err(|e| ScanError::Decode(format!("cannot decode {}: {}", path.display(), e)))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width != expected_size || height != expected_size {
        return Err(ScanError::Decode(format!(
            "decoded frame is {}x{}, expected {}x{}",
            width, height, expected_size, expected_size
        )));
    }

    let data = strip_alpha(rgba.as_raw())?;
    Ok(DecodedFrame { data, width, height })
}

/// Copy the first three of every four samples, discarding the fourth.
///
/// Order-preserving: output pixel k's bytes equal input pixel k's R, G, B.
/// A sample count that is not a multiple of four fails fast rather than
/// truncating or wrapping.
pub fn strip_alpha(samples: &[u8]) -> Result<Vec<u8>, ScanError> {
    if samples.len() % 4 != 0 {
        return Err(ScanError::Decode(format!(
            "sample count {} is not a multiple of 4",
            samples.len()
        )));
    }

    let mut rgb = Vec::with_capacity(samples.len() / 4 * 3);
    for pixel in samples.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }
    Ok(rgb)
}
