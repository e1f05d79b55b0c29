//! Image decoding: raw upload bytes → `DynamicImage`.
//!
//! The container format is guessed from the bytes themselves, never from
//! the caller's file-type tag, so a `.jpg` that is really a PNG still works.

use crate::error::OcrError;
use image::DynamicImage;
use tracing::debug;

/// Decode `bytes` as a single raster image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, OcrError> {
    if bytes.is_empty() {
        return Err(OcrError::DecodeFailed {
            detail: "input is empty".to_string(),
        });
    }

    let format = image::guess_format(bytes).map_err(|e| OcrError::DecodeFailed {
        detail: format!("unrecognised image format: {}", e),
    })?;

    let img =
        image::load_from_memory_with_format(bytes, format).map_err(|e| OcrError::DecodeFailed {
            detail: format!("{:?} image is corrupt: {}", format, e),
        })?;

    debug!(
        "Decoded {:?} image → {}x{} px",
        format,
        img.width(),
        img.height()
    );
    Ok(img)
}
