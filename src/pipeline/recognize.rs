//! OCR: turn one page image into text.
//!
//! [`TesseractEngine`] drives the `tesseract` command-line program. The image
//! is PNG-encoded into a temporary file (Tesseract reads files, not pipes, on
//! every platform we care about), recognised with plain-text output on
//! stdout, and the temporary file is removed when it goes out of scope.

use crate::config::ExtractionConfig;
use crate::error::OcrError;
use image::{ColorType, DynamicImage};
use std::borrow::Cow;
use std::io::{Cursor, ErrorKind, Write};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Recognises text in a single image.
///
/// Errors should use `page: 0`; the extractor stamps the real page number
/// via [`OcrError::with_page`].
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String, OcrError>;
}

/// Tesseract CLI engine.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    cmd: PathBuf,
    tessdata_dir: Option<PathBuf>,
    psm: Option<u8>,
}

impl TesseractEngine {
    pub fn new(cmd: impl Into<PathBuf>) -> Self {
        Self {
            cmd: cmd.into(),
            tessdata_dir: None,
            psm: None,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            cmd: config.tesseract_cmd.clone(),
            tessdata_dir: config.tessdata_dir.clone(),
            psm: config.page_segmentation_mode,
        }
    }

    /// Return the first line of `tesseract --version`, or an error when the
    /// binary cannot be run.
    pub fn version(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.cmd)
            .arg("--version")
            .output()
            .map_err(|e| self.spawn_error(e))?;

        // Tesseract 3.x printed its version on stderr.
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        Ok(text.lines().next().unwrap_or_default().trim().to_string())
    }

    /// `true` when the configured binary can be executed.
    pub fn is_available(&self) -> bool {
        self.version().is_ok()
    }

    fn build_command(&self, image_path: &std::path::Path, language: &str) -> Command {
        let mut cmd = Command::new(&self.cmd);
        cmd.arg(image_path).arg("stdout").arg("-l").arg(language);
        if let Some(ref dir) = self.tessdata_dir {
            cmd.arg("--tessdata-dir").arg(dir);
        }
        if let Some(psm) = self.psm {
            cmd.arg("--psm").arg(psm.to_string());
        }
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> OcrError {
        if e.kind() == ErrorKind::NotFound || e.kind() == ErrorKind::PermissionDenied {
            OcrError::EngineUnavailable {
                engine: "tesseract".to_string(),
                detail: format!(
                    "cannot run '{}': {}\nInstall tesseract-ocr or set tesseract_cmd / --tesseract-cmd.",
                    self.cmd.display(),
                    e
                ),
            }
        } else {
            OcrError::Internal(format!("failed to spawn '{}': {}", self.cmd.display(), e))
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String, OcrError> {
        let png = encode_png(image)?;

        let mut tmp = tempfile::Builder::new()
            .prefix("edgequake-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Internal(format!("tempfile: {e}")))?;
        tmp.write_all(&png)
            .and_then(|_| tmp.flush())
            .map_err(|e| OcrError::Internal(format!("tempfile write: {e}")))?;

        let output = self
            .build_command(tmp.path(), language)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(OcrError::RecognitionFailed {
                page: 0,
                detail: format!("tesseract exited with {}: {}", output.status, stderr.trim()),
            });
        }
        if !stderr.trim().is_empty() {
            debug!("tesseract stderr: {}", stderr.trim());
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Recognised {} bytes of text", text.len());
        Ok(text)
    }
}

/// PNG-encode an image for Tesseract.
///
/// PNG is lossless, so rendered glyph edges reach the engine untouched.
/// Float images have no PNG representation and are narrowed to 8-bit first.
fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    let img: Cow<'_, DynamicImage> = match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        _ => Cow::Borrowed(image),
    };

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| OcrError::Internal(format!("PNG encoding failed: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb32FImage, Rgba, RgbaImage};

    #[test]
    fn encode_small_image() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])));
        let png = encode_png(&img).expect("encode should succeed");
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn encode_float_image_narrows() {
        let img = DynamicImage::ImageRgb32F(Rgb32FImage::new(4, 4));
        let png = encode_png(&img).expect("float image should be narrowed");
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn command_arguments() {
        let engine = TesseractEngine {
            cmd: PathBuf::from("/usr/bin/tesseract"),
            tessdata_dir: Some(PathBuf::from("/usr/share/tessdata")),
            psm: Some(6),
        };
        let cmd = engine.build_command(std::path::Path::new("/tmp/page.png"), "eng");
        assert_eq!(cmd.get_program(), "/usr/bin/tesseract");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "/tmp/page.png",
                "stdout",
                "-l",
                "eng",
                "--tessdata-dir",
                "/usr/share/tessdata",
                "--psm",
                "6"
            ]
        );
    }

    #[test]
    fn missing_binary_is_engine_unavailable() {
        let engine = TesseractEngine::new("/nonexistent/edgequake-ocr/tesseract");
        let img = DynamicImage::new_luma8(8, 8);
        let err = engine.recognize(&img, "eng").unwrap_err();
        assert!(
            matches!(err, OcrError::EngineUnavailable { ref engine, .. } if engine == "tesseract"),
            "got: {err:?}"
        );
        assert!(!engine.is_available());
    }

    #[test]
    fn from_config_uses_injected_paths() {
        let config = ExtractionConfig::builder()
            .tesseract_cmd("C:/Tools/Tesseract-OCR/tesseract.exe")
            .page_segmentation_mode(4)
            .build()
            .unwrap();
        let engine = TesseractEngine::from_config(&config);
        assert_eq!(
            engine.cmd,
            PathBuf::from("C:/Tools/Tesseract-OCR/tesseract.exe")
        );
        assert_eq!(engine.psm, Some(4));
    }
}
