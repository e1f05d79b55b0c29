//! Configuration types for text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. Engine locations (the Tesseract
//! command and the pdfium library) live here as plain values handed to the
//! extractor at construction time; nothing is read from or written to
//! process-wide state.

use crate::error::OcrError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for an OCR extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_ocr::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .tesseract_cmd("/usr/local/bin/tesseract")
///     .language("eng+deu")
///     .dpi(300)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Name or path of the Tesseract executable. Default: `"tesseract"`,
    /// resolved through `PATH`.
    pub tesseract_cmd: PathBuf,

    /// Directory holding `*.traineddata` files, passed as `--tessdata-dir`.
    /// If None, Tesseract uses its compiled-in default.
    pub tessdata_dir: Option<PathBuf>,

    /// Tesseract language code(s), e.g. `"eng"` or `"eng+fra"`. Default: `"eng"`.
    pub language: String,

    /// Tesseract page segmentation mode (`--psm`, 0–13).
    /// If None, Tesseract's default (3, fully automatic) applies.
    pub page_segmentation_mode: Option<u8>,

    /// Explicit pdfium shared library, either the file itself or the
    /// directory containing it. If None, the system library is used.
    pub pdfium_lib_path: Option<PathBuf>,

    /// Rendering DPI used when rasterising PDF pages. Range: 72–600. Default: 200.
    ///
    /// Tesseract is tuned for glyphs around 20–30 px tall; 200 DPI puts
    /// 10 pt body text in that band. Raise to 300 for small print.
    pub dpi: u32,

    /// Maximum rendered image dimension (width or height) in pixels. Default: 5000.
    ///
    /// Caps memory on oversized pages (posters, engineering drawings) where
    /// the DPI alone would produce a huge bitmap.
    pub max_rendered_pixels: u32,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Reject unknown `file_type` tags instead of treating them as images. Default: false.
    pub strict_file_type: bool,

    /// Receives per-page events while an extraction runs.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from("tesseract"),
            tessdata_dir: None,
            language: "eng".to_string(),
            page_segmentation_mode: None,
            pdfium_lib_path: None,
            dpi: 200,
            max_rendered_pixels: 5000,
            password: None,
            strict_file_type: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("tesseract_cmd", &self.tesseract_cmd)
            .field("tessdata_dir", &self.tessdata_dir)
            .field("language", &self.language)
            .field("page_segmentation_mode", &self.page_segmentation_mode)
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field("dpi", &self.dpi)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("strict_file_type", &self.strict_file_type)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve a caller-supplied file-type tag according to `strict_file_type`.
    pub fn resolve_file_type(&self, tag: &str) -> Result<FileType, OcrError> {
        if self.strict_file_type {
            FileType::parse_strict(tag)
        } else {
            Ok(FileType::from_tag(tag))
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.config.tesseract_cmd = cmd.into();
        self
    }

    pub fn tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.tessdata_dir = Some(dir.into());
        self
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.config.language = lang.into();
        self
    }

    pub fn page_segmentation_mode(mut self, psm: u8) -> Self {
        self.config.page_segmentation_mode = Some(psm);
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 600);
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn strict_file_type(mut self, v: bool) -> Self {
        self.config.strict_file_type = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, OcrError> {
        let c = &self.config;
        if c.language.trim().is_empty() {
            return Err(OcrError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if c.tesseract_cmd.as_os_str().is_empty() {
            return Err(OcrError::InvalidConfig(
                "Tesseract command must not be empty".into(),
            ));
        }
        if c.dpi < 72 || c.dpi > 600 {
            return Err(OcrError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if let Some(psm) = c.page_segmentation_mode {
            if psm > 13 {
                return Err(OcrError::InvalidConfig(format!(
                    "Page segmentation mode must be 0–13, got {}",
                    psm
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which extraction path an input takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Rasterise every page, then OCR each one.
    Pdf,
    /// Decode the bytes as a single raster image. (default)
    #[default]
    Image,
}

/// Tags accepted by [`FileType::parse_strict`] for the image path.
const IMAGE_TAGS: &[&str] = &[
    "image", "png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp",
];

impl FileType {
    /// Lenient mapping: exactly `"pdf"` in any letter case is a PDF, everything
    /// else (including `""`, typos and padded tags like `" pdf "`) is an image.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("pdf") {
            FileType::Pdf
        } else {
            FileType::Image
        }
    }

    /// Strict mapping against the known tag set. Surrounding whitespace is
    /// ignored.
    pub fn parse_strict(tag: &str) -> Result<Self, OcrError> {
        let t = tag.trim();
        if t.eq_ignore_ascii_case("pdf") {
            Ok(FileType::Pdf)
        } else if IMAGE_TAGS.iter().any(|k| t.eq_ignore_ascii_case(k)) {
            Ok(FileType::Image)
        } else {
            Err(OcrError::UnsupportedFileType {
                file_type: tag.to_string(),
            })
        }
    }

    /// Guess the type from a file extension; `None` when there is no extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(FileType::from_tag)
    }

    /// Detect a PDF by its `%PDF` magic bytes.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF") {
            FileType::Pdf
        } else {
            FileType::Image
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Image => "image",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ExtractionConfig::default();
        assert_eq!(c.language, "eng");
        assert_eq!(c.tesseract_cmd, PathBuf::from("tesseract"));
        assert_eq!(c.dpi, 200);
        assert!(!c.strict_file_type);
        assert!(c.pdfium_lib_path.is_none());
    }

    #[test]
    fn builder_clamps_dpi() {
        let c = ExtractionConfig::builder().dpi(10_000).build().unwrap();
        assert_eq!(c.dpi, 600);
        let c = ExtractionConfig::builder().dpi(1).build().unwrap();
        assert_eq!(c.dpi, 72);
    }

    #[test]
    fn builder_rejects_empty_language() {
        let err = ExtractionConfig::builder().language("  ").build().unwrap_err();
        assert!(matches!(err, OcrError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_empty_command() {
        let err = ExtractionConfig::builder()
            .tesseract_cmd("")
            .build()
            .unwrap_err();
        assert!(matches!(err, OcrError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_bad_psm() {
        let err = ExtractionConfig::builder()
            .page_segmentation_mode(14)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("0–13"));
        assert!(ExtractionConfig::builder()
            .page_segmentation_mode(6)
            .build()
            .is_ok());
    }

    #[test]
    fn debug_redacts_password() {
        let c = ExtractionConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{:?}", c);
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn pdf_tag_is_case_insensitive() {
        for tag in ["pdf", "PDF", "Pdf", "pDF"] {
            assert_eq!(FileType::from_tag(tag), FileType::Pdf, "tag {tag:?}");
        }
    }

    #[test]
    fn padded_pdf_tag_is_not_a_pdf() {
        for tag in [" pdf ", "pdf\n", " PDF", ".pdf"] {
            assert_eq!(FileType::from_tag(tag), FileType::Image, "tag {tag:?}");
        }
    }

    #[test]
    fn unknown_tags_fall_back_to_image() {
        for tag in ["", "image", "png", "pdg", "docx"] {
            assert_eq!(FileType::from_tag(tag), FileType::Image, "tag {tag:?}");
        }
    }

    #[test]
    fn strict_parsing() {
        assert_eq!(FileType::parse_strict("PDF").unwrap(), FileType::Pdf);
        assert_eq!(FileType::parse_strict("JPEG").unwrap(), FileType::Image);
        assert!(matches!(
            FileType::parse_strict("pdg"),
            Err(OcrError::UnsupportedFileType { .. })
        ));
        assert!(FileType::parse_strict("").is_err());
    }

    #[test]
    fn resolve_respects_strict_flag() {
        let lenient = ExtractionConfig::default();
        assert_eq!(lenient.resolve_file_type("pdg").unwrap(), FileType::Image);

        let strict = ExtractionConfig::builder()
            .strict_file_type(true)
            .build()
            .unwrap();
        assert!(strict.resolve_file_type("pdg").is_err());
        assert_eq!(strict.resolve_file_type("Pdf").unwrap(), FileType::Pdf);
    }

    #[test]
    fn from_path_and_sniff() {
        assert_eq!(
            FileType::from_path(Path::new("scan.PDF")),
            Some(FileType::Pdf)
        );
        assert_eq!(
            FileType::from_path(Path::new("photo.jpg")),
            Some(FileType::Image)
        );
        assert_eq!(FileType::from_path(Path::new("README")), None);
        assert_eq!(FileType::sniff(b"%PDF-1.7\n"), FileType::Pdf);
        assert_eq!(FileType::sniff(b"\x89PNG\r\n"), FileType::Image);
    }
}
