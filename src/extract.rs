//! Extraction entry points.
//!
//! [`TextExtractor`] owns its configuration and its two engine collaborators
//! (a [`Rasterizer`] for PDFs and an [`OcrEngine`] for every page image).
//! [`extract_text_from_file`] is the one-call convenience wrapper with the
//! default Tesseract + pdfium setup.

use crate::config::{ExtractionConfig, FileType};
use crate::error::OcrError;
use crate::output::{Extraction, ExtractionStats, PageText};
use crate::pipeline::decode::decode_image;
use crate::pipeline::postprocess::{clean_page_text, join_pages};
use crate::pipeline::recognize::{OcrEngine, TesseractEngine};
use crate::pipeline::render::{PdfiumRasterizer, Rasterizer};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Extract text from image or PDF bytes using the default configuration.
///
/// `file_type` is compared case-insensitively against `"pdf"`; any other
/// value, including `""`, takes the single-image path. Pass `"image"` for
/// the common case.
///
/// # Example
/// ```rust,no_run
/// let bytes = std::fs::read("receipt.png")?;
/// let text = edgequake_ocr::extract_text_from_file(&bytes, "image")?;
/// println!("{text}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// Any decode, rasterisation, or OCR failure. No partial text is returned.
pub fn extract_text_from_file(file_bytes: &[u8], file_type: &str) -> Result<String, OcrError> {
    TextExtractor::new(ExtractionConfig::default()).extract(file_bytes, file_type)
}

/// Runs decode/rasterise → OCR → trim/join for one input at a time.
///
/// Cheap to clone; collaborators are shared behind `Arc`.
#[derive(Clone)]
pub struct TextExtractor {
    config: ExtractionConfig,
    rasterizer: Arc<dyn Rasterizer>,
    engine: Arc<dyn OcrEngine>,
}

impl std::fmt::Debug for TextExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextExtractor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TextExtractor {
    /// Build an extractor backed by pdfium and the Tesseract CLI.
    pub fn new(config: ExtractionConfig) -> Self {
        let rasterizer = Arc::new(PdfiumRasterizer::from_config(&config));
        let engine = Arc::new(TesseractEngine::from_config(&config));
        Self {
            config,
            rasterizer,
            engine,
        }
    }

    /// Build an extractor with caller-supplied engines (alternative OCR
    /// backends, test doubles).
    pub fn with_collaborators(
        config: ExtractionConfig,
        rasterizer: Arc<dyn Rasterizer>,
        engine: Arc<dyn OcrEngine>,
    ) -> Self {
        Self {
            config,
            rasterizer,
            engine,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract text, returning the non-blank pages joined with `\n`.
    ///
    /// Returns `""` when every page is blank.
    pub fn extract(&self, file_bytes: &[u8], file_type: &str) -> Result<String, OcrError> {
        Ok(self.extract_pages(file_bytes, file_type)?.text)
    }

    /// Like [`extract`](Self::extract), but also returns every page
    /// (blank ones included) and timing stats.
    pub fn extract_pages(&self, file_bytes: &[u8], file_type: &str) -> Result<Extraction, OcrError> {
        let kind = self.config.resolve_file_type(file_type)?;
        self.extract_as(file_bytes, kind)
    }

    /// Extract from bytes whose type has already been decided.
    pub fn extract_as(&self, file_bytes: &[u8], kind: FileType) -> Result<Extraction, OcrError> {
        let total_start = Instant::now();
        info!("Extracting text: {} input, {} bytes", kind, file_bytes.len());

        let cb = self.config.progress_callback.as_ref();

        let render_start = Instant::now();
        let loaded = match kind {
            FileType::Pdf => self.rasterizer.render(file_bytes),
            FileType::Image => decode_image(file_bytes).map(|img| vec![img]),
        };
        let images = match loaded {
            Ok(images) => images,
            Err(e) => {
                // No page count yet: report against page 0 of 0.
                if let Some(cb) = cb {
                    cb.on_page_error(0, 0, &e.to_string());
                }
                return Err(e);
            }
        };
        let render_duration_ms = render_start.elapsed().as_millis() as u64;

        let total_pages = images.len();
        if let Some(cb) = cb {
            cb.on_extraction_start(total_pages);
        }

        let mut pages = Vec::with_capacity(total_pages);
        let mut ocr_duration_ms = 0u64;

        // Consume the images so each bitmap is freed once its page is done.
        for (idx, image) in images.into_iter().enumerate() {
            let page_num = idx + 1;
            if let Some(cb) = cb {
                cb.on_page_start(page_num, total_pages);
            }

            let ocr_start = Instant::now();
            let raw = match self.engine.recognize(&image, &self.config.language) {
                Ok(raw) => raw,
                Err(e) => {
                    let e = e.with_page(page_num);
                    if let Some(cb) = cb {
                        cb.on_page_error(page_num, total_pages, &e.to_string());
                    }
                    return Err(e);
                }
            };
            ocr_duration_ms += ocr_start.elapsed().as_millis() as u64;

            let page = PageText::new(page_num, clean_page_text(&raw));
            debug!("Page {}/{}: {} chars", page_num, total_pages, page.chars);
            if let Some(cb) = cb {
                cb.on_page_complete(page_num, total_pages, page.chars);
            }
            pages.push(page);
        }

        let text = join_pages(&pages);
        let blank_pages = pages.iter().filter(|p| p.is_blank()).count();

        if let Some(cb) = cb {
            cb.on_extraction_complete(total_pages, total_pages - blank_pages);
        }

        let stats = ExtractionStats {
            total_pages,
            blank_pages,
            render_duration_ms,
            ocr_duration_ms,
            total_duration_ms: total_start.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} pages ({} blank), {} chars, {}ms",
            total_pages,
            blank_pages,
            text.chars().count(),
            stats.total_duration_ms
        );

        Ok(Extraction { text, pages, stats })
    }

    /// Read a file from disk and extract its text.
    ///
    /// When `file_type` is `None` the type comes from the file extension,
    /// falling back to the `%PDF` magic bytes when there is no extension.
    pub fn extract_file(
        &self,
        path: impl AsRef<Path>,
        file_type: Option<&str>,
    ) -> Result<Extraction, OcrError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| OcrError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let kind = match file_type {
            Some(tag) => self.config.resolve_file_type(tag)?,
            None => FileType::from_path(path).unwrap_or_else(|| FileType::sniff(&bytes)),
        };
        debug!("Resolved {} as {}", path.display(), kind);

        self.extract_as(&bytes, kind)
    }

    /// Async wrapper around [`extract`](Self::extract).
    ///
    /// pdfium and the Tesseract subprocess both block, so the work runs on
    /// tokio's blocking pool instead of stalling a runtime worker.
    pub async fn extract_async(
        &self,
        file_bytes: Vec<u8>,
        file_type: impl Into<String>,
    ) -> Result<String, OcrError> {
        let this = self.clone();
        let file_type = file_type.into();
        tokio::task::spawn_blocking(move || this.extract(&file_bytes, &file_type))
            .await
            .map_err(|e| OcrError::Internal(format!("Extraction task panicked: {}", e)))?
    }
}
