//! Error type for the edgequake-ocr library.
//!
//! Every failure collapses to one user-visible message shape,
//! `OCR extraction failed: <cause>`, so callers that only print errors need
//! no special handling. Callers that care about *why* can match on the
//! variant: a corrupt upload ([`OcrError::DecodeFailed`]) wants a 4xx
//! response, while a missing Tesseract binary
//! ([`OcrError::EngineUnavailable`]) is an operator problem.
//!
//! There is no page-level error type. A failure on any page aborts the
//! whole extraction and discards text already recognised on earlier pages.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-ocr library.
#[derive(Debug, Error)]
pub enum OcrError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The bytes could not be decoded as a raster image.
    #[error("OCR extraction failed: could not decode image: {detail}")]
    DecodeFailed { detail: String },

    /// pdfium could not open or render the PDF.
    ///
    /// `page` is 1-indexed; `0` means the document itself could not be opened.
    #[error("OCR extraction failed: {}", rasterize_message(.page, .detail))]
    RasterizeFailed { page: usize, detail: String },

    /// The declared file type is not one of the known tags (strict mode only).
    #[error("OCR extraction failed: unsupported file type '{file_type}'\nExpected one of: pdf, image, png, jpg, jpeg, tif, tiff, bmp, gif, webp")]
    UnsupportedFileType { file_type: String },

    /// Reading an input file from disk failed.
    #[error("OCR extraction failed: cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Engine errors ─────────────────────────────────────────────────────
    /// The OCR engine ran but did not produce text for this page.
    #[error("OCR extraction failed: recognition failed on page {page}: {detail}")]
    RecognitionFailed { page: usize, detail: String },

    /// A required external engine (Tesseract binary, pdfium library) is missing.
    #[error("OCR extraction failed: {engine} is not available: {detail}")]
    EngineUnavailable { engine: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("OCR extraction failed: invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("OCR extraction failed: internal error: {0}")]
    Internal(String),
}

fn rasterize_message(page: &usize, detail: &str) -> String {
    if *page == 0 {
        format!("could not open PDF: {detail}")
    } else {
        format!("rasterisation failed for page {page}: {detail}")
    }
}

impl OcrError {
    /// `true` when the failure was caused by the caller's input rather than
    /// the environment (missing engine, bad config, internal fault).
    ///
    /// Only document-level rasterisation failures count: once pdfium has
    /// opened the PDF, a failure on a single page (bitmap allocation, render
    /// error) is an environment fault.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            OcrError::DecodeFailed { .. }
                | OcrError::RasterizeFailed { page: 0, .. }
                | OcrError::UnsupportedFileType { .. }
        )
    }

    /// Attach a 1-indexed page number to a recognition or rasterisation error.
    ///
    /// Engines report failures without knowing which page they were handed;
    /// the extractor fills the page in. Other variants pass through.
    pub fn with_page(self, page: usize) -> Self {
        match self {
            OcrError::RecognitionFailed { detail, .. } => {
                OcrError::RecognitionFailed { page, detail }
            }
            OcrError::RasterizeFailed { detail, .. } => OcrError::RasterizeFailed { page, detail },
            other => other,
        }
    }

    /// 1-indexed page the error refers to, when it is page-specific.
    pub fn page(&self) -> Option<usize> {
        match self {
            OcrError::RasterizeFailed { page, .. } | OcrError::RecognitionFailed { page, .. }
                if *page > 0 =>
            {
                Some(*page)
            }
            _ => None,
        }
    }
}
