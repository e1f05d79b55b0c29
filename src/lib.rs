//! # edgequake-ocr
//!
//! Extract text from uploaded images and scanned PDFs with Tesseract OCR.
//!
//! Give it raw bytes and a file-type tag; get back the recognised text of
//! every page, trimmed, with blank pages dropped and the rest joined by
//! `\n`. PDFs are rasterised page by page with pdfium before OCR.
//!
//! ## Pipeline Overview
//!
//! ```text
//! bytes + file_type
//!  │
//!  ├─ 1. Route    "pdf" (any case) → PDF path, anything else → image path
//!  ├─ 2. Render   rasterise pages via pdfium   |  decode PNG/JPEG/… via image
//!  ├─ 3. OCR      tesseract <page.png> stdout -l eng, one page at a time
//!  └─ 4. Join     trim each page, drop blank ones, join with "\n"
//! ```
//!
//! A failure at any step aborts the whole call with an [`OcrError`] whose
//! message starts with `OCR extraction failed:`; no partial text is returned.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_ocr::{ExtractionConfig, TextExtractor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::builder()
//!         .tesseract_cmd("/usr/bin/tesseract")
//!         .build()?;
//!     let extractor = TextExtractor::new(config);
//!
//!     let bytes = std::fs::read("scan.pdf")?;
//!     let text = extractor.extract(&bytes, "pdf")?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `ocr2text` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## Runtime Requirements
//!
//! - `tesseract` on `PATH` (or [`ExtractionConfig::tesseract_cmd`]) with the
//!   `eng` language data installed.
//! - `libpdfium` on the loader path (or [`ExtractionConfig::pdfium_lib_path`])
//!   for PDF inputs only.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, FileType};
pub use error::OcrError;
pub use extract::{extract_text_from_file, TextExtractor};
pub use output::{Extraction, ExtractionStats, PageText};
pub use pipeline::recognize::{OcrEngine, TesseractEngine};
pub use pipeline::render::{PdfiumRasterizer, Rasterizer};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
