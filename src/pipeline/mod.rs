//! Pipeline stages for OCR text extraction.
//!
//! Each submodule implements exactly one transformation step, and the two
//! steps that call out to external engines sit behind traits so the
//! extractor can be driven by test doubles.
//!
//! ## Data Flow
//!
//! ```text
//!            ┌─ pdf ───▶ render ─┐
//! bytes ─────┤                   ├──▶ recognize ──▶ postprocess
//!            └─ image ─▶ decode ─┘
//!                        (pdfium / image)  (tesseract)   (trim + join)
//! ```
//!
//! 1. [`decode`]      — decode a PNG/JPEG/TIFF/… upload into one `DynamicImage`
//! 2. [`render`]      — rasterise every PDF page via pdfium ([`render::Rasterizer`])
//! 3. [`recognize`]   — run OCR on one page image ([`recognize::OcrEngine`])
//! 4. [`postprocess`] — trim page text and join the non-blank pages

pub mod decode;
pub mod postprocess;
pub mod recognize;
pub mod render;
