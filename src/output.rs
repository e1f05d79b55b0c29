//! Result types returned by [`crate::TextExtractor::extract_pages`].

use serde::{Deserialize, Serialize};

/// Text recognised on one page (or on the single image of an image input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Recognised text, trimmed of leading and trailing whitespace.
    pub text: String,
    /// Character count of `text`.
    pub chars: usize,
}

impl PageText {
    pub fn new(page_num: usize, text: String) -> Self {
        let chars = text.chars().count();
        Self {
            page_num,
            text,
            chars,
        }
    }

    /// `true` when the page contributes nothing to the joined text.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Timing and page counts for one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub total_pages: usize,
    /// Pages whose trimmed text was empty and were left out of `text`.
    pub blank_pages: usize,
    /// Time spent decoding the image or rasterising the PDF.
    pub render_duration_ms: u64,
    /// Time spent inside the OCR engine, summed over all pages.
    pub ocr_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Full result of an extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    /// Non-blank page texts joined with `\n`.
    pub text: String,
    /// Every page in document order, blank pages included.
    pub pages: Vec<PageText>,
    pub stats: ExtractionStats,
}
