//! Post-processing: trim each page's OCR output and join the survivors.
//!
//! Tesseract's plain-text output ends every page with a form feed and
//! usually a few newlines. Trimming removes both (`\x0c` is Unicode
//! whitespace). Nothing inside the text is touched.

use crate::output::PageText;

/// Trim leading and trailing whitespace from one page's raw OCR output.
pub fn clean_page_text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Join non-blank pages with `\n`, preserving page order.
pub fn join_pages(pages: &[PageText]) -> String {
    pages
        .iter()
        .filter(|p| !p.is_blank())
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
