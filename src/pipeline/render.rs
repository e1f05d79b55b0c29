//! PDF rasterisation: render every page to a `DynamicImage` via pdfium.
//!
//! The [`Rasterizer`] trait is the seam the extractor depends on;
//! [`PdfiumRasterizer`] is the production implementation.
//!
//! ## Why cap pixels as well as DPI?
//!
//! Page sizes vary wildly: an A0 poster at 200 DPI would produce a
//! 6,600 × 9,400 px bitmap. `max_rendered_pixels` caps the longest edge
//! regardless of physical size, keeping memory bounded on odd inputs while
//! normal letter/A4 pages render at the requested DPI.

use crate::config::ExtractionConfig;
use crate::error::OcrError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Turns PDF bytes into one image per page, in page order.
pub trait Rasterizer: Send + Sync {
    fn render(&self, pdf: &[u8]) -> Result<Vec<DynamicImage>, OcrError>;
}

/// pdfium-backed rasteriser.
///
/// The pdfium library is bound per call. Binding is a `dlopen` of an
/// already-mapped library after the first time, so the cost is negligible
/// next to rendering, and no process-wide handle needs to be kept.
#[derive(Debug, Clone)]
pub struct PdfiumRasterizer {
    lib_path: Option<PathBuf>,
    dpi: u32,
    max_pixels: u32,
    password: Option<String>,
}

impl PdfiumRasterizer {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            lib_path: config.pdfium_lib_path.clone(),
            dpi: config.dpi,
            max_pixels: config.max_rendered_pixels,
            password: config.password.clone(),
        }
    }

    fn bind(&self) -> Result<Pdfium, OcrError> {
        let bindings = match &self.lib_path {
            Some(path) => {
                let lib = resolve_library_path(path);
                debug!("Binding pdfium from {}", lib.display());
                Pdfium::bind_to_library(&lib)
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| OcrError::EngineUnavailable {
            engine: "pdfium".to_string(),
            detail: format!(
                "{:?}\nInstall libpdfium or point pdfium_lib_path / --pdfium-lib at it.",
                e
            ),
        })?;

        Ok(Pdfium::new(bindings))
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn render(&self, pdf: &[u8]) -> Result<Vec<DynamicImage>, OcrError> {
        check_pdf_magic(pdf)?;

        let pdfium = self.bind()?;
        let password = self.password.as_deref();

        let document = pdfium
            .load_pdf_from_byte_slice(pdf, password)
            .map_err(|e| classify_load_error(&e, password.is_some()))?;

        let pages = document.pages();
        info!("PDF loaded: {} pages", pages.len());

        let render_config = PdfRenderConfig::new()
            .scale_page_by_factor(self.dpi as f32 / 72.0)
            .set_maximum_width(self.max_pixels as i32)
            .set_maximum_height(self.max_pixels as i32);

        let mut images = Vec::with_capacity(pages.len() as usize);

        for (idx, page) in pages.iter().enumerate() {
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| OcrError::RasterizeFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                })?;

            let image = bitmap.as_image();
            debug!(
                "Rendered page {} → {}x{} px",
                idx + 1,
                image.width(),
                image.height()
            );
            images.push(image);
        }

        Ok(images)
    }
}

/// Reject bytes that do not start with `%PDF` before pdfium sees them.
fn check_pdf_magic(pdf: &[u8]) -> Result<(), OcrError> {
    if pdf.starts_with(b"%PDF") {
        return Ok(());
    }
    let head: Vec<u8> = pdf.iter().take(4).copied().collect();
    warn!("Input declared as PDF has no %PDF header: {:?}", head);
    Err(OcrError::RasterizeFailed {
        page: 0,
        detail: format!("not a PDF (first bytes: {:?})", head),
    })
}

fn classify_load_error(err: &PdfiumError, password_given: bool) -> OcrError {
    let err_str = format!("{:?}", err);
    let detail = if err_str.contains("Password") || err_str.contains("password") {
        if password_given {
            "wrong password".to_string()
        } else {
            "document is encrypted and requires a password".to_string()
        }
    } else {
        err_str
    };
    OcrError::RasterizeFailed { page: 0, detail }
}

/// Accept either the library file itself or the directory containing it.
fn resolve_library_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(platform_library_name())
    } else {
        path.to_path_buf()
    }
}

fn platform_library_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "libpdfium.dylib",
        "windows" => "pdfium.dll",
        _ => "libpdfium.so",
    }
}
