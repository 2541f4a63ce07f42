//! PDF access behind a small trait so the rest of the crate never talks to
//! PDFium directly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use image::DynamicImage;
use log::{debug, info};
use pdfium_render::prelude::*;

use crate::error::ConvertError;

/// PDF user space is 72 points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Opens documents. Returned handles release their resources on drop.
pub trait PdfAdapter {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn OpenDocument + 'a>, ConvertError>;
}

/// One opened document.
pub trait OpenDocument {
    fn page_count(&self) -> usize;

    /// Rasterize page `index` (0-based) at `dpi`.
    fn render_page(&self, index: usize, dpi: f32) -> Result<DynamicImage, ConvertError>;
}

/// Hands the conversion worker an adapter on its own thread.
pub type AdapterFactory = Arc<dyn Fn() -> Result<Box<dyn PdfAdapter>> + Send + Sync>;

/// PDFium allows one initialised library per process, so every clone shares
/// the same bound instance.
#[derive(Clone)]
pub struct PdfiumAdapter {
    pdfium: Arc<Pdfium>,
}

impl PdfiumAdapter {
    /// Bind PDFium, trying `library_dir` first when given. Call once per
    /// process and clone the result.
    pub fn bind(library_dir: Option<&Path>) -> Result<Self> {
        let pdfium = bind_pdfium(library_dir)?;
        Ok(Self {
            pdfium: Arc::new(pdfium),
        })
    }

    /// Factory that hands out clones of this adapter; it never binds again.
    pub fn factory(&self) -> AdapterFactory {
        let shared = self.clone();
        Arc::new(move || Ok(Box::new(shared.clone()) as Box<dyn PdfAdapter>))
    }
}

impl PdfAdapter for PdfiumAdapter {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn OpenDocument + 'a>, ConvertError> {
        let document = self.pdfium.load_pdf_from_file(path, None).map_err(|e| {
            ConvertError::InvalidOrUnreadableFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl OpenDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&self, index: usize, dpi: f32) -> Result<DynamicImage, ConvertError> {
        let failure = |reason: String| ConvertError::RenderingFailure { page: index, reason };

        let page = self
            .document
            .pages()
            .get(index as PdfPageIndex)
            .map_err(|e| failure(e.to_string()))?;

        // Page size is in points; scale to pixels at the requested DPI
        let width = (page.width().value * dpi / POINTS_PER_INCH).round() as i32;
        let height = (page.height().value * dpi / POINTS_PER_INCH).round() as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width.max(1))
                    .set_target_height(height.max(1)),
            )
            .map_err(|e| failure(e.to_string()))?;

        Ok(bitmap.as_image())
    }
}

fn library_search_paths(library_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dir) = library_dir {
        paths.push(dir.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        paths.push(exe_dir.join("libs"));
        paths.push(exe_dir.to_path_buf());

        #[cfg(target_os = "macos")]
        {
            // .app/Contents/MacOS/pdf2png -> .app/Contents/Resources
            if let Some(contents_dir) = exe_dir.parent() {
                paths.push(contents_dir.join("Resources"));
            }
        }
    }

    paths.push(PathBuf::from("./"));
    paths
}

fn bind_pdfium(library_dir: Option<&Path>) -> Result<Pdfium> {
    for path in library_search_paths(library_dir) {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(&path);
        debug!("trying pdfium at {}", lib_path.display());

        if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
            info!("bound pdfium from {}", path.display());
            return Ok(Pdfium::new(bindings));
        }
    }

    debug!("trying system pdfium library");
    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| anyhow!("PDFium library not available: {e}. Pass --pdfium-dir or install libpdfium."))
}
