//! In-memory stand-in for PDFium used by the unit tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{DynamicImage, Rgba, RgbaImage};

use crate::adapter::{AdapterFactory, OpenDocument, PdfAdapter};
use crate::error::ConvertError;

#[derive(Clone, Copy)]
struct FakeSpec {
    pages: usize,
    fail_on_page: Option<usize>,
}

/// Documents are registered by path and backed by a real file on disk so the
/// existence checks in validation behave as they would in production.
#[derive(Clone, Default)]
pub struct FakeAdapter {
    documents: Arc<Mutex<HashMap<PathBuf, FakeSpec>>>,
    live: Arc<AtomicUsize>,
    opens: Arc<AtomicUsize>,
}

impl FakeAdapter {
    pub fn add(&self, path: &Path, pages: usize) {
        self.register(path, FakeSpec { pages, fail_on_page: None });
    }

    pub fn add_failing(&self, path: &Path, pages: usize, fail_on_page: usize) {
        self.register(
            path,
            FakeSpec {
                pages,
                fail_on_page: Some(fail_on_page),
            },
        );
    }

    /// A file that exists but does not parse.
    pub fn add_garbage(&self, path: &Path) {
        fs::write(path, b"not a pdf").expect("write garbage file");
    }

    pub fn live_handles(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn factory(&self) -> AdapterFactory {
        let adapter = self.clone();
        Arc::new(move || Ok(Box::new(adapter.clone()) as Box<dyn PdfAdapter>))
    }

    fn register(&self, path: &Path, spec: FakeSpec) {
        fs::write(path, b"%PDF-1.7 fake").expect("write fake pdf");
        self.documents
            .lock()
            .expect("fake registry poisoned")
            .insert(path.to_path_buf(), spec);
    }
}

impl PdfAdapter for FakeAdapter {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn OpenDocument + 'a>, ConvertError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let spec = self
            .documents
            .lock()
            .expect("fake registry poisoned")
            .get(path)
            .copied()
            .ok_or_else(|| ConvertError::InvalidOrUnreadableFile {
                path: path.to_path_buf(),
                reason: "no PDF header".to_string(),
            })?;

        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeDocument {
            spec,
            live: Arc::clone(&self.live),
        }))
    }
}

struct FakeDocument {
    spec: FakeSpec,
    live: Arc<AtomicUsize>,
}

impl OpenDocument for FakeDocument {
    fn page_count(&self) -> usize {
        self.spec.pages
    }

    fn render_page(&self, index: usize, dpi: f32) -> Result<DynamicImage, ConvertError> {
        if self.spec.fail_on_page == Some(index) || index >= self.spec.pages {
            return Err(ConvertError::RenderingFailure {
                page: index,
                reason: "fake render failure".to_string(),
            });
        }
        // Tiny bitmap whose width tracks the DPI so tests can tell 96 from 300
        let width = (dpi / 12.0).round().max(1.0) as u32;
        let image = RgbaImage::from_pixel(width, width, Rgba([255, 255, 255, 255]));
        Ok(DynamicImage::ImageRgba8(image))
    }
}

impl Drop for FakeDocument {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}
