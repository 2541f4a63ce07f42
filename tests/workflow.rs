use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use image::{DynamicImage, Rgba, RgbaImage};
use pdf2png::{AppState, ConvertError, OpenDocument, PdfAdapter, RenderSettings};

/// Page counts keyed by path; anything unregistered fails to parse.
#[derive(Clone, Default)]
struct Library(Arc<HashMap<PathBuf, usize>>);

struct Doc(usize);

impl PdfAdapter for Library {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn OpenDocument + 'a>, ConvertError> {
        match self.0.get(path) {
            Some(&pages) => Ok(Box::new(Doc(pages))),
            None => Err(ConvertError::InvalidOrUnreadableFile {
                path: path.to_path_buf(),
                reason: "not registered".to_string(),
            }),
        }
    }
}

impl OpenDocument for Doc {
    fn page_count(&self) -> usize {
        self.0
    }

    fn render_page(&self, _index: usize, _dpi: f32) -> Result<DynamicImage, ConvertError> {
        Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))))
    }
}

fn app_for(library: Library) -> AppState {
    let factory_library = library.clone();
    AppState::new(
        Box::new(library),
        Arc::new(move || Ok(Box::new(factory_library.clone()) as Box<dyn PdfAdapter>)),
        RenderSettings::default(),
    )
}

#[test]
fn select_preview_convert_clear() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.PDF");
    let doc = dir.path().join("doc.pdf");
    let junk = dir.path().join("junk.pdf");
    for path in [&report, &doc, &junk] {
        std::fs::write(path, b"%PDF").unwrap();
    }
    let library = Library(Arc::new(HashMap::from([(report.clone(), 1), (doc.clone(), 3)])));
    let mut app = app_for(library);

    app.on_select_files(vec![report, doc, junk]);
    assert!(app.preview().is_some());
    assert!(app.current_error().is_none());

    app.on_convert();
    let deadline = Instant::now() + Duration::from_secs(10);
    while app.is_busy() && Instant::now() < deadline {
        app.poll();
        thread::sleep(Duration::from_millis(5));
    }

    assert_eq!(app.status(), "conversion complete! succeeded: 2, failed: 1");
    let mut written: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    written.sort();
    assert_eq!(written, ["doc_1.png", "doc_2.png", "doc_3.png", "report.png"]);

    app.on_clear();
    assert!(app.files().is_empty());
    assert!(app.preview().is_none());
    assert_eq!(app.status(), "ready");
}
