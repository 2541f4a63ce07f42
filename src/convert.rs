//! Best-effort batch conversion: every file is attempted once, failures are
//! counted and reported, and the run always reaches the end of the list.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info, warn};

use crate::adapter::PdfAdapter;
use crate::error::ConvertError;
use crate::naming::output_paths;
use crate::validate::is_valid;

/// Tally for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl Outcome {
    /// Invalid files plus files that broke mid-conversion.
    pub fn failed(&self) -> usize {
        self.skipped + self.errored
    }

    pub fn summary(&self) -> String {
        format!(
            "conversion complete! succeeded: {}, failed: {}",
            self.succeeded,
            self.failed()
        )
    }
}

/// What a running batch reports back to whoever displays it.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Status(String),
    Progress(f32),
    Error(String),
    Finished(Outcome),
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Rasterize every page of `path` at `dpi` and write the PNGs next to it.
/// Returns the number of pages written.
pub fn convert_file(adapter: &dyn PdfAdapter, path: &Path, dpi: f32) -> Result<usize, ConvertError> {
    let document = adapter.open(path)?;
    let page_count = document.page_count();
    if page_count == 0 {
        return Err(ConvertError::ZeroPageDocument);
    }

    for (index, target) in output_paths(path, page_count).into_iter().enumerate() {
        let image = document.render_page(index, dpi)?;
        image
            .save_with_format(&target, ImageFormat::Png)
            .map_err(|source| ConvertError::WriteFailure {
                path: target.clone(),
                source,
            })?;
        debug!("wrote page {} of {} to {}", index + 1, page_count, target.display());
    }

    Ok(page_count)
}

/// Convert `paths` in order, feeding status, progress and error events to
/// `sink`. Never stops early.
pub fn convert_all(
    adapter: &dyn PdfAdapter,
    paths: &[PathBuf],
    dpi: f32,
    sink: &mut dyn FnMut(BatchEvent),
) -> Outcome {
    let mut outcome = Outcome {
        total: paths.len(),
        ..Outcome::default()
    };
    info!("starting batch of {} file(s) at {dpi} DPI", outcome.total);

    for path in paths {
        let name = display_name(path);

        if !is_valid(adapter, path) {
            warn!("skipping invalid file {}", path.display());
            outcome.skipped += 1;
            sink(BatchEvent::Status(format!("skipping invalid file: {name}")));
            continue;
        }

        sink(BatchEvent::Status(format!("converting: {name}")));

        match convert_file(adapter, path, dpi) {
            Ok(pages) => {
                info!("converted {} ({pages} page(s))", path.display());
                outcome.succeeded += 1;
                sink(BatchEvent::Progress(outcome.succeeded as f32 / outcome.total as f32));
            }
            Err(e) => {
                warn!("failed to convert {}: {e}", path.display());
                outcome.errored += 1;
                sink(BatchEvent::Error(format!("error converting file: {e}")));
            }
        }
    }

    info!(
        "batch finished: {} succeeded, {} skipped, {} errored",
        outcome.succeeded, outcome.skipped, outcome.errored
    );
    sink(BatchEvent::Status(outcome.summary()));
    outcome
}
