use std::path::Path;

use image::DynamicImage;

use crate::adapter::PdfAdapter;
use crate::error::ConvertError;
use crate::validate::is_valid;

/// Render the first page of `path` at `dpi` for on-screen display.
pub fn preview(adapter: &dyn PdfAdapter, path: &Path, dpi: f32) -> Result<DynamicImage, ConvertError> {
    if !is_valid(adapter, path) {
        return Err(ConvertError::InvalidOrUnreadableFile {
            path: path.to_path_buf(),
            reason: "validation failed".to_string(),
        });
    }

    let document = adapter.open(path)?;
    if document.page_count() == 0 {
        return Err(ConvertError::ZeroPageDocument);
    }
    document.render_page(0, dpi)
}

/// Text for the error dialog shown when a preview fails.
pub fn failure_message(err: &ConvertError) -> String {
    match err {
        ConvertError::InvalidOrUnreadableFile { .. } => {
            "cannot preview: file may be corrupt or not a valid PDF".to_string()
        }
        ConvertError::ZeroPageDocument => "cannot preview: PDF has zero pages".to_string(),
        other => format!("error previewing PDF: {other}"),
    }
}
