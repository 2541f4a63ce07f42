use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while opening, rendering or writing a PDF.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("file may be corrupt or not a valid PDF ({}): {reason}", .path.display())]
    InvalidOrUnreadableFile { path: PathBuf, reason: String },

    #[error("PDF has zero pages")]
    ZeroPageDocument,

    #[error("failed to render page {}: {reason}", .page + 1)]
    RenderingFailure { page: usize, reason: String },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
