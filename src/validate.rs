use std::fs::File;
use std::path::Path;

use log::debug;

use crate::adapter::PdfAdapter;

/// True iff `path` is a readable file that opens as a PDF. Page count is not
/// checked. The document handle is dropped before returning.
pub fn is_valid(adapter: &dyn PdfAdapter, path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            debug!("not a regular file: {}", path.display());
            return false;
        }
        Err(e) => {
            debug!("cannot stat {}: {e}", path.display());
            return false;
        }
    }

    if let Err(e) = File::open(path) {
        debug!("cannot read {}: {e}", path.display());
        return false;
    }

    match adapter.open(path) {
        Ok(_document) => true,
        Err(e) => {
            debug!("rejected {}: {e}", path.display());
            false
        }
    }
}
