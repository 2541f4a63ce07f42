//! Preview PDFs and batch-convert their pages to PNG files next to the source.

pub mod adapter;
pub mod app;
pub mod config;
pub mod convert;
pub mod error;
pub mod gui;
pub mod naming;
pub mod preview;
pub mod validate;
pub mod worker;

#[cfg(test)]
mod testing;

pub use adapter::{AdapterFactory, OpenDocument, PdfAdapter, PdfiumAdapter};
pub use app::AppState;
pub use config::{Args, RenderSettings};
pub use convert::{BatchEvent, Outcome};
pub use error::ConvertError;
