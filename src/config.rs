use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

pub const PREVIEW_DPI: f32 = 96.0;
pub const OUTPUT_DPI: f32 = 300.0;

#[derive(Parser, Debug)]
#[command(name = "pdf2png", version, about = "Preview PDFs and convert their pages to PNG")]
pub struct Args {
    /// PDF files to load into the list at startup
    pub files: Vec<PathBuf>,

    /// Directory containing the PDFium shared library
    #[arg(long)]
    pub pdfium_dir: Option<PathBuf>,

    /// Resolution of the on-screen preview
    #[arg(long, default_value_t = PREVIEW_DPI)]
    pub preview_dpi: f32,

    /// Resolution of the written PNG files
    #[arg(long, default_value_t = OUTPUT_DPI)]
    pub output_dpi: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub preview_dpi: f32,
    pub output_dpi: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            preview_dpi: PREVIEW_DPI,
            output_dpi: OUTPUT_DPI,
        }
    }
}

impl Args {
    pub fn render_settings(&self) -> Result<RenderSettings> {
        for (flag, dpi) in [("--preview-dpi", self.preview_dpi), ("--output-dpi", self.output_dpi)] {
            if !dpi.is_finite() || dpi <= 0.0 {
                bail!("{flag} must be a positive number, got {dpi}");
            }
        }
        Ok(RenderSettings {
            preview_dpi: self.preview_dpi,
            output_dpi: self.output_dpi,
        })
    }
}
