use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;

use pdf2png::gui::Pdf2PngApp;
use pdf2png::{AppState, Args, PdfiumAdapter};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = args.render_settings()?;

    info!("starting pdf2png (preview {} DPI, output {} DPI)", settings.preview_dpi, settings.output_dpi);

    // One PDFium per process, bound before the window opens; previews and
    // the conversion worker share it
    let adapter = PdfiumAdapter::bind(args.pdfium_dir.as_deref())?;
    let factory = adapter.factory();

    let mut state = AppState::new(Box::new(adapter), factory, settings);
    state.on_select_files(args.files);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title("PDF to PNG"),
        ..Default::default()
    };

    eframe::run_native(
        "pdf2png",
        native_options,
        Box::new(move |cc| Ok(Box::new(Pdf2PngApp::new(cc, state)))),
    )
    .map_err(|e| anyhow!("failed to open window: {e}"))?;

    Ok(())
}
