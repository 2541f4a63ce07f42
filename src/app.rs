//! Toolkit-independent application state. The GUI draws from this and calls
//! the `on_*` actions; all mutation happens on the UI thread.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;
use log::{error, info};

use crate::adapter::{AdapterFactory, PdfAdapter};
use crate::config::RenderSettings;
use crate::convert::BatchEvent;
use crate::preview::{failure_message, preview};
use crate::worker::{BatchHandle, Notifier, spawn_batch};

pub const READY: &str = "ready";
pub const NO_FILES: &str = "please select PDF files first";

pub struct AppState {
    adapter: Box<dyn PdfAdapter>,
    factory: AdapterFactory,
    settings: RenderSettings,
    notify: Notifier,

    files: Vec<PathBuf>,
    selected: Option<usize>,
    preview: Option<DynamicImage>,
    preview_revision: u64,
    status: String,
    progress: f32,
    errors: VecDeque<String>,
    batch: Option<BatchHandle>,
}

impl AppState {
    /// `adapter` serves previews on the UI thread; `factory` builds a
    /// separate one for each conversion worker.
    pub fn new(adapter: Box<dyn PdfAdapter>, factory: AdapterFactory, settings: RenderSettings) -> Self {
        Self {
            adapter,
            factory,
            settings,
            notify: Arc::new(|| {}),
            files: Vec::new(),
            selected: None,
            preview: None,
            preview_revision: 0,
            status: READY.to_string(),
            progress: 0.0,
            errors: VecDeque::new(),
            batch: None,
        }
    }

    pub fn set_notifier(&mut self, notify: Notifier) {
        self.notify = notify;
    }

    // ACTIONS

    /// Replace the list with a fresh selection. An empty selection means the
    /// dialog was cancelled and changes nothing.
    pub fn on_select_files(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        info!("selected {} file(s)", paths.len());
        self.files = paths;
        self.on_select(0);
    }

    /// Select one entry of the list and preview it.
    pub fn on_select(&mut self, index: usize) {
        let Some(path) = self.files.get(index).cloned() else {
            return;
        };
        self.selected = Some(index);

        match preview(self.adapter.as_ref(), &path, self.settings.preview_dpi) {
            Ok(image) => self.set_preview(Some(image)),
            Err(e) => {
                error!("preview of {} failed: {e}", path.display());
                self.set_preview(None);
                self.errors.push_back(failure_message(&e));
            }
        }
    }

    /// Start converting a snapshot of the list in the background.
    pub fn on_convert(&mut self) {
        if self.is_busy() {
            return;
        }
        if self.files.is_empty() {
            self.errors.push_back(NO_FILES.to_string());
            return;
        }

        self.progress = 0.0;
        let snapshot = self.files.clone();
        match spawn_batch(
            Arc::clone(&self.factory),
            snapshot,
            self.settings.output_dpi,
            Arc::clone(&self.notify),
        ) {
            Ok(handle) => self.batch = Some(handle),
            Err(e) => {
                error!("failed to spawn conversion worker: {e}");
                self.errors.push_back(format!("cannot start conversion: {e}"));
            }
        }
    }

    /// Reset to the initial state. Ignored while a batch is running.
    pub fn on_clear(&mut self) {
        if self.is_busy() {
            return;
        }
        self.files.clear();
        self.selected = None;
        self.set_preview(None);
        self.progress = 0.0;
        self.status = READY.to_string();
    }

    /// Apply everything the worker has sent since the last call.
    pub fn poll(&mut self) {
        let Some(batch) = self.batch.as_mut() else {
            return;
        };
        let drained = batch.drain();

        let mut finished = false;
        for event in drained.events {
            match event {
                BatchEvent::Status(text) => self.status = text,
                BatchEvent::Progress(fraction) => self.progress = fraction,
                BatchEvent::Error(message) => self.errors.push_back(message),
                BatchEvent::Finished(outcome) => {
                    info!("{}", outcome.summary());
                    finished = true;
                }
            }
        }

        if drained.disconnected && !finished {
            self.errors.push_back("conversion stopped unexpectedly".to_string());
            finished = true;
        }
        if finished {
            self.batch = None;
        }
    }

    /// Close the error dialog currently on screen.
    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    // VIEW

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn preview(&self) -> Option<&DynamicImage> {
        self.preview.as_ref()
    }

    /// Bumped whenever the preview image changes, including to nothing.
    pub fn preview_revision(&self) -> u64 {
        self.preview_revision
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn is_busy(&self) -> bool {
        self.batch.is_some()
    }

    fn set_preview(&mut self, image: Option<DynamicImage>) {
        self.preview = image;
        self.preview_revision += 1;
    }
}
