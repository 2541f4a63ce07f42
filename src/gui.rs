//! egui front end. Everything here is drawing and click forwarding; the
//! behaviour lives in `AppState`.

use std::path::PathBuf;
use std::sync::Arc;

use egui::load::SizedTexture;

use crate::app::AppState;
use crate::convert::display_name;

pub struct Pdf2PngApp {
    state: AppState,
    texture: Option<egui::TextureHandle>,
    texture_revision: u64,
}

impl Pdf2PngApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut state: AppState) -> Self {
        // Worker events wake the UI instead of waiting for the next input
        let ctx = cc.egui_ctx.clone();
        state.set_notifier(Arc::new(move || ctx.request_repaint()));

        Self {
            state,
            texture: None,
            texture_revision: u64::MAX,
        }
    }

    fn pick_files() -> Vec<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Select PDF files")
            .add_filter("PDF", &["pdf", "PDF"]);
        if let Some(dir) = dirs::document_dir() {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_files().unwrap_or_default()
    }

    // Upload the preview bitmap only when it actually changed
    fn sync_texture(&mut self, ctx: &egui::Context) {
        if self.texture_revision == self.state.preview_revision() {
            return;
        }
        self.texture_revision = self.state.preview_revision();
        self.texture = self.state.preview().map(|image| {
            let rgba = image.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR)
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let idle = !self.state.is_busy();
        ui.horizontal(|ui| {
            if ui.button("Select PDF files").clicked() {
                let files = Self::pick_files();
                self.state.on_select_files(files);
            }
            if ui.add_enabled(idle, egui::Button::new("Convert")).clicked() {
                self.state.on_convert();
            }
            if ui.add_enabled(idle, egui::Button::new("Clear")).clicked() {
                self.state.on_clear();
            }
        });
    }

    fn file_list(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for (index, path) in self.state.files().iter().enumerate() {
                let selected = self.state.selected() == Some(index);
                if ui
                    .selectable_label(selected, display_name(path))
                    .on_hover_text(path.display().to_string())
                    .clicked()
                {
                    clicked = Some(index);
                }
            }
        });
        if let Some(index) = clicked {
            if self.state.selected() != Some(index) {
                self.state.on_select(index);
            }
        }
    }

    fn preview_area(&self, ui: &mut egui::Ui) {
        match &self.texture {
            Some(texture) => {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::from_texture(SizedTexture::from_handle(texture)).shrink_to_fit());
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.weak("No preview");
                });
            }
        }
    }

    fn error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.current_error().map(str::to_owned) else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.state.dismiss_error();
        }
    }
}

impl eframe::App for Pdf2PngApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();
        self.sync_texture(ctx);

        let modal = self.state.current_error().is_some();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| self.toolbar(ui));
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.add(egui::ProgressBar::new(self.state.progress()).show_percentage());
            ui.label(self.state.status());
        });

        egui::SidePanel::left("files")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Files");
                ui.separator();
                ui.add_enabled_ui(!modal, |ui| self.file_list(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| self.preview_area(ui));

        self.error_dialog(ctx);
    }
}
