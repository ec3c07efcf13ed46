use std::path::PathBuf;

use eframe::egui;

use crate::ops::format::format_file_size;
use crate::ops::upload::UploadJob;
use crate::types::media::{ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};
use crate::ui::shell::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum UploadAction {
    Selected(PathBuf),
    Navigate(Route),
}

/// First file dropped onto the window this frame, if any.
fn dropped_file(ctx: &egui::Context) -> Option<PathBuf> {
    ctx.input(|i| i.raw.dropped_files.iter().find_map(|file| file.path.clone()))
}

pub fn upload_page(ui: &mut egui::Ui, job: Option<&UploadJob>, error: Option<&str>) -> Option<UploadAction> {
    let mut action = None;

    ui.heading("Upload Video");
    ui.label("Upload a video to start editing. Supports MP4, WebM, MOV, AVI and MKV formats.");
    ui.add_space(12.0);

    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    let stroke_color = if hovering {
        ui.visuals().selection.stroke.color
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| match job {
                Some(job) => {
                    ui.label(format!("Uploading {}...", job.file().file_name));
                    let fraction = f32::from(job.progress()) / 100.0;
                    ui.add(egui::ProgressBar::new(fraction).show_percentage());
                }
                None => {
                    ui.label(egui::RichText::new("🎬").size(40.0));
                    ui.label("Drag & drop your video here");
                    ui.label(egui::RichText::new("or click to browse").weak());
                    ui.add_space(8.0);
                    if ui.button("Choose File").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Video", &ALLOWED_EXTENSIONS)
                            .pick_file()
                        {
                            action = Some(UploadAction::Selected(path));
                        }
                    }
                }
            });
        });

    if job.is_none() {
        if let Some(path) = dropped_file(ui.ctx()) {
            action = Some(UploadAction::Selected(path));
        }
    }

    if let Some(error) = error {
        ui.add_space(8.0);
        ui.colored_label(ui.visuals().error_fg_color, error);
    }

    ui.add_space(12.0);
    ui.strong("Requirements:");
    ui.label(format!("• Video format: {}", ALLOWED_EXTENSIONS.join(", ").to_uppercase()));
    ui.label(format!("• Max file size: {}", format_file_size(MAX_UPLOAD_BYTES)));
    ui.label("• Max duration: 10 minutes");
    ui.label("• Recommended: 1080p or 720p");

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if ui.button("Back to Dashboard").clicked() {
            action = Some(UploadAction::Navigate(Route::Dashboard));
        }
        if ui.button("Preview Existing").clicked() {
            action = Some(UploadAction::Navigate(Route::Preview));
        }
    });

    action
}
