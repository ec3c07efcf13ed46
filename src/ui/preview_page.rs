use eframe::egui;

use crate::ops::export::{AspectRatio, ExportFormat, ExportJob, ExportOptions, ExportQuality, FRAME_RATES};
use crate::renderer::preview_sync::PreviewState;
use crate::types::session::MediaSession;
use crate::types::settings::EditSettings;
use crate::ui::editor_page::edit_summary;
use crate::ui::video_preview::{PreviewAction, video_preview};

#[derive(Debug, Default)]
pub struct PreviewOutput {
    pub export: bool,
    pub back: bool,
    pub preview: Option<PreviewAction>,
}

const EXPORT_TIPS: [&str; 3] = [
    "Exporting only simulates encoding; no file is written.",
    "9:16 at 1080p suits TikTok, Shorts and Reels.",
    "Later edits do not change an export that is already running.",
];

fn export_settings(ui: &mut egui::Ui, options: &mut ExportOptions) {
    egui::Grid::new("export_settings")
        .num_columns(2)
        .spacing([24.0, 8.0])
        .show(ui, |ui| {
            ui.label("Quality");
            egui::ComboBox::from_id_salt("export_quality")
                .selected_text(options.quality.label())
                .show_ui(ui, |ui| {
                    for quality in ExportQuality::ALL {
                        ui.selectable_value(&mut options.quality, quality, quality.label());
                    }
                });
            ui.end_row();

            ui.label("Format");
            egui::ComboBox::from_id_salt("export_format")
                .selected_text(options.format.label())
                .show_ui(ui, |ui| {
                    for format in ExportFormat::ALL {
                        ui.selectable_value(&mut options.format, format, format.label());
                    }
                });
            ui.end_row();

            ui.label("Frame Rate");
            egui::ComboBox::from_id_salt("export_frame_rate")
                .selected_text(format!("{} FPS", options.frame_rate))
                .show_ui(ui, |ui| {
                    for rate in FRAME_RATES {
                        ui.selectable_value(&mut options.frame_rate, rate, format!("{rate} FPS"));
                    }
                });
            ui.end_row();

            ui.label("Aspect Ratio");
            ui.horizontal(|ui| {
                for aspect in AspectRatio::ALL {
                    ui.selectable_value(&mut options.aspect, aspect, aspect.label());
                }
            });
            ui.end_row();
        });
}

/// Review and simulated export. Options are editable only while no
/// export is running.
#[allow(clippy::too_many_arguments)]
pub fn preview_page(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    session: &MediaSession,
    settings: &EditSettings,
    state: &PreviewState,
    options: &mut ExportOptions,
    job: Option<&ExportJob>,
    notice: Option<&str>,
) -> PreviewOutput {
    let mut out = PreviewOutput::default();
    let exporting = job.is_some_and(|job| job.is_running());

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("Preview & Export");
            ui.label("Review your edits and export your video");
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Back to Editor").clicked() {
                out.back = true;
            }
        });
    });
    ui.separator();

    out.preview = video_preview(ui, texture, &session.playback, settings, state);
    ui.add_space(12.0);

    ui.group(|ui| {
        ui.strong("Export Settings");
        ui.add_enabled_ui(!exporting, |ui| export_settings(ui, options));
    });
    ui.add_space(8.0);

    ui.strong("Edit Settings Summary:");
    edit_summary(ui, settings, &session.source.file_name);
    ui.add_space(12.0);

    match job {
        Some(job) if job.is_running() => {
            ui.label("Exporting...");
            let fraction = f32::from(job.progress()) / 100.0;
            ui.add(egui::ProgressBar::new(fraction).show_percentage());
        }
        _ => {
            ui.horizontal(|ui| {
                if ui.button("Export Video").clicked() {
                    out.export = true;
                }
                ui.add_enabled(false, egui::Button::new("Download"))
                    .on_disabled_hover_text("Exports are simulated; there is nothing to download");
            });
        }
    }
    if let Some(notice) = notice {
        ui.colored_label(egui::Color32::from_rgb(34, 160, 90), notice);
    }

    ui.add_space(12.0);
    for tip in EXPORT_TIPS {
        ui.label(egui::RichText::new(format!("• {tip}")).weak());
    }

    out
}
