use eframe::egui;

use crate::renderer::preview_sync::PreviewState;
use crate::types::session::MediaSession;
use crate::types::settings::{EditPreset, EditSettings};
use crate::ui::control_panel::{EditorEvent, control_panel};
use crate::ui::video_preview::{PreviewAction, video_preview};

#[derive(Debug, Default)]
pub struct EditorOutput {
    pub events: Vec<EditorEvent>,
    pub preview: Option<PreviewAction>,
    pub back: bool,
}

/// Raw settings values next to the file name, as shown under the editor
/// and on the export page.
pub fn edit_summary(ui: &mut egui::Ui, settings: &EditSettings, file_name: &str) {
    let or_none = |value: &str| if value.is_empty() { "None".to_string() } else { value.to_string() };
    egui::Grid::new(("edit_summary", file_name))
        .num_columns(4)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label(format!("Trim: {}% - {}%", settings.trim_start, settings.trim_end));
            ui.label(format!("Speed: {}x", settings.speed));
            ui.label(format!("Volume: {}%", (settings.volume * 100.0).round()));
            ui.label(format!("Brightness: {}%", (settings.brightness * 100.0).round()));
            ui.end_row();
            ui.label(format!("Contrast: {}%", (settings.contrast * 100.0).round()));
            ui.label(format!("Text: {}", or_none(&settings.text_overlay)));
            ui.label(format!("Music: {}", or_none(&settings.music)));
            ui.label(format!("File: {file_name}"));
            ui.end_row();
        });
}

pub fn editor_page(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    session: &MediaSession,
    settings: &EditSettings,
    state: &PreviewState,
) -> EditorOutput {
    let mut out = EditorOutput::default();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("Video Editor");
            ui.label("Edit your video with AI-powered tools");
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Back").clicked() {
                out.back = true;
            }
            if ui.button("Save").clicked() {
                out.events.push(EditorEvent::Save);
            }
        });
    });
    ui.separator();

    ui.columns(2, |cols| {
        out.preview = video_preview(&mut cols[0], texture, &session.playback, settings, state);
        cols[0].add_space(8.0);
        cols[0].horizontal_wrapped(|ui| {
            for preset in EditPreset::ALL {
                if ui.button(preset.label()).clicked() {
                    out.events.push(EditorEvent::Edited(settings.apply_preset(preset)));
                }
            }
        });

        out.events.extend(control_panel(&mut cols[1], settings));
    });

    ui.add_space(12.0);
    ui.strong("Current Settings:");
    edit_summary(ui, settings, &session.source.file_name);

    out
}
