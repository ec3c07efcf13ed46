use eframe::egui;

use crate::types::settings::{EditSettings, MUSIC_CHOICES, SettingValue};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Carries the complete settings after one field changed.
    Edited(EditSettings),
    Export,
    Save,
}

/// Replaces one field of `current` and queues the full result.
fn record_edit(events: &mut Vec<EditorEvent>, current: &mut EditSettings, value: SettingValue) {
    tracing::debug!(field = ?value.field(), "Edit setting changed");
    *current = current.with_field(value);
    events.push(EditorEvent::Edited(current.clone()));
}

/// One control per setting. Every change is reported immediately, with no
/// debouncing; several changes in one frame each produce their own event.
pub fn control_panel(ui: &mut egui::Ui, settings: &EditSettings) -> Vec<EditorEvent> {
    let mut events = Vec::new();
    let mut current = settings.clone();

    ui.vertical(|ui| {
        ui.heading("Control Panel");
        ui.separator();

        ui.label("Trim (%)");
        ui.horizontal(|ui| {
            let mut start = current.trim_start;
            let start_input = egui::DragValue::new(&mut start)
                .range(0.0..=100.0)
                .speed(0.5)
                .prefix("Start ");
            if ui.add(start_input).changed() {
                record_edit(&mut events, &mut current, SettingValue::TrimStart(start));
            }

            let mut end = current.trim_end;
            let end_input = egui::DragValue::new(&mut end)
                .range(0.0..=100.0)
                .speed(0.5)
                .prefix("End ");
            if ui.add(end_input).changed() {
                record_edit(&mut events, &mut current, SettingValue::TrimEnd(end));
            }
        });
        if current.trim_start >= current.trim_end {
            ui.colored_label(ui.visuals().warn_fg_color, "Trim start should be before trim end");
        }
        ui.add_space(6.0);

        let mut speed = current.speed;
        ui.label(format!("Speed: {speed:.1}x"));
        if ui
            .add(egui::Slider::new(&mut speed, 0.5..=3.0).step_by(0.1).show_value(false))
            .changed()
        {
            record_edit(&mut events, &mut current, SettingValue::Speed(speed));
        }

        let mut volume = current.volume;
        ui.label(format!("Volume: {}%", (volume * 100.0).round()));
        if ui
            .add(egui::Slider::new(&mut volume, 0.0..=1.0).step_by(0.1).show_value(false))
            .changed()
        {
            record_edit(&mut events, &mut current, SettingValue::Volume(volume));
        }

        let mut brightness = current.brightness;
        ui.label(format!("Brightness: {}%", (brightness * 100.0).round()));
        if ui
            .add(egui::Slider::new(&mut brightness, 0.5..=2.0).step_by(0.1).show_value(false))
            .changed()
        {
            record_edit(&mut events, &mut current, SettingValue::Brightness(brightness));
        }

        let mut contrast = current.contrast;
        ui.label(format!("Contrast: {}%", (contrast * 100.0).round()));
        if ui
            .add(egui::Slider::new(&mut contrast, 0.5..=2.0).step_by(0.1).show_value(false))
            .changed()
        {
            record_edit(&mut events, &mut current, SettingValue::Contrast(contrast));
        }
        ui.add_space(6.0);

        ui.label("Text Overlay");
        let mut text = current.text_overlay.clone();
        if ui
            .add(egui::TextEdit::singleline(&mut text).hint_text("Enter text..."))
            .changed()
        {
            record_edit(&mut events, &mut current, SettingValue::TextOverlay(text));
        }

        let mut music = current.music.clone();
        egui::ComboBox::from_label("Music")
            .selected_text(if music.is_empty() {
                "Select music..."
            } else {
                current.music_label()
            })
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut music, String::new(), "Select music...");
                for (id, label) in MUSIC_CHOICES {
                    ui.selectable_value(&mut music, id.to_string(), label);
                }
            });
        if music != current.music {
            record_edit(&mut events, &mut current, SettingValue::Music(music));
        }
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui.button("Export Video").clicked() {
                events.push(EditorEvent::Export);
            }
            if ui.button("Save").clicked() {
                events.push(EditorEvent::Save);
            }
        });
    });

    events
}
