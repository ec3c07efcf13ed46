use eframe::egui;

use crate::ops::format::format_time;
use crate::renderer::gst_player::GstMediaElement;
use crate::renderer::media_element::VisualFilter;
use crate::renderer::preview_sync::PreviewState;
use crate::types::playback_state::PlaybackState;
use crate::types::settings::EditSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewAction {
    TogglePlay,
    Seek(f64),
}

/// Holds the egui texture for the newest decoded frame.
#[derive(Default)]
pub struct PreviewTexture {
    texture: Option<egui::TextureHandle>,
    serial: u64,
}

impl PreviewTexture {
    /// Re-uploads only when the element produced a new frame.
    pub fn update(&mut self, ctx: &egui::Context, element: Option<&mut GstMediaElement>) {
        let Some(element) = element else {
            self.texture = None;
            self.serial = 0;
            return;
        };
        let serial = element.refresh_frame();
        if serial == self.serial && self.texture.is_some() {
            return;
        }
        self.serial = serial;
        if let Some(frame) = element.frame() {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [frame.width as usize, frame.height as usize],
                &frame.data,
            );
            match self.texture.as_mut() {
                Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                None => {
                    self.texture = Some(ctx.load_texture("preview_frame", image, egui::TextureOptions::LINEAR))
                }
            }
        }
    }

    pub fn handle(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }
}

/// Image rect that fits `size` into `area` without distortion.
fn fit_rect(area: egui::Rect, size: egui::Vec2) -> egui::Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return area;
    }
    let scale = (area.width() / size.x).min(area.height() / size.y);
    egui::Rect::from_center_size(area.center(), size * scale)
}

fn placeholder(ui: &mut egui::Ui, icon: &str, message: &str, color: egui::Color32) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, width * 9.0 / 16.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 6.0, ui.visuals().extreme_bg_color);
    painter.text(
        rect.center() - egui::vec2(0.0, 14.0),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(32.0),
        color,
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 18.0),
        egui::Align2::CENTER_CENTER,
        message,
        egui::FontId::proportional(14.0),
        color,
    );
}

/// Draws the trim window as three bands under the seek slider.
fn trim_bar(ui: &mut egui::Ui, settings: &EditSettings) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 6.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 2.0, ui.visuals().faint_bg_color);

    let start = (settings.trim_start / 100.0).clamp(0.0, 1.0) as f32;
    let end = (settings.trim_end / 100.0).clamp(0.0, 1.0) as f32;
    if end > start {
        let kept = egui::Rect::from_min_max(
            egui::pos2(rect.left() + rect.width() * start, rect.top()),
            egui::pos2(rect.left() + rect.width() * end, rect.bottom()),
        );
        painter.rect_filled(kept, 2.0, ui.visuals().selection.bg_fill);
    }
}

fn settings_summary(ui: &mut egui::Ui, settings: &EditSettings, duration: f64) {
    egui::Grid::new("preview_settings_summary")
        .num_columns(4)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label(format!("Speed: {}x", settings.speed));
            ui.label(format!("Volume: {}%", (settings.volume * 100.0).round()));
            ui.label(format!("Brightness: {}%", (settings.brightness * 100.0).round()));
            ui.label(format!("Contrast: {}%", (settings.contrast * 100.0).round()));
            ui.end_row();

            let window = settings.trim_window(duration);
            ui.label(format!("Trim Start: {}", format_time(window.start)));
            ui.label(format!("Trim End: {}", format_time(window.end)));
            ui.label(format!("Duration: {}", format_time(window.length())));
            ui.end_row();
        });

    ui.label(egui::RichText::new(format!("Filter: {}", VisualFilter::from_settings(settings).css())).weak());
    if !settings.music.is_empty() {
        ui.label(format!("🎵 Music: {}", settings.music_label()));
    }
}

/// The live preview: frame with text overlay, a play/pause hit area, the
/// seek slider over the trim markers and a summary of the edit.
pub fn video_preview(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    playback: &PlaybackState,
    settings: &EditSettings,
    state: &PreviewState,
) -> Option<PreviewAction> {
    let weak = ui.visuals().weak_text_color();
    match state {
        PreviewState::Failed(_) => {
            let color = ui.visuals().error_fg_color;
            placeholder(ui, "❌", "Failed to load video", color);
            return None;
        }
        PreviewState::Empty => {
            placeholder(ui, "⏳", "No video selected", weak);
            return None;
        }
        PreviewState::Loading if texture.is_none() => {
            placeholder(ui, "⏳", "Loading video...", weak);
            return None;
        }
        PreviewState::Loading | PreviewState::Ready => {}
    }

    let mut action = None;
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, width * 9.0 / 16.0), egui::Sense::click());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 6.0, egui::Color32::BLACK);

    if let Some(texture) = texture {
        let image_rect = fit_rect(rect, texture.size_vec2());
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    if settings.has_overlay() {
        let galley = painter.layout_no_wrap(
            settings.text_overlay.clone(),
            egui::FontId::proportional(18.0),
            egui::Color32::WHITE,
        );
        let pos = egui::pos2(rect.center().x - galley.size().x / 2.0, rect.bottom() - galley.size().y - 20.0);
        let backdrop = egui::Rect::from_min_size(pos, galley.size()).expand2(egui::vec2(12.0, 6.0));
        painter.rect_filled(backdrop, 6.0, egui::Color32::from_black_alpha(180));
        painter.galley(pos, galley, egui::Color32::WHITE);
    }

    if response.hovered() || !playback.is_playing {
        painter.rect_filled(rect, 6.0, egui::Color32::from_black_alpha(60));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            if playback.is_playing { "⏸" } else { "▶" },
            egui::FontId::proportional(48.0),
            egui::Color32::WHITE,
        );
    }
    if response.clicked() {
        action = Some(PreviewAction::TogglePlay);
    }

    let duration = playback.known_duration();
    ui.horizontal(|ui| {
        ui.label(format_time(playback.current_time));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format_time(duration));
        });
    });

    let mut position = playback.current_time;
    let slider_width = ui.available_width();
    ui.spacing_mut().slider_width = slider_width;
    let slider = egui::Slider::new(&mut position, 0.0..=duration.max(0.1))
        .step_by(0.1)
        .show_value(false);
    if ui.add_enabled(playback.duration.is_some(), slider).changed() {
        action = Some(PreviewAction::Seek(position));
    }
    trim_bar(ui, settings);
    ui.add_space(8.0);

    settings_summary(ui, settings, duration);
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_letterboxes() {
        let area = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(320.0, 180.0));
        let fitted = fit_rect(area, egui::vec2(90.0, 160.0));
        assert_eq!(fitted.height(), 180.0);
        assert!((fitted.width() - 101.25).abs() < 1e-3);
        assert_eq!(fitted.center(), area.center());
    }

    #[test]
    fn test_failed_preview_offers_no_actions() {
        let ctx = egui::Context::default();
        let mut action = Some(PreviewAction::TogglePlay);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = video_preview(
                    ui,
                    None,
                    &PlaybackState::new(),
                    &EditSettings::default(),
                    &PreviewState::Failed(crate::error::MediaError::Load("gone".to_string())),
                );
            });
        });
        assert_eq!(action, None);
    }
}
