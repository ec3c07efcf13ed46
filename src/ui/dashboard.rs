use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::types::video_library::{StatusCounts, VideoLibrary, VideoRecord, VideoStatus, sample_records, status_counts};
use crate::ui::shell::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    Navigate(Route),
    Delete(String),
    Refresh,
}

const TIPS: [&str; 5] = [
    "Use 9:16 aspect ratio for TikTok videos",
    "Keep videos under 60 seconds for best engagement",
    "Add text overlays for better accessibility",
    "Use upbeat music for better viewer retention",
    "Export in 1080p for best quality",
];

fn status_color(ui: &egui::Ui, status: VideoStatus) -> egui::Color32 {
    match status {
        VideoStatus::Completed => egui::Color32::from_rgb(34, 160, 90),
        VideoStatus::Processing => ui.visuals().warn_fg_color,
        VideoStatus::Failed => ui.visuals().error_fg_color,
    }
}

fn stat_cards(ui: &mut egui::Ui, counts: StatusCounts) {
    ui.columns(4, |cols| {
        let cards = [
            (counts.total, "Total Videos"),
            (counts.completed, "Completed"),
            (counts.processing, "Processing"),
            (counts.failed, "Failed"),
        ];
        for (col, (value, label)) in cols.iter_mut().zip(cards) {
            egui::Frame::group(col.style()).show(col, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(egui::RichText::new(value.to_string()).size(22.0).strong());
                ui.label(egui::RichText::new(label).weak());
            });
        }
    });
}

fn video_table(ui: &mut egui::Ui, records: &[VideoRecord], actions: &mut Vec<DashboardAction>) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto())
        .header(22.0, |mut header| {
            for title in ["Name", "Duration", "Created", "Status", ""] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for record in records {
                body.row(26.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&record.name);
                    });
                    row.col(|ui| {
                        ui.label(&record.duration_label);
                    });
                    row.col(|ui| {
                        ui.label(record.created_at.format("%Y-%m-%d").to_string());
                    });
                    row.col(|ui| {
                        let color = status_color(ui, record.status);
                        ui.colored_label(color, record.status.label());
                    });
                    row.col(|ui| {
                        if ui.small_button("👁").on_hover_text("Preview").clicked() {
                            actions.push(DashboardAction::Navigate(Route::Preview));
                        }
                        if ui.small_button("✏").on_hover_text("Edit").clicked() {
                            actions.push(DashboardAction::Navigate(Route::Editor));
                        }
                        if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                            actions.push(DashboardAction::Delete(record.id.clone()));
                        }
                    });
                });
            }
        });
}

/// Video history with status counts. Before anything is uploaded a few
/// sample rows stand in for the real list.
pub fn dashboard(
    ui: &mut egui::Ui,
    library: &VideoLibrary,
    refreshing: bool,
    refresh_error: Option<&str>,
) -> Vec<DashboardAction> {
    let mut actions = Vec::new();
    let samples;
    let records = if library.is_empty() {
        samples = sample_records();
        samples.as_slice()
    } else {
        library.all_items()
    };

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("Dashboard");
            ui.label("Manage your videos and editing history");
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("+ New Video").clicked() {
                actions.push(DashboardAction::Navigate(Route::Upload));
            }
            if refreshing {
                ui.spinner();
            } else if ui.button("⟳ Refresh").clicked() {
                actions.push(DashboardAction::Refresh);
            }
        });
    });
    if let Some(error) = refresh_error {
        ui.colored_label(ui.visuals().error_fg_color, format!("Could not load videos: {error}"));
    }
    ui.add_space(8.0);

    let counts = if library.is_empty() { status_counts(records) } else { library.counts() };
    stat_cards(ui, counts);
    ui.add_space(12.0);

    ui.strong("Recent Videos");
    video_table(ui, records, &mut actions);
    ui.add_space(12.0);

    ui.strong("💡 Tips:");
    for tip in TIPS {
        ui.label(format!("• {tip}"));
    }

    actions
}
