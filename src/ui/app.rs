use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use eframe::egui;

use crate::api::BackendClient;
use crate::renderer::gst_player::GstMediaElement;
use crate::ui::creator::{self, WorkflowAction, WorkflowDraft};
use crate::ui::dashboard::{DashboardAction, dashboard};
use crate::ui::editor_page::editor_page;
use crate::ui::preview_page::preview_page;
use crate::ui::shell::{Route, ShellState};
use crate::ui::upload_page::{UploadAction, upload_page};
use crate::ui::video_preview::{PreviewAction, PreviewTexture};
use crate::types::theme::ThemeChoice;

/// Repaint cadence while a video is playing.
const PLAYBACK_FRAME: Duration = Duration::from_millis(16);

pub struct ReelcutApp {
    pub state: ShellState<GstMediaElement>,
    client: Option<BackendClient>,
    health: Option<Receiver<bool>>,
    backend_online: Option<bool>,
    texture: PreviewTexture,
    workflow_draft: WorkflowDraft,
}

impl ReelcutApp {
    pub fn new(state: ShellState<GstMediaElement>, client: Option<BackendClient>) -> Self {
        let health = client.as_ref().map(|client| {
            let (tx, rx) = crossbeam_channel::bounded(1);
            let client = client.clone();
            std::thread::spawn(move || {
                let online = match client.health() {
                    Ok(body) => {
                        tracing::info!(response = %body, "Backend reachable");
                        true
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Backend health check failed");
                        false
                    }
                };
                let _ = tx.send(online);
            });
            rx
        });

        Self {
            state,
            client,
            health,
            backend_online: None,
            texture: PreviewTexture::default(),
            workflow_draft: WorkflowDraft::default(),
        }
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        let preference = match self.state.theme() {
            ThemeChoice::Light => egui::ThemePreference::Light,
            ThemeChoice::Dark => egui::ThemePreference::Dark,
            ThemeChoice::System => egui::ThemePreference::System,
        };
        ctx.options_mut(|o| o.theme_preference = preference);
    }

    fn refresh_videos(&mut self) {
        match &self.client {
            Some(client) => client.spawn_list_videos(self.state.begin_refresh()),
            None => tracing::warn!("No backend configured; refresh skipped"),
        }
    }

    fn header(&mut self, ctx: &egui::Context) {
        if let Some(online) = self.health.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.backend_online = Some(online);
            self.health = None;
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🎬 Reelcut");
                ui.label(egui::RichText::new("AI Video Editor").weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut theme = self.state.theme();
                    egui::ComboBox::from_id_salt("theme_selector")
                        .selected_text(theme.label())
                        .show_ui(ui, |ui| {
                            for choice in ThemeChoice::ALL {
                                ui.selectable_value(&mut theme, choice, choice.label());
                            }
                        });
                    let system_dark = ctx.system_theme() == Some(egui::Theme::Dark);
                    let icon = if self.state.theme().is_dark(system_dark) { "☀" } else { "🌙" };
                    if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                        theme = self.state.theme().toggled(system_dark);
                    }
                    if theme != self.state.theme() {
                        self.state.set_theme(theme);
                    }

                    let (color, text) = match self.backend_online {
                        Some(true) => (egui::Color32::from_rgb(34, 160, 90), "Backend online"),
                        Some(false) => (ui.visuals().error_fg_color, "Backend offline"),
                        None => (ui.visuals().weak_text_color(), "Checking backend..."),
                    };
                    let status = ui.colored_label(color, text);
                    if let Some(client) = &self.client {
                        status.on_hover_text(client.base_url());
                    }
                });
            });
        });
    }

    fn sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                let current = self.state.route();
                let mut target = None;

                ui.add_space(8.0);
                ui.label(egui::RichText::new("QUICK ACTIONS").small().weak());
                for route in Route::QUICK_ACTIONS {
                    if ui.selectable_label(current == route, route.label()).clicked() {
                        target = Some(route);
                    }
                }
                ui.add_space(12.0);
                ui.label(egui::RichText::new("CREATOR TOOLS").small().weak());
                for route in Route::CREATOR_TOOLS {
                    if ui.selectable_label(current == route, route.label()).clicked() {
                        target = Some(route);
                    }
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.label(egui::RichText::new(concat!("Reelcut v", env!("CARGO_PKG_VERSION"))).small().weak());
                });

                if let Some(route) = target {
                    self.state.navigate(route);
                }
            });
    }

    fn handle_preview_action(&mut self, action: Option<PreviewAction>) {
        match action {
            Some(PreviewAction::TogglePlay) => self.state.toggle_play(),
            Some(PreviewAction::Seek(seconds)) => self.state.seek(seconds),
            None => {}
        }
    }

    fn page(&mut self, ui: &mut egui::Ui, now: Instant) {
        match self.state.route() {
            Route::Dashboard => {
                let actions = dashboard(
                    ui,
                    &self.state.library,
                    self.state.is_refreshing(),
                    self.state.refresh_error(),
                );
                for action in actions {
                    match action {
                        DashboardAction::Navigate(route) => self.state.navigate(route),
                        DashboardAction::Delete(id) => self.state.delete_record(&id),
                        DashboardAction::Refresh => self.refresh_videos(),
                    }
                }
            }
            Route::Upload => {
                match upload_page(ui, self.state.upload_job(), self.state.upload_error()) {
                    Some(UploadAction::Selected(path)) => self.state.select_path(&path, now),
                    Some(UploadAction::Navigate(route)) => self.state.navigate(route),
                    None => {}
                }
            }
            Route::Editor => {
                let Some(session) = &self.state.session else {
                    return;
                };
                let out = editor_page(
                    ui,
                    self.texture.handle(),
                    session,
                    &self.state.settings,
                    self.state.preview.state(),
                );
                for event in out.events {
                    self.state.handle_editor_event(event);
                }
                self.handle_preview_action(out.preview);
                if out.back {
                    self.state.navigate(Route::Upload);
                }
            }
            Route::Preview => {
                let Some(session) = &self.state.session else {
                    return;
                };
                let mut options = self.state.export_options;
                let out = preview_page(
                    ui,
                    self.texture.handle(),
                    session,
                    &self.state.settings,
                    self.state.preview.state(),
                    &mut options,
                    self.state.export_job(),
                    self.state.export_notice(),
                );
                self.state.export_options = options;
                self.handle_preview_action(out.preview);
                if out.export {
                    self.state.start_export(now);
                }
                if out.back {
                    self.state.navigate(Route::Editor);
                }
            }
            Route::CreatorTools => {
                if let Some(route) = creator::creator_hub(ui) {
                    self.state.navigate(route);
                }
            }
            Route::ScriptHelper => creator::script_helper(ui, &mut self.state.script),
            Route::Workflows => creator::workflows_guide(ui),
            Route::WorkflowBoard => {
                let actions = creator::workflow_board(ui, self.state.workflows(), &mut self.workflow_draft);
                for action in actions {
                    match action {
                        WorkflowAction::Add { title, kind } => {
                            self.state.add_workflow(&title, kind, chrono::Utc::now());
                        }
                        WorkflowAction::Toggle { id, step } => self.state.toggle_workflow_step(&id, step),
                        WorkflowAction::Remove(id) => self.state.remove_workflow(&id),
                        WorkflowAction::Clear => self.state.clear_workflows(),
                    }
                }
            }
            Route::Resources => creator::resources(ui),
        }
    }
}

impl eframe::App for ReelcutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.tick(now, chrono::Local::now().date_naive());
        self.apply_theme(ctx);

        let showing_preview = self.state.route().shows_preview();
        let element = if showing_preview { self.state.preview.element_mut() } else { None };
        self.texture.update(ctx, element);

        self.header(ctx);
        self.sidebar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                self.page(ui, now);
            });
        });

        let playing = self
            .state
            .session
            .as_ref()
            .is_some_and(|session| session.playback.is_playing);
        if playing {
            ctx.request_repaint_after(PLAYBACK_FRAME);
        } else if let Some(wait) = self.state.until_next_tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        } else if self.state.is_refreshing() || self.health.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
