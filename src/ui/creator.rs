//! Creator pages: tool hub, script helper, workflow guide and board, and
//! resource links. None of them touch the video session.

use eframe::egui;

use crate::types::script::{ScriptLanguage, ScriptRequest, ScriptStyle, TARGET_LENGTHS};
use crate::types::workflow::{WorkflowBoard, WorkflowKind, WorkflowStep};
use crate::ui::shell::Route;

pub fn creator_hub(ui: &mut egui::Ui) -> Option<Route> {
    let mut target = None;
    ui.heading("Creator Tools");
    ui.label("A central place for tools that help you write scripts, plan videos, and reuse content.");
    ui.add_space(12.0);

    let entries = [
        (Route::ScriptHelper, "Prepare English + Burmese scripts for TTS and captions."),
        (Route::Workflows, "Quick reference for movie recaps and cat meme production."),
        (Route::WorkflowBoard, "Track ideas from script to publishing."),
        (Route::Resources, "Stock footage sites and recording ideas."),
    ];
    for (route, blurb) in entries {
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            if ui.link(egui::RichText::new(route.label()).strong()).clicked() {
                target = Some(route);
            }
            ui.label(egui::RichText::new(blurb).weak());
        });
    }
    target
}

pub fn script_helper(ui: &mut egui::Ui, request: &mut ScriptRequest) {
    ui.heading("Script Helper");
    ui.label("Prepare structured prompts and script outlines for Gemini TTS or any AI writer.");
    ui.add_space(12.0);

    egui::Grid::new("script_form")
        .num_columns(2)
        .spacing([24.0, 8.0])
        .show(ui, |ui| {
            ui.label("Movie / Video title");
            ui.add(
                egui::TextEdit::singleline(&mut request.title)
                    .hint_text("John Wick, Spider-Man, cat meme, etc."),
            );
            ui.end_row();

            ui.label("Target length");
            egui::ComboBox::from_id_salt("script_length")
                .selected_text(format!("{} seconds", request.target_seconds))
                .show_ui(ui, |ui| {
                    for seconds in TARGET_LENGTHS {
                        ui.selectable_value(&mut request.target_seconds, seconds, format!("{seconds} seconds"));
                    }
                });
            ui.end_row();

            ui.label("Style");
            egui::ComboBox::from_id_salt("script_style")
                .selected_text(request.style.label())
                .show_ui(ui, |ui| {
                    for style in ScriptStyle::ALL {
                        ui.selectable_value(&mut request.style, style, style.label());
                    }
                });
            ui.end_row();

            ui.label("Language mix");
            egui::ComboBox::from_id_salt("script_language")
                .selected_text(request.language.label())
                .show_ui(ui, |ui| {
                    for language in ScriptLanguage::ALL {
                        ui.selectable_value(&mut request.language, language, language.label());
                    }
                });
            ui.end_row();
        });

    ui.label("Extra notes (optional)");
    ui.add(
        egui::TextEdit::multiline(&mut request.notes)
            .hint_text("Any constraints, tone, or jokes you want to include.")
            .desired_rows(3),
    );
    ui.add_space(12.0);

    let prompt = request.prompt();
    ui.horizontal(|ui| {
        ui.strong("Prompt template for AI");
        if ui.button("📋 Copy").clicked() {
            ui.ctx().copy_text(prompt.clone());
        }
    });
    ui.label(egui::RichText::new("Copy-paste this into Gemini / ChatGPT to generate English and Burmese scripts.").weak());
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(egui::RichText::new(prompt).monospace());
    });
}

const MOVIE_RECAP_STEPS: [&str; 5] = [
    "Pick movie and angle (full story / ending explained / what you missed).",
    "Generate EN + MM scripts using Script Helper + AI writer.",
    "Create voiceover with Gemini TTS (EN and optional MM).",
    "Collect clips or b-roll, edit in the editor, add subtitles.",
    "Export one 9:16 video and post to Shorts, TikTok, and Reels.",
];

const CAT_MEME_STEPS: [&str; 5] = [
    "Collect cat clips (your own, friends, or stock footage).",
    "Decide the joke/emotion and generate meme lines (EN + MM).",
    "Optionally create a short voiceover, or rely on strong text overlays.",
    "Edit fast, add music/SFX, keep it 10-30 seconds.",
    "Export once and reuse the clip across all platforms.",
];

pub fn workflows_guide(ui: &mut egui::Ui) {
    ui.heading("Workflows");
    ui.label("High-level guides for movie recap and cat meme production. Use this as a checklist while you work.");
    for (title, steps) in [("Movie Recap", MOVIE_RECAP_STEPS), ("Cat Memes", CAT_MEME_STEPS)] {
        ui.add_space(12.0);
        ui.strong(title);
        for (i, step) in steps.iter().enumerate() {
            ui.label(format!("{}. {step}", i + 1));
        }
    }
}

/// Unsaved input of the "Add new idea" form.
#[derive(Debug, Clone)]
pub struct WorkflowDraft {
    pub title: String,
    pub kind: WorkflowKind,
}

impl Default for WorkflowDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            kind: WorkflowKind::MovieRecap,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowAction {
    Add { title: String, kind: WorkflowKind },
    Toggle { id: String, step: WorkflowStep },
    Remove(String),
    Clear,
}

pub fn workflow_board(ui: &mut egui::Ui, board: &WorkflowBoard, draft: &mut WorkflowDraft) -> Vec<WorkflowAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("Workflow Board");
            ui.label("Track each idea from script to publishing. Saved on this computer.");
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!board.items().is_empty(), egui::Button::new("Clear all"))
                .clicked()
            {
                actions.push(WorkflowAction::Clear);
            }
        });
    });
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.strong("Add new idea");
        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut draft.title).hint_text("Movie title or meme idea"),
            );
            egui::ComboBox::from_id_salt("workflow_kind")
                .selected_text(draft.kind.label())
                .show_ui(ui, |ui| {
                    for kind in [WorkflowKind::MovieRecap, WorkflowKind::CatMeme] {
                        ui.selectable_value(&mut draft.kind, kind, kind.label());
                    }
                });
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("Add").clicked() || submitted) && !draft.title.trim().is_empty() {
                actions.push(WorkflowAction::Add {
                    title: std::mem::take(&mut draft.title),
                    kind: draft.kind,
                });
            }
        });
    });
    ui.add_space(8.0);

    if board.items().is_empty() {
        ui.label(egui::RichText::new("No ideas yet. Add one above to start tracking.").weak());
    }
    for item in board.items() {
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.strong(&item.title);
                ui.label(egui::RichText::new(item.kind.label()).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Remove").clicked() {
                        actions.push(WorkflowAction::Remove(item.id.clone()));
                    }
                    ui.label(format!(
                        "{}/{} done",
                        item.steps.completed(),
                        WorkflowStep::ALL.len()
                    ));
                });
            });
            ui.label(
                egui::RichText::new(format!("Created {}", item.created_at.format("%Y-%m-%d %H:%M")))
                    .small()
                    .weak(),
            );
            ui.horizontal_wrapped(|ui| {
                for step in WorkflowStep::ALL {
                    let mut done = item.steps.is_done(step);
                    if ui.checkbox(&mut done, step.label()).changed() {
                        actions.push(WorkflowAction::Toggle {
                            id: item.id.clone(),
                            step,
                        });
                    }
                }
            });
        });
    }

    actions
}

const STOCK_SITES: [(&str, &str); 4] = [
    ("Pexels Videos", "https://www.pexels.com/videos/"),
    ("Pixabay Videos", "https://pixabay.com/videos/"),
    ("Coverr", "https://coverr.co/"),
    ("Unsplash", "https://unsplash.com/"),
];

const RECORDING_IDEAS: [&str; 4] = [
    "Record your screen while browsing, playing games, or explaining something.",
    "Film only hands (keyboard, drawing tablet, phone, etc.).",
    "Capture ambient scenes: desk setup, city lights, coffee shop, etc.",
    "Reuse your own cat/pet clips for memes and reactions.",
];

const RECAP_VISUAL_TIPS: [&str; 4] = [
    "Use short scenes (2-4 seconds) instead of long continuous clips.",
    "Crop aggressively and add zoom to make the footage feel original.",
    "Mix real clips with stock footage for transitions and intros.",
    "Always layer strong subtitles and text so viewers can follow without sound.",
];

pub fn resources(ui: &mut egui::Ui) {
    ui.heading("Resources");
    ui.label(
        "Quick access to stock footage, images, and recording ideas so you can build videos faster without showing your face.",
    );

    ui.add_space(12.0);
    ui.strong("Stock Video & Images");
    ui.label(egui::RichText::new("Use these sites for b-roll, cat clips, and background footage.").weak());
    for (name, url) in STOCK_SITES {
        ui.hyperlink_to(name, url);
    }

    ui.add_space(12.0);
    ui.strong("Recording Ideas");
    for idea in RECORDING_IDEAS {
        ui.label(format!("• {idea}"));
    }

    ui.add_space(12.0);
    ui.strong("Movie Recap Visual Tips");
    for tip in RECAP_VISUAL_TIPS {
        ui.label(format!("• {tip}"));
    }
}
