use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store key for the board. The suffix versions the stored layout.
pub const WORKFLOW_STORE_KEY: &str = "creator-workflow-items-v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowKind {
    MovieRecap,
    CatMeme,
}

impl WorkflowKind {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowKind::MovieRecap => "Movie recap",
            WorkflowKind::CatMeme => "Cat meme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    ScriptEn,
    ScriptMm,
    Tts,
    Edited,
    Subtitles,
    Shorts,
    TikTok,
    Reels,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 8] = [
        WorkflowStep::ScriptEn,
        WorkflowStep::ScriptMm,
        WorkflowStep::Tts,
        WorkflowStep::Edited,
        WorkflowStep::Subtitles,
        WorkflowStep::Shorts,
        WorkflowStep::TikTok,
        WorkflowStep::Reels,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkflowStep::ScriptEn => "Script EN",
            WorkflowStep::ScriptMm => "Script MM",
            WorkflowStep::Tts => "TTS audio",
            WorkflowStep::Edited => "Edited",
            WorkflowStep::Subtitles => "Subtitles",
            WorkflowStep::Shorts => "Shorts",
            WorkflowStep::TikTok => "TikTok",
            WorkflowStep::Reels => "Reels",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSteps {
    pub script_en: bool,
    pub script_mm: bool,
    pub tts: bool,
    pub edited: bool,
    pub subtitles: bool,
    pub shorts: bool,
    pub tiktok: bool,
    pub reels: bool,
}

impl WorkflowSteps {
    pub fn flag_mut(&mut self, step: WorkflowStep) -> &mut bool {
        match step {
            WorkflowStep::ScriptEn => &mut self.script_en,
            WorkflowStep::ScriptMm => &mut self.script_mm,
            WorkflowStep::Tts => &mut self.tts,
            WorkflowStep::Edited => &mut self.edited,
            WorkflowStep::Subtitles => &mut self.subtitles,
            WorkflowStep::Shorts => &mut self.shorts,
            WorkflowStep::TikTok => &mut self.tiktok,
            WorkflowStep::Reels => &mut self.reels,
        }
    }

    pub fn is_done(&self, step: WorkflowStep) -> bool {
        match step {
            WorkflowStep::ScriptEn => self.script_en,
            WorkflowStep::ScriptMm => self.script_mm,
            WorkflowStep::Tts => self.tts,
            WorkflowStep::Edited => self.edited,
            WorkflowStep::Subtitles => self.subtitles,
            WorkflowStep::Shorts => self.shorts,
            WorkflowStep::TikTok => self.tiktok,
            WorkflowStep::Reels => self.reels,
        }
    }

    pub fn completed(&self) -> usize {
        WorkflowStep::ALL
            .iter()
            .filter(|step| self.is_done(**step))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: WorkflowKind,
    pub created_at: DateTime<Utc>,
    pub steps: WorkflowSteps,
}

/// Content ideas tracked across script, voice-over, edit and publishing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowBoard {
    items: Vec<WorkflowItem>,
}

impl WorkflowBoard {
    pub fn new() -> Self {
        WorkflowBoard { items: Vec::new() }
    }

    pub fn items(&self) -> &[WorkflowItem] {
        &self.items
    }

    /// Adds an idea at the top of the board. Blank titles are ignored.
    pub fn add(&mut self, title: &str, kind: WorkflowKind, now: DateTime<Utc>) -> Option<&WorkflowItem> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        self.items.insert(
            0,
            WorkflowItem {
                id: uuid::Uuid::new_v4().to_string(),
                title: title.to_string(),
                kind,
                created_at: now,
                steps: WorkflowSteps::default(),
            },
        );
        self.items.first()
    }

    pub fn toggle_step(&mut self, id: &str, step: WorkflowStep) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                let flag = item.steps.flag_mut(step);
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<WorkflowItem> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(idx))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut board = WorkflowBoard::new();
        assert!(board.add("   ", WorkflowKind::CatMeme, Utc::now()).is_none());
        let item = board
            .add("  John Wick recap part 1 ", WorkflowKind::MovieRecap, Utc::now())
            .cloned()
            .unwrap();
        assert_eq!(item.title, "John Wick recap part 1");
        assert_eq!(item.steps.completed(), 0);

        board.add("Cat in a box", WorkflowKind::CatMeme, Utc::now());
        assert_eq!(board.items()[0].title, "Cat in a box");
        assert_eq!(board.items().len(), 2);
    }

    #[test]
    fn test_toggle_step() {
        let mut board = WorkflowBoard::new();
        let id = board
            .add("Recap", WorkflowKind::MovieRecap, Utc::now())
            .map(|item| item.id.clone())
            .unwrap();
        assert!(board.toggle_step(&id, WorkflowStep::Tts));
        assert!(board.items()[0].steps.is_done(WorkflowStep::Tts));
        assert!(!board.items()[0].steps.is_done(WorkflowStep::Reels));
        assert!(board.toggle_step(&id, WorkflowStep::Tts));
        assert!(!board.items()[0].steps.is_done(WorkflowStep::Tts));
        assert!(!board.toggle_step("unknown", WorkflowStep::Tts));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut board = WorkflowBoard::new();
        let id = board
            .add("One", WorkflowKind::CatMeme, Utc::now())
            .map(|item| item.id.clone())
            .unwrap();
        board.add("Two", WorkflowKind::CatMeme, Utc::now());
        assert!(board.remove(&id).is_some());
        assert_eq!(board.items().len(), 1);
        board.clear();
        assert!(board.items().is_empty());
    }

    #[test]
    fn test_stored_layout() {
        let mut board = WorkflowBoard::new();
        board.add("Recap", WorkflowKind::MovieRecap, Utc::now());
        let json = serde_json::to_value(&board).unwrap();
        let item = &json[0];
        assert_eq!(item["type"], "movie-recap");
        assert_eq!(item["steps"]["scriptEn"], false);
        assert!(item["createdAt"].is_string());

        let back: WorkflowBoard = serde_json::from_value(json).unwrap();
        assert_eq!(back, board);
    }
}
