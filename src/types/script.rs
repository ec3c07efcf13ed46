/// Inputs of the script helper page.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRequest {
    pub title: String,
    pub target_seconds: u32,
    pub style: ScriptStyle,
    pub language: ScriptLanguage,
    pub notes: String,
}

impl Default for ScriptRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            target_seconds: 60,
            style: ScriptStyle::Recap,
            language: ScriptLanguage::EnglishBurmese,
            notes: String::new(),
        }
    }
}

pub const TARGET_LENGTHS: [u32; 3] = [30, 60, 90];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStyle {
    Recap,
    Ending,
    Meme,
}

impl ScriptStyle {
    pub const ALL: [ScriptStyle; 3] = [ScriptStyle::Recap, ScriptStyle::Ending, ScriptStyle::Meme];

    pub fn label(&self) -> &'static str {
        match self {
            ScriptStyle::Recap => "Movie recap",
            ScriptStyle::Ending => "Ending explained",
            ScriptStyle::Meme => "Meme / funny narration",
        }
    }

    fn prompt_name(&self) -> &'static str {
        match self {
            ScriptStyle::Recap => "movie recap",
            ScriptStyle::Ending => "ending explained",
            ScriptStyle::Meme => "meme / funny narration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLanguage {
    English,
    EnglishBurmese,
}

impl ScriptLanguage {
    pub const ALL: [ScriptLanguage; 2] = [ScriptLanguage::English, ScriptLanguage::EnglishBurmese];

    pub fn label(&self) -> &'static str {
        match self {
            ScriptLanguage::English => "English only (YouTube Shorts)",
            ScriptLanguage::EnglishBurmese => "English + Burmese mix",
        }
    }
}

impl ScriptRequest {
    /// Prompt text to paste into an AI writer.
    pub fn prompt(&self) -> String {
        let title = if self.title.trim().is_empty() {
            "[fill in movie / topic here]"
        } else {
            self.title.trim()
        };
        let notes = if self.notes.trim().is_empty() {
            "[none]"
        } else {
            self.notes.trim()
        };
        let bilingual = self.language == ScriptLanguage::EnglishBurmese;

        let mut out = String::new();
        out.push_str("You are helping me write a short-form video script.\n\n");
        out.push_str(&format!("Video type: {}\n", self.style.prompt_name()));
        out.push_str(&format!("Title or topic: {title}\n"));
        out.push_str(&format!("Target length: ~{} seconds.\n\n", self.target_seconds));
        out.push_str("Language:\n- Primary: English\n");
        if bilingual {
            out.push_str("- Also provide a Burmese version with casual tone for TikTok/Reels.\n");
        }
        out.push_str("\nRequirements:\n");
        out.push_str("- Strong hook in the first 2 lines.\n");
        out.push_str("- Simple, natural language.\n");
        out.push_str("- Structure: hook → setup → conflict/twist → payoff.\n");
        out.push_str("- No heavy swearing, keep it platform-friendly.\n\n");
        out.push_str("If possible, output:\n1) English script for voiceover.\n");
        if bilingual {
            out.push_str(
                "2) Burmese script with similar meaning, casual Burmese for captions or MM voiceover.\n",
            );
        }
        out.push_str(&format!("\nAdditional notes from me:\n{notes}\n"));
        out
    }
}
