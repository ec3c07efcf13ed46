use serde::{Deserialize, Serialize};

/// Persisted appearance preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 3] = [ThemeChoice::Light, ThemeChoice::Dark, ThemeChoice::System];

    pub fn label(&self) -> &'static str {
        match self {
            ThemeChoice::Light => "Light",
            ThemeChoice::Dark => "Dark",
            ThemeChoice::System => "System",
        }
    }

    /// Whether the UI renders dark, given what the OS currently prefers.
    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self {
            ThemeChoice::Light => false,
            ThemeChoice::Dark => true,
            ThemeChoice::System => system_prefers_dark,
        }
    }

    /// Flips to the explicit opposite of what is currently rendered.
    pub fn toggled(&self, system_prefers_dark: bool) -> ThemeChoice {
        if self.is_dark(system_prefers_dark) {
            ThemeChoice::Light
        } else {
            ThemeChoice::Dark
        }
    }
}
