use serde::{Deserialize, Serialize};

/// The full set of user-adjustable edit parameters for one media resource.
///
/// Trim bounds are percentages of the media duration, not seconds. Range
/// limits are a UI convention only: the model stores whatever it is given
/// and leaves clamping to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditSettings {
    pub trim_start: f64,
    pub trim_end: f64,
    pub speed: f64,
    pub volume: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub text_overlay: String,
    pub music: String,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            trim_start: 0.0,
            trim_end: 100.0,
            speed: 1.0,
            volume: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            text_overlay: String::new(),
            music: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    TrimStart,
    TrimEnd,
    Speed,
    Volume,
    Brightness,
    Contrast,
    TextOverlay,
    Music,
}

/// A single field assignment, carrying its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    TrimStart(f64),
    TrimEnd(f64),
    Speed(f64),
    Volume(f64),
    Brightness(f64),
    Contrast(f64),
    TextOverlay(String),
    Music(String),
}

impl SettingValue {
    pub fn field(&self) -> SettingField {
        match self {
            SettingValue::TrimStart(_) => SettingField::TrimStart,
            SettingValue::TrimEnd(_) => SettingField::TrimEnd,
            SettingValue::Speed(_) => SettingField::Speed,
            SettingValue::Volume(_) => SettingField::Volume,
            SettingValue::Brightness(_) => SettingField::Brightness,
            SettingValue::Contrast(_) => SettingField::Contrast,
            SettingValue::TextOverlay(_) => SettingField::TextOverlay,
            SettingValue::Music(_) => SettingField::Music,
        }
    }
}

/// Trim bounds resolved to absolute seconds for a known duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimWindow {
    pub start: f64,
    pub end: f64,
}

impl TrimWindow {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Resolves a trim percentage against a duration in seconds.
pub fn percent_to_seconds(percent: f64, duration: f64) -> f64 {
    percent / 100.0 * duration
}

impl EditSettings {
    /// Returns a copy with exactly one field replaced.
    pub fn with_field(&self, value: SettingValue) -> EditSettings {
        let mut next = self.clone();
        match value {
            SettingValue::TrimStart(v) => next.trim_start = v,
            SettingValue::TrimEnd(v) => next.trim_end = v,
            SettingValue::Speed(v) => next.speed = v,
            SettingValue::Volume(v) => next.volume = v,
            SettingValue::Brightness(v) => next.brightness = v,
            SettingValue::Contrast(v) => next.contrast = v,
            SettingValue::TextOverlay(v) => next.text_overlay = v,
            SettingValue::Music(v) => next.music = v,
        }
        next
    }

    pub fn trim_start_seconds(&self, duration: f64) -> f64 {
        percent_to_seconds(self.trim_start, duration)
    }

    pub fn trim_end_seconds(&self, duration: f64) -> f64 {
        percent_to_seconds(self.trim_end, duration)
    }

    pub fn trim_window(&self, duration: f64) -> TrimWindow {
        TrimWindow {
            start: self.trim_start_seconds(duration),
            end: self.trim_end_seconds(duration),
        }
    }

    pub fn has_overlay(&self) -> bool {
        !self.text_overlay.is_empty()
    }

    pub fn music_label(&self) -> &str {
        match self.music.as_str() {
            "" => "None",
            "custom" => "Custom Music",
            other => MUSIC_CHOICES
                .iter()
                .find(|(id, _)| *id == other)
                .map(|(_, label)| *label)
                .unwrap_or(other),
        }
    }

    pub fn apply_preset(&self, preset: EditPreset) -> EditSettings {
        preset
            .assignments()
            .into_iter()
            .fold(self.clone(), |settings, value| settings.with_field(value))
    }
}

/// Music identifiers offered by the editor, paired with display labels.
pub const MUSIC_CHOICES: [(&str, &str); 4] = [
    ("upbeat", "Upbeat"),
    ("chill", "Chill"),
    ("epic", "Epic"),
    ("custom", "Custom"),
];

/// Quick actions from the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPreset {
    HalfSpeed,
    NormalSpeed,
    DoubleSpeed,
    TikTokRecap,
    CatMemePop,
    DarkCinema,
}

impl EditPreset {
    pub const ALL: [EditPreset; 6] = [
        EditPreset::HalfSpeed,
        EditPreset::NormalSpeed,
        EditPreset::DoubleSpeed,
        EditPreset::TikTokRecap,
        EditPreset::CatMemePop,
        EditPreset::DarkCinema,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditPreset::HalfSpeed => "0.5x Speed",
            EditPreset::NormalSpeed => "1x Speed",
            EditPreset::DoubleSpeed => "2x Speed",
            EditPreset::TikTokRecap => "TikTok Recap",
            EditPreset::CatMemePop => "Cat Meme Pop",
            EditPreset::DarkCinema => "Dark Cinema",
        }
    }

    fn assignments(&self) -> Vec<SettingValue> {
        match self {
            EditPreset::HalfSpeed => vec![SettingValue::Speed(0.5)],
            EditPreset::NormalSpeed => vec![SettingValue::Speed(1.0)],
            EditPreset::DoubleSpeed => vec![SettingValue::Speed(2.0)],
            EditPreset::TikTokRecap => vec![
                SettingValue::Speed(1.0),
                SettingValue::Brightness(1.1),
                SettingValue::Contrast(1.1),
            ],
            EditPreset::CatMemePop => vec![
                SettingValue::Speed(1.0),
                SettingValue::Brightness(1.15),
                SettingValue::Contrast(1.2),
            ],
            EditPreset::DarkCinema => vec![
                SettingValue::Speed(0.75),
                SettingValue::Brightness(0.95),
                SettingValue::Contrast(1.1),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EditSettings {
        EditSettings {
            trim_start: 10.0,
            trim_end: 50.0,
            speed: 1.5,
            volume: 0.4,
            brightness: 1.2,
            contrast: 0.8,
            text_overlay: "hello".to_string(),
            music: "chill".to_string(),
        }
    }

    #[test]
    fn test_with_field_replaces_only_named_field() {
        let base = sample();
        let values = vec![
            SettingValue::TrimStart(20.0),
            SettingValue::TrimEnd(90.0),
            SettingValue::Speed(3.0),
            SettingValue::Volume(0.0),
            SettingValue::Brightness(2.0),
            SettingValue::Contrast(0.5),
            SettingValue::TextOverlay(String::new()),
            SettingValue::Music("epic".to_string()),
        ];
        for value in values {
            let field = value.field();
            let next = base.with_field(value);
            assert_eq!(next.trim_start == base.trim_start, field != SettingField::TrimStart);
            assert_eq!(next.trim_end == base.trim_end, field != SettingField::TrimEnd);
            assert_eq!(next.speed == base.speed, field != SettingField::Speed);
            assert_eq!(next.volume == base.volume, field != SettingField::Volume);
            assert_eq!(
                next.brightness == base.brightness,
                field != SettingField::Brightness
            );
            assert_eq!(next.contrast == base.contrast, field != SettingField::Contrast);
            assert_eq!(
                next.text_overlay == base.text_overlay,
                field != SettingField::TextOverlay
            );
            assert_eq!(next.music == base.music, field != SettingField::Music);
        }
    }

    #[test]
    fn test_with_field_does_not_clamp() {
        let next = EditSettings::default().with_field(SettingValue::Speed(-4.0));
        assert_eq!(next.speed, -4.0);
        let next = next.with_field(SettingValue::TrimStart(120.0));
        assert_eq!(next.trim_start, 120.0);
    }

    #[test]
    fn test_trim_window_resolves_percentages() {
        let settings = EditSettings {
            trim_start: 10.0,
            trim_end: 50.0,
            ..EditSettings::default()
        };
        let window = settings.trim_window(100.0);
        assert_eq!(window.start, 10.0);
        assert_eq!(window.end, 50.0);
        assert_eq!(window.length(), 40.0);

        let window = settings.trim_window(30.0);
        assert!((window.start - 3.0).abs() < 1e-9);
        assert!((window.end - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_trim_end_monotonic_in_percent() {
        let duration = 73.5;
        let mut last = f64::MIN;
        for percent in 0..=100 {
            let seconds = percent_to_seconds(percent as f64, duration);
            assert!(seconds >= last);
            last = seconds;
        }
        assert!((last - duration).abs() < 1e-9);
    }

    #[test]
    fn test_presets() {
        let base = sample();
        let recap = base.apply_preset(EditPreset::TikTokRecap);
        assert_eq!(recap.speed, 1.0);
        assert_eq!(recap.brightness, 1.1);
        assert_eq!(recap.contrast, 1.1);
        assert_eq!(recap.volume, base.volume);
        assert_eq!(recap.text_overlay, base.text_overlay);

        let half = base.apply_preset(EditPreset::HalfSpeed);
        assert_eq!(half.speed, 0.5);
        assert_eq!(half.brightness, base.brightness);

        let cinema = base.apply_preset(EditPreset::DarkCinema);
        assert_eq!(cinema.speed, 0.75);
        assert_eq!(cinema.brightness, 0.95);
    }

    #[test]
    fn test_music_label() {
        let mut settings = EditSettings::default();
        assert_eq!(settings.music_label(), "None");
        settings.music = "custom".to_string();
        assert_eq!(settings.music_label(), "Custom Music");
        settings.music = "upbeat".to_string();
        assert_eq!(settings.music_label(), "Upbeat");
    }
}
