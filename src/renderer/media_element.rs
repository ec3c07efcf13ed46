use crate::error::MediaError;
use crate::types::settings::EditSettings;

/// Brightness and contrast multipliers applied to the displayed picture
/// only. Always carried together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualFilter {
    pub brightness: f64,
    pub contrast: f64,
}

impl VisualFilter {
    pub fn from_settings(settings: &EditSettings) -> Self {
        Self {
            brightness: settings.brightness,
            contrast: settings.contrast,
        }
    }

    /// CSS filter notation, e.g. `brightness(1.1) contrast(1.2)`.
    pub fn css(&self) -> String {
        format!("brightness({}) contrast({})", self.brightness, self.contrast)
    }
}

impl Default for VisualFilter {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
        }
    }
}

/// Notifications a media element raises between polls.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    MetadataLoaded { duration: f64 },
    TimeUpdate(f64),
    Ended,
    Error(MediaError),
}

/// A playable media resource with native playback properties.
///
/// Implementations must not decode anything for the caller: rate, volume
/// and filter are playback properties, not processing steps.
pub trait MediaElement {
    fn set_playback_rate(&mut self, rate: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_filter(&mut self, filter: VisualFilter);
    fn seek(&mut self, seconds: f64) -> Result<(), MediaError>;
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    /// Drains events raised since the previous call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
