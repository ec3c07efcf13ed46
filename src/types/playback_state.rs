/// Runtime playback position of the active media. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_time: f64,
    /// Unknown until the media reports its metadata.
    pub duration: Option<f64>,
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            duration: None,
            is_playing: false,
        }
    }

    /// Duration for trim arithmetic; zero while still unknown.
    pub fn known_duration(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
