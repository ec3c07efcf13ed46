use crate::error::MediaError;
use crate::renderer::media_element::{MediaElement, MediaEvent, VisualFilter};
use crate::types::playback_state::PlaybackState;
use crate::types::settings::EditSettings;

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    /// No source supplied yet.
    Empty,
    /// Source supplied, metadata not yet reported.
    Loading,
    Ready,
    /// Latched until a new source is loaded.
    Failed(MediaError),
}

/// Keeps a media element's playback properties in line with the current
/// edit settings and clips continuous playback at the trim end.
///
/// The synchronizer is the only writer of the element's playback state.
/// Position and play flag live in the caller's [`PlaybackState`] so they
/// survive with the session rather than with the element.
pub struct PreviewSynchronizer<M: MediaElement> {
    element: Option<M>,
    state: PreviewState,
}

impl<M: MediaElement> PreviewSynchronizer<M> {
    pub fn new() -> Self {
        Self {
            element: None,
            state: PreviewState::Empty,
        }
    }

    /// Replaces the current source. Clears any latched failure.
    pub fn load(&mut self, element: M) {
        self.element = Some(element);
        self.state = PreviewState::Loading;
    }

    /// Records that a source could not even be opened.
    pub fn load_failed(&mut self, error: MediaError) {
        tracing::error!(error = %error, "Preview source failed to open");
        self.element = None;
        self.state = PreviewState::Failed(error);
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, PreviewState::Failed(_))
    }

    #[cfg(test)]
    pub fn element(&self) -> Option<&M> {
        self.element.as_ref()
    }

    pub fn element_mut(&mut self) -> Option<&mut M> {
        self.element.as_mut()
    }

    /// The element, unless nothing is loaded or playback has failed.
    fn live_element(&mut self) -> Option<&mut M> {
        if self.is_failed() {
            return None;
        }
        self.element.as_mut()
    }

    fn fail(&mut self, playback: &mut PlaybackState, error: MediaError) {
        tracing::error!(error = %error, "Preview playback failed");
        playback.is_playing = false;
        self.state = PreviewState::Failed(error);
    }

    /// Runs once per settings change or time tick.
    ///
    /// Trim end enforcement is reactive: playback that crosses the bound
    /// between two ticks is paused on the later one.
    pub fn sync(&mut self, playback: &mut PlaybackState, settings: &EditSettings) {
        let events = match self.live_element() {
            Some(element) => element.poll_events(),
            None => return,
        };

        for event in events {
            match event {
                MediaEvent::MetadataLoaded { duration } => {
                    tracing::debug!(duration, "Media metadata loaded");
                    playback.duration = Some(duration);
                    if self.state == PreviewState::Loading {
                        self.state = PreviewState::Ready;
                    }
                }
                MediaEvent::TimeUpdate(t) => playback.current_time = t,
                MediaEvent::Ended => playback.is_playing = false,
                MediaEvent::Error(e) => {
                    self.fail(playback, e);
                    return;
                }
            }
        }

        let Some(element) = self.live_element() else {
            return;
        };
        element.set_playback_rate(settings.speed);
        element.set_volume(settings.volume);
        element.set_filter(VisualFilter::from_settings(settings));

        if let (true, Some(duration)) = (playback.is_playing, playback.duration) {
            let trim_end = settings.trim_end_seconds(duration);
            if playback.current_time >= trim_end {
                tracing::debug!(current_time = playback.current_time, trim_end, "Reached trim end");
                element.pause();
                playback.is_playing = false;
            }
        }
    }

    /// Pauses when playing. Otherwise starts playback, first jumping to the
    /// trim start when the position lies outside the trim window.
    pub fn toggle_play(&mut self, playback: &mut PlaybackState, settings: &EditSettings) {
        let outcome = match self.live_element() {
            None => return,
            Some(element) if playback.is_playing => {
                element.pause();
                playback.is_playing = false;
                Ok(())
            }
            Some(element) => Self::start_playback(element, playback, settings),
        };
        if let Err(e) = outcome {
            self.fail(playback, e);
        }
    }

    fn start_playback(
        element: &mut M,
        playback: &mut PlaybackState,
        settings: &EditSettings,
    ) -> Result<(), MediaError> {
        let window = settings.trim_window(playback.known_duration());
        let outside_end = playback.duration.is_some() && playback.current_time >= window.end;
        if playback.current_time < window.start || outside_end {
            element.seek(window.start)?;
            playback.current_time = window.start;
        }
        element.play()?;
        playback.is_playing = true;
        Ok(())
    }

    /// Moves the position directly. Seeking is not clipped to the trim window.
    pub fn seek(&mut self, playback: &mut PlaybackState, seconds: f64) {
        let outcome = match self.live_element() {
            Some(element) => element.seek(seconds),
            None => return,
        };
        match outcome {
            Ok(()) => playback.current_time = seconds,
            Err(e) => self.fail(playback, e),
        }
    }
}

impl<M: MediaElement> Default for PreviewSynchronizer<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::settings::SettingValue;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Rate(f64),
        Volume(f64),
        Filter(VisualFilter),
        Seek(f64),
        Play,
        Pause,
    }

    /// Records every call and replays queued events on the next poll.
    #[derive(Debug, Default)]
    pub struct FakeElement {
        pub calls: Vec<Call>,
        pub queued: Vec<MediaEvent>,
        pub play_error: Option<MediaError>,
    }

    impl MediaElement for FakeElement {
        fn set_playback_rate(&mut self, rate: f64) {
            self.calls.push(Call::Rate(rate));
        }
        fn set_volume(&mut self, volume: f64) {
            self.calls.push(Call::Volume(volume));
        }
        fn set_filter(&mut self, filter: VisualFilter) {
            self.calls.push(Call::Filter(filter));
        }
        fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
            self.calls.push(Call::Seek(seconds));
            Ok(())
        }
        fn play(&mut self) -> Result<(), MediaError> {
            self.calls.push(Call::Play);
            match self.play_error.clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }
        fn poll_events(&mut self) -> Vec<MediaEvent> {
            std::mem::take(&mut self.queued)
        }
    }

    fn loaded(duration: f64) -> (PreviewSynchronizer<FakeElement>, PlaybackState) {
        let mut sync = PreviewSynchronizer::new();
        sync.load(FakeElement {
            queued: vec![MediaEvent::MetadataLoaded { duration }],
            ..FakeElement::default()
        });
        let mut playback = PlaybackState::new();
        sync.sync(&mut playback, &EditSettings::default());
        sync.element_mut().unwrap().calls.clear();
        (sync, playback)
    }

    fn trimmed(start: f64, end: f64) -> EditSettings {
        EditSettings::default()
            .with_field(SettingValue::TrimStart(start))
            .with_field(SettingValue::TrimEnd(end))
    }

    fn calls(sync: &PreviewSynchronizer<FakeElement>) -> Vec<Call> {
        sync.element().unwrap().calls.clone()
    }

    #[test]
    fn test_metadata_sets_duration_and_ready() {
        let (sync, playback) = loaded(42.0);
        assert_eq!(playback.duration, Some(42.0));
        assert_eq!(*sync.state(), PreviewState::Ready);
    }

    #[test]
    fn test_sync_applies_rate_volume_and_filter() {
        let (mut sync, mut playback) = loaded(100.0);
        let settings = EditSettings {
            speed: 2.0,
            volume: 0.3,
            brightness: 1.2,
            contrast: 0.8,
            ..EditSettings::default()
        };
        sync.sync(&mut playback, &settings);
        assert_eq!(
            calls(&sync),
            vec![
                Call::Rate(2.0),
                Call::Volume(0.3),
                Call::Filter(VisualFilter {
                    brightness: 1.2,
                    contrast: 0.8
                })
            ]
        );
    }

    #[test]
    fn test_pauses_at_trim_end_on_next_tick() {
        let (mut sync, mut playback) = loaded(100.0);
        let settings = trimmed(0.0, 50.0);
        sync.toggle_play(&mut playback, &settings);
        assert!(playback.is_playing);

        sync.element_mut().unwrap().queued.push(MediaEvent::TimeUpdate(49.9));
        sync.sync(&mut playback, &settings);
        assert!(playback.is_playing);

        sync.element_mut().unwrap().queued.push(MediaEvent::TimeUpdate(50.2));
        sync.sync(&mut playback, &settings);
        assert!(!playback.is_playing);
        assert_eq!(calls(&sync).last(), Some(&Call::Pause));
    }

    #[test]
    fn test_trim_end_not_enforced_while_paused() {
        let (mut sync, mut playback) = loaded(100.0);
        sync.element_mut().unwrap().queued.push(MediaEvent::TimeUpdate(80.0));
        sync.sync(&mut playback, &trimmed(0.0, 50.0));
        assert!(!calls(&sync).contains(&Call::Pause));
    }

    #[test]
    fn test_shrinking_trim_end_pauses_running_playback() {
        let (mut sync, mut playback) = loaded(100.0);
        sync.toggle_play(&mut playback, &EditSettings::default());
        sync.element_mut().unwrap().queued.push(MediaEvent::TimeUpdate(30.0));
        sync.sync(&mut playback, &EditSettings::default());
        assert!(playback.is_playing);

        sync.sync(&mut playback, &trimmed(0.0, 25.0));
        assert!(!playback.is_playing);
    }

    #[test]
    fn test_toggle_before_trim_start_seeks_first() {
        let (mut sync, mut playback) = loaded(100.0);
        playback.current_time = 3.0;
        sync.toggle_play(&mut playback, &trimmed(10.0, 50.0));
        assert_eq!(calls(&sync), vec![Call::Seek(10.0), Call::Play]);
        assert_eq!(playback.current_time, 10.0);
        assert!(playback.is_playing);
    }

    #[test]
    fn test_toggle_inside_window_resumes() {
        let (mut sync, mut playback) = loaded(100.0);
        playback.current_time = 20.0;
        sync.toggle_play(&mut playback, &trimmed(10.0, 50.0));
        assert_eq!(calls(&sync), vec![Call::Play]);
        assert_eq!(playback.current_time, 20.0);
    }

    #[test]
    fn test_toggle_past_trim_end_restarts_window() {
        let (mut sync, mut playback) = loaded(100.0);
        let settings = trimmed(10.0, 50.0);
        assert_eq!(settings.trim_start_seconds(100.0), 10.0);
        assert_eq!(settings.trim_end_seconds(100.0), 50.0);

        playback.current_time = 60.0;
        sync.toggle_play(&mut playback, &settings);
        assert_eq!(calls(&sync), vec![Call::Seek(10.0), Call::Play]);
        assert!(playback.is_playing);
    }

    #[test]
    fn test_toggle_while_playing_pauses() {
        let (mut sync, mut playback) = loaded(100.0);
        sync.toggle_play(&mut playback, &EditSettings::default());
        sync.toggle_play(&mut playback, &EditSettings::default());
        assert!(!playback.is_playing);
        assert_eq!(calls(&sync), vec![Call::Play, Call::Pause]);
    }

    #[test]
    fn test_seek_ignores_trim_bounds() {
        let (mut sync, mut playback) = loaded(100.0);
        sync.seek(&mut playback, 2.0);
        assert_eq!(playback.current_time, 2.0);
        sync.seek(&mut playback, 95.0);
        assert_eq!(playback.current_time, 95.0);
        assert_eq!(calls(&sync), vec![Call::Seek(2.0), Call::Seek(95.0)]);
    }

    #[test]
    fn test_error_latches_and_stops_mutation() {
        let (mut sync, mut playback) = loaded(100.0);
        sync.toggle_play(&mut playback, &EditSettings::default());
        sync.element_mut()
            .unwrap()
            .queued
            .push(MediaEvent::Error(MediaError::Playback("decoder died".to_string())));
        sync.sync(&mut playback, &EditSettings::default());
        assert!(sync.is_failed());
        assert!(!playback.is_playing);

        let before = calls(&sync).len();
        sync.sync(&mut playback, &EditSettings::default());
        sync.toggle_play(&mut playback, &EditSettings::default());
        sync.seek(&mut playback, 5.0);
        assert_eq!(calls(&sync).len(), before);

        sync.load(FakeElement::default());
        assert_eq!(*sync.state(), PreviewState::Loading);
        sync.sync(&mut playback, &EditSettings::default());
        assert_eq!(calls(&sync).len(), 3);
    }

    #[test]
    fn test_play_failure_enters_error_state() {
        let mut sync = PreviewSynchronizer::new();
        sync.load(FakeElement {
            play_error: Some(MediaError::Playback("not allowed".to_string())),
            ..FakeElement::default()
        });
        let mut playback = PlaybackState::new();
        sync.toggle_play(&mut playback, &EditSettings::default());
        assert!(!playback.is_playing);
        assert!(matches!(sync.state(), PreviewState::Failed(MediaError::Playback(_))));
    }

    #[test]
    fn test_empty_synchronizer_is_inert() {
        let mut sync: PreviewSynchronizer<FakeElement> = PreviewSynchronizer::new();
        let mut playback = PlaybackState::new();
        sync.toggle_play(&mut playback, &EditSettings::default());
        sync.sync(&mut playback, &EditSettings::default());
        assert!(!playback.is_playing);
        assert_eq!(*sync.state(), PreviewState::Empty);
    }
}
