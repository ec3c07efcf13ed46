use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, Utc};
use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::api::{ApiVideo, UploadRegistrar};
use crate::error::{ApiError, MediaError};
use crate::ops::export::{ExportEvent, ExportJob, ExportOptions};
use crate::ops::format::format_time;
use crate::ops::upload::{UploadEvent, UploadJob};
use crate::renderer::media_element::MediaElement;
use crate::renderer::preview_sync::PreviewSynchronizer;
use crate::store::JsonStore;
use crate::types::media::FileDescriptor;
use crate::types::script::ScriptRequest;
use crate::types::session::MediaSession;
use crate::types::settings::EditSettings;
use crate::types::theme::ThemeChoice;
use crate::types::video_library::{VideoLibrary, VideoRecord};
use crate::types::workflow::{WORKFLOW_STORE_KEY, WorkflowBoard, WorkflowKind, WorkflowStep};
use crate::ui::control_panel::EditorEvent;

pub const SETTINGS_STORE_KEY: &str = "settings";
pub const THEME_STORE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Upload,
    Editor,
    Preview,
    CreatorTools,
    ScriptHelper,
    Workflows,
    WorkflowBoard,
    Resources,
}

impl Route {
    pub const QUICK_ACTIONS: [Route; 4] = [Route::Upload, Route::Editor, Route::Preview, Route::Dashboard];
    pub const CREATOR_TOOLS: [Route; 5] = [
        Route::CreatorTools,
        Route::ScriptHelper,
        Route::Workflows,
        Route::WorkflowBoard,
        Route::Resources,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Upload => "Upload",
            Route::Editor => "Edit",
            Route::Preview => "Preview",
            Route::CreatorTools => "Creator Tools",
            Route::ScriptHelper => "Script Helper",
            Route::Workflows => "Workflows",
            Route::WorkflowBoard => "Workflow Board",
            Route::Resources => "Resources",
        }
    }

    /// Pages that show the live preview.
    pub fn shows_preview(&self) -> bool {
        matches!(self, Route::Editor | Route::Preview)
    }

    /// Pages that make no sense without an uploaded video.
    pub fn needs_session(&self) -> bool {
        matches!(self, Route::Editor | Route::Preview)
    }
}

pub type MediaOpener<M> = Box<dyn Fn(&FileDescriptor) -> Result<M, MediaError>>;

type RemoteVideos = Result<Vec<ApiVideo>, ApiError>;

/// Everything the page shell owns, independent of how it is drawn.
///
/// Tasks (upload, export, backend refresh) are values held here and are
/// advanced by [`tick`](Self::tick) with a caller-supplied clock.
pub struct ShellState<M: MediaElement> {
    route: Route,
    pub session: Option<MediaSession>,
    pub settings: EditSettings,
    pub library: VideoLibrary,
    pub preview: PreviewSynchronizer<M>,
    pub export_options: ExportOptions,
    pub script: ScriptRequest,
    upload: Option<UploadJob>,
    upload_error: Option<String>,
    export: Option<ExportJob>,
    export_notice: Option<String>,
    theme: ThemeChoice,
    workflows: WorkflowBoard,
    refresh: Option<Receiver<RemoteVideos>>,
    refresh_error: Option<String>,
    opener: MediaOpener<M>,
    registrar: Box<dyn UploadRegistrar>,
    store: Option<JsonStore>,
}

impl<M: MediaElement> ShellState<M> {
    /// Restores settings, theme and workflow board from `store` when given.
    pub fn new(opener: MediaOpener<M>, registrar: Box<dyn UploadRegistrar>, store: Option<JsonStore>) -> Self {
        let (settings, theme, workflows) = match &store {
            Some(store) => (
                store.load_or_default(SETTINGS_STORE_KEY),
                store.load_or_default(THEME_STORE_KEY),
                store.load_or_default(WORKFLOW_STORE_KEY),
            ),
            None => Default::default(),
        };

        Self {
            route: Route::Upload,
            session: None,
            settings,
            library: VideoLibrary::new(),
            preview: PreviewSynchronizer::new(),
            export_options: ExportOptions::default(),
            script: ScriptRequest::default(),
            upload: None,
            upload_error: None,
            export: None,
            export_notice: None,
            theme,
            workflows,
            refresh: None,
            refresh_error: None,
            opener,
            registrar,
            store,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Switches pages. Leaving a page cancels its running task and pauses
    /// the preview when the new page does not show it.
    pub fn navigate(&mut self, route: Route) {
        let route = if route.needs_session() && self.session.is_none() {
            Route::Upload
        } else {
            route
        };
        if route == self.route {
            return;
        }
        tracing::debug!(from = ?self.route, to = ?route, "Navigating");

        if let Some(job) = self.upload.as_mut() {
            job.cancel();
        }
        self.upload = None;
        if let Some(job) = self.export.as_mut() {
            job.cancel();
        }
        self.export = None;
        self.export_notice = None;

        if !route.shows_preview() {
            if let Some(session) = self.session.as_mut() {
                if session.playback.is_playing {
                    self.preview.toggle_play(&mut session.playback, &self.settings);
                }
            }
        }
        self.route = route;
    }

    pub fn upload_job(&self) -> Option<&UploadJob> {
        self.upload.as_ref()
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    pub fn export_job(&self) -> Option<&ExportJob> {
        self.export.as_ref()
    }

    pub fn export_notice(&self) -> Option<&str> {
        self.export_notice.as_deref()
    }

    pub fn theme(&self) -> ThemeChoice {
        self.theme
    }

    pub fn workflows(&self) -> &WorkflowBoard {
        &self.workflows
    }

    pub fn refresh_error(&self) -> Option<&str> {
        self.refresh_error.as_deref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    /// Reads a picked or dropped file from disk and starts uploading it.
    pub fn select_path(&mut self, path: &Path, now: Instant) {
        match FileDescriptor::from_path(path) {
            Ok(file) => self.start_upload(file, now),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read selected file");
                self.upload_error = Some(format!("Cannot read file: {e}"));
            }
        }
    }

    /// Validates `file` and, when accepted, registers it with the backend
    /// and starts the upload progress. A rejected file leaves no task.
    pub fn start_upload(&mut self, file: FileDescriptor, now: Instant) {
        if let Some(job) = self.upload.as_mut() {
            job.cancel();
        }
        self.upload = None;

        match UploadJob::begin(file, self.registrar.as_ref(), now) {
            Ok(job) => {
                self.upload = Some(job);
                self.upload_error = None;
            }
            Err(e) => self.upload_error = Some(e.to_string()),
        }
    }

    /// Creates the record and session for an uploaded file, opens it for
    /// preview and moves to the editor.
    fn finish_upload(&mut self, file: FileDescriptor, today: NaiveDate) {
        let record = VideoRecord::processing(file.file_name.clone(), today);
        let record_id = record.id.clone();
        self.library.add(record);

        match (self.opener)(&file) {
            Ok(element) => self.preview.load(element),
            Err(e) => self.preview.load_failed(e),
        }
        tracing::info!(file = %file.file_name, record_id = %record_id, "Upload complete");
        self.session = Some(MediaSession::new(record_id, file));
        self.upload = None;
        self.route = Route::Editor;
    }

    /// Starts a fresh export for the current session, replacing any
    /// previous one.
    pub fn start_export(&mut self, now: Instant) {
        let Some(session) = &self.session else {
            tracing::warn!("Export requested without a video");
            return;
        };
        if let Some(job) = self.export.as_mut() {
            job.cancel();
        }
        self.export_notice = None;
        self.export = Some(ExportJob::start(
            session.record_id.clone(),
            &self.settings,
            self.export_options,
            now,
        ));
    }

    pub fn handle_editor_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::Edited(settings) => self.settings = settings,
            EditorEvent::Export => self.navigate(Route::Preview),
            EditorEvent::Save => {
                if let Some(store) = &self.store {
                    store.save_logged(SETTINGS_STORE_KEY, &self.settings);
                }
                tracing::info!("Edit settings saved");
            }
        }
    }

    pub fn toggle_play(&mut self) {
        if let Some(session) = self.session.as_mut() {
            self.preview.toggle_play(&mut session.playback, &self.settings);
        }
    }

    pub fn seek(&mut self, seconds: f64) {
        if let Some(session) = self.session.as_mut() {
            self.preview.seek(&mut session.playback, seconds);
        }
    }

    /// Removes a record from the local list. The backend is not told.
    pub fn delete_record(&mut self, id: &str) {
        if let Some(record) = self.library.remove(id) {
            tracing::info!(id, name = %record.name, "Deleted video record");
        }
    }

    pub fn set_theme(&mut self, theme: ThemeChoice) {
        self.theme = theme;
        if let Some(store) = &self.store {
            store.save_logged(THEME_STORE_KEY, &theme);
        }
    }

    pub fn add_workflow(&mut self, title: &str, kind: WorkflowKind, now: DateTime<Utc>) -> bool {
        let added = self.workflows.add(title, kind, now).is_some();
        if added {
            self.persist_workflows();
        }
        added
    }

    pub fn toggle_workflow_step(&mut self, id: &str, step: WorkflowStep) {
        if self.workflows.toggle_step(id, step) {
            self.persist_workflows();
        }
    }

    pub fn remove_workflow(&mut self, id: &str) {
        if self.workflows.remove(id).is_some() {
            self.persist_workflows();
        }
    }

    pub fn clear_workflows(&mut self) {
        self.workflows.clear();
        self.persist_workflows();
    }

    fn persist_workflows(&self) {
        if let Some(store) = &self.store {
            store.save_logged(WORKFLOW_STORE_KEY, &self.workflows);
        }
    }

    /// Hands out the sending half for a backend refresh. A refresh already
    /// in flight is superseded.
    pub fn begin_refresh(&mut self) -> Sender<RemoteVideos> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.refresh = Some(rx);
        self.refresh_error = None;
        tx
    }

    fn poll_refresh(&mut self) {
        let Some(rx) = &self.refresh else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(videos)) => {
                let added = self.library.merge_remote(&videos);
                tracing::info!(fetched = videos.len(), added, "Merged backend videos");
                self.refresh = None;
            }
            Ok(Err(e)) => {
                self.refresh_error = Some(e.to_string());
                self.refresh = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.refresh = None,
        }
    }

    /// Advances tasks and keeps the preview in step with the settings.
    pub fn tick(&mut self, now: Instant, today: NaiveDate) {
        let upload_events = match self.upload.as_mut() {
            Some(job) => job.poll(now),
            None => Vec::new(),
        };
        for event in upload_events {
            if let UploadEvent::Completed(file) = event {
                self.finish_upload(file, today);
            }
        }

        let export_events = match self.export.as_mut() {
            Some(job) => job.poll(now),
            None => Vec::new(),
        };
        for event in export_events {
            if let ExportEvent::Completed { record_id, .. } = event {
                if !self.library.mark_completed(&record_id) {
                    tracing::warn!(record_id = %record_id, "Exported record no longer listed");
                }
                self.export_notice = Some("Export completed".to_string());
            }
        }

        if let Some(session) = self.session.as_mut() {
            let had_duration = session.playback.duration;
            self.preview.sync(&mut session.playback, &self.settings);
            if let Some(duration) = session.playback.duration {
                if had_duration != Some(duration) {
                    self.library
                        .set_duration_label(&session.record_id, format_time(duration));
                }
            }
        }

        self.poll_refresh();
    }

    /// How long the UI may sleep before the next task tick is due.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        let upload = self.upload.as_ref().and_then(|job| job.until_next_tick(now));
        let export = self.export.as_ref().and_then(|job| job.until_next_tick(now));
        match (upload, export) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::export::{EXPORT_PERIOD, EXPORT_STEP};
    use crate::ops::upload::{UPLOAD_PERIOD, UPLOAD_STEP};
    use crate::renderer::media_element::MediaEvent;
    use crate::renderer::preview_sync::PreviewState;
    use crate::renderer::preview_sync::tests::{Call, FakeElement};
    use crate::types::settings::SettingValue;
    use crate::types::video_library::VideoStatus;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Registrations(Rc<RefCell<Vec<String>>>);

    impl UploadRegistrar for Registrations {
        fn register_upload(&self, file: &FileDescriptor) {
            self.0.borrow_mut().push(file.file_name.clone());
        }
    }

    fn fake_opener() -> MediaOpener<FakeElement> {
        Box::new(|_: &FileDescriptor| {
            Ok(FakeElement {
                queued: vec![MediaEvent::MetadataLoaded { duration: 125.0 }],
                ..FakeElement::default()
            })
        })
    }

    fn shell() -> (ShellState<FakeElement>, Registrations) {
        let registrations = Registrations::default();
        let state = ShellState::new(fake_opener(), Box::new(registrations.clone()), None);
        (state, registrations)
    }

    fn clip(name: &str, size: u64) -> FileDescriptor {
        FileDescriptor::new(name.to_string(), format!("/videos/{name}"), size, "video/mp4".to_string())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn uploaded(state: &mut ShellState<FakeElement>, name: &str, t0: Instant) -> Instant {
        state.start_upload(clip(name, 1024), t0);
        let ticks = u32::from(100 / UPLOAD_STEP);
        let done = t0 + UPLOAD_PERIOD * ticks;
        state.tick(done, today());
        done
    }

    #[test]
    fn test_upload_creates_session_and_processing_record() {
        let (mut state, registrations) = shell();
        let t0 = Instant::now();
        uploaded(&mut state, "cats.mp4", t0);

        assert_eq!(*registrations.0.borrow(), vec!["cats.mp4".to_string()]);
        assert_eq!(state.route(), Route::Editor);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.source.file_name, "cats.mp4");

        let record = state.library.find(&session.record_id).unwrap();
        assert_eq!(record.status, VideoStatus::Processing);
        assert_eq!(record.duration_label, "2:05");
        assert_eq!(*state.preview.state(), PreviewState::Ready);
        assert!(state.upload_job().is_none());
    }

    #[test]
    fn test_rejected_upload_reports_and_skips_registration() {
        let (mut state, registrations) = shell();
        state.start_upload(clip("huge.mp4", 600 * 1024 * 1024), Instant::now());
        assert_eq!(state.upload_error(), Some("File size must be less than 500MB"));
        assert!(state.upload_job().is_none());
        assert!(registrations.0.borrow().is_empty());
    }

    #[test]
    fn test_editor_pages_need_a_session() {
        let (mut state, _) = shell();
        state.navigate(Route::Editor);
        assert_eq!(state.route(), Route::Upload);
        state.navigate(Route::Dashboard);
        assert_eq!(state.route(), Route::Dashboard);
    }

    #[test]
    fn test_navigation_cancels_upload() {
        let (mut state, _) = shell();
        let t0 = Instant::now();
        state.start_upload(clip("a.mp4", 10), t0);
        state.navigate(Route::Dashboard);
        state.tick(t0 + Duration::from_secs(10), today());
        assert!(state.session.is_none());
        assert!(state.library.is_empty());
    }

    #[test]
    fn test_export_completion_marks_its_own_record() {
        let (mut state, _) = shell();
        let t0 = Instant::now();
        let t1 = uploaded(&mut state, "first.mp4", t0);
        let first_id = state.session.as_ref().unwrap().record_id.clone();
        let t2 = uploaded(&mut state, "second.mp4", t1);
        let second_id = state.session.as_ref().unwrap().record_id.clone();

        state.navigate(Route::Preview);
        state.start_export(t2);
        let ticks = u32::from(100 / EXPORT_STEP);
        state.tick(t2 + EXPORT_PERIOD * ticks, today());

        assert_eq!(state.library.find(&second_id).unwrap().status, VideoStatus::Completed);
        assert_eq!(state.library.find(&first_id).unwrap().status, VideoStatus::Processing);
        assert_eq!(state.export_notice(), Some("Export completed"));
    }

    #[test]
    fn test_leaving_preview_cancels_export() {
        let (mut state, _) = shell();
        let t1 = uploaded(&mut state, "clip.mp4", Instant::now());
        let record_id = state.session.as_ref().unwrap().record_id.clone();
        state.navigate(Route::Preview);
        state.start_export(t1);
        state.tick(t1 + EXPORT_PERIOD * 3, today());
        assert_eq!(state.export_job().unwrap().progress(), 15);

        state.navigate(Route::Editor);
        state.tick(t1 + Duration::from_secs(60), today());
        assert!(state.export_job().is_none());
        assert_eq!(state.library.find(&record_id).unwrap().status, VideoStatus::Processing);
    }

    #[test]
    fn test_edited_settings_reach_preview() {
        let (mut state, _) = shell();
        let t1 = uploaded(&mut state, "clip.mp4", Instant::now());
        let edited = state.settings.with_field(SettingValue::Speed(2.0));
        state.handle_editor_event(EditorEvent::Edited(edited));
        state.tick(t1, today());
        assert!(state.preview.element().unwrap().calls.contains(&Call::Rate(2.0)));
    }

    #[test]
    fn test_leaving_editor_pauses_playback() {
        let (mut state, _) = shell();
        uploaded(&mut state, "clip.mp4", Instant::now());
        state.toggle_play();
        assert!(state.session.as_ref().unwrap().playback.is_playing);
        state.navigate(Route::Resources);
        assert!(!state.session.as_ref().unwrap().playback.is_playing);
    }

    #[test]
    fn test_opener_failure_latches_preview_error() {
        let registrations = Registrations::default();
        let mut state: ShellState<FakeElement> = ShellState::new(
            Box::new(|_: &FileDescriptor| Err(MediaError::Load("no decoder".to_string()))),
            Box::new(registrations),
            None,
        );
        uploaded(&mut state, "clip.mkv", Instant::now());
        assert!(state.preview.is_failed());
        assert!(state.session.is_some());
    }

    #[test]
    fn test_refresh_merges_remote_videos() {
        let (mut state, _) = shell();
        let tx = state.begin_refresh();
        let video: ApiVideo = serde_json::from_str(
            r#"{"id":"r1","title":"Remote","status":"completed","createdAt":"2026-01-02T10:00:00Z"}"#,
        )
        .unwrap();
        tx.send(Ok(vec![video])).unwrap();
        state.tick(Instant::now(), today());
        assert!(!state.is_refreshing());
        assert_eq!(state.library.find("r1").unwrap().name, "Remote");
    }

    #[test]
    fn test_state_persists_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let open = || Some(JsonStore::open(dir.path()).unwrap());
        let mut state: ShellState<FakeElement> =
            ShellState::new(fake_opener(), Box::new(Registrations::default()), open());
        state.set_theme(ThemeChoice::Dark);
        state.add_workflow("Recap: Heat", WorkflowKind::MovieRecap, Utc::now());
        let edited = state.settings.with_field(SettingValue::TextOverlay("Wait for it".to_string()));
        state.handle_editor_event(EditorEvent::Edited(edited.clone()));
        state.handle_editor_event(EditorEvent::Save);

        let restored: ShellState<FakeElement> =
            ShellState::new(fake_opener(), Box::new(Registrations::default()), open());
        assert_eq!(restored.theme(), ThemeChoice::Dark);
        assert_eq!(restored.workflows().items().len(), 1);
        assert_eq!(restored.settings, edited);
    }

    #[test]
    fn test_until_next_tick_only_while_tasks_run() {
        let (mut state, _) = shell();
        let t0 = Instant::now();
        assert_eq!(state.until_next_tick(t0), None);
        state.start_upload(clip("a.mp4", 10), t0);
        assert_eq!(state.until_next_tick(t0), Some(UPLOAD_PERIOD));
    }
}
