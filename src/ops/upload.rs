use std::time::{Duration, Instant};

use crate::api::UploadRegistrar;
use crate::error::UploadError;
use crate::ops::progress::{ProgressTask, TaskEvent};
use crate::types::media::{ALLOWED_EXTENSIONS, FileDescriptor, MAX_UPLOAD_BYTES};

pub const UPLOAD_STEP: u8 = 10;
pub const UPLOAD_PERIOD: Duration = Duration::from_millis(200);

/// Checks type, then size, then container extension.
pub fn validate_upload(file: &FileDescriptor) -> Result<(), UploadError> {
    if !file.is_video() {
        return Err(UploadError::NotVideo {
            mime_type: file.mime_type.clone(),
        });
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size: file.size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    let extension = file.extension();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedFormat { extension });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    Progress(u8),
    Completed(FileDescriptor),
}

/// Local upload progress shown while the backend registration runs in the
/// background. Completion hands the file back to the shell.
#[derive(Debug, Clone)]
pub struct UploadJob {
    file: FileDescriptor,
    task: ProgressTask,
}

impl UploadJob {
    /// Validates `file` and, only if it is acceptable, announces it to
    /// `registrar` and starts the progress task.
    pub fn begin(file: FileDescriptor, registrar: &dyn UploadRegistrar, now: Instant) -> Result<Self, UploadError> {
        if let Err(e) = validate_upload(&file) {
            tracing::warn!(file = %file.file_name, error = ?e, "Upload rejected");
            return Err(e);
        }
        tracing::info!(file = %file.file_name, size = file.size, "Upload started");
        registrar.register_upload(&file);
        Ok(Self {
            file,
            task: ProgressTask::start(UPLOAD_STEP, UPLOAD_PERIOD, now),
        })
    }

    pub fn poll(&mut self, now: Instant) -> Vec<UploadEvent> {
        self.task
            .poll(now)
            .into_iter()
            .map(|event| match event {
                TaskEvent::Progress(p) => UploadEvent::Progress(p),
                TaskEvent::Finished => UploadEvent::Completed(self.file.clone()),
            })
            .collect()
    }

    pub fn cancel(&mut self) {
        self.task.cancel();
        tracing::debug!(file = %self.file.file_name, state = ?self.task.state(), "Upload cancelled");
    }

    pub fn file(&self) -> &FileDescriptor {
        &self.file
    }

    pub fn progress(&self) -> u8 {
        self.task.progress()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.task.until_next_tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingRegistrar {
        calls: RefCell<Vec<String>>,
    }

    impl UploadRegistrar for RecordingRegistrar {
        fn register_upload(&self, file: &FileDescriptor) {
            self.calls.borrow_mut().push(file.file_name.clone());
        }
    }

    fn file(name: &str, size: u64, mime: &str) -> FileDescriptor {
        FileDescriptor::new(name.to_string(), format!("/videos/{name}"), size, mime.to_string())
    }

    #[test]
    fn test_oversized_file_rejected_before_network() {
        let registrar = RecordingRegistrar::default();
        let big = file("long.mp4", 600 * 1024 * 1024, "video/mp4");
        let result = UploadJob::begin(big, &registrar, Instant::now());
        let err = result.err().unwrap();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert_eq!(err.to_string(), "File size must be less than 500MB");
        assert!(registrar.calls.borrow().is_empty());
    }

    #[test]
    fn test_non_video_rejected_without_progress() {
        let registrar = RecordingRegistrar::default();
        let song = file("song.mp3", 1024, "audio/mpeg");
        let err = UploadJob::begin(song, &registrar, Instant::now()).err().unwrap();
        assert_eq!(err.to_string(), "Please select a video file");
        assert!(registrar.calls.borrow().is_empty());
    }

    #[test]
    fn test_unsupported_container() {
        let odd = file("clip.flv", 1024, "video/x-flv");
        assert_eq!(
            validate_upload(&odd),
            Err(UploadError::UnsupportedFormat {
                extension: "flv".to_string()
            })
        );
    }

    #[test]
    fn test_exact_limit_is_accepted() {
        let edge = file("edge.mov", MAX_UPLOAD_BYTES, "video/quicktime");
        assert_eq!(validate_upload(&edge), Ok(()));
    }

    #[test]
    fn test_accepted_upload_registers_and_completes() {
        let registrar = RecordingRegistrar::default();
        let t0 = Instant::now();
        let clip = file("clip.mp4", 10 * 1024 * 1024, "video/mp4");
        let mut job = UploadJob::begin(clip.clone(), &registrar, t0).unwrap();
        assert_eq!(*registrar.calls.borrow(), vec!["clip.mp4".to_string()]);

        let events = job.poll(t0 + Duration::from_secs(2));
        assert_eq!(events.len(), 11);
        assert_eq!(events[0], UploadEvent::Progress(10));
        assert_eq!(events[9], UploadEvent::Progress(100));
        assert_eq!(events[10], UploadEvent::Completed(clip));
        assert!(!job.is_running());
    }
}
