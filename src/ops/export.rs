use std::time::{Duration, Instant};

use crate::ops::progress::{ProgressTask, TaskEvent};
use crate::types::settings::EditSettings;

pub const EXPORT_STEP: u8 = 5;
pub const EXPORT_PERIOD: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportQuality {
    Sd480,
    Hd720,
    FullHd1080,
}

impl ExportQuality {
    pub const ALL: [ExportQuality; 3] = [ExportQuality::Sd480, ExportQuality::Hd720, ExportQuality::FullHd1080];

    pub fn label(&self) -> &'static str {
        match self {
            ExportQuality::Sd480 => "480p (SD)",
            ExportQuality::Hd720 => "720p (HD)",
            ExportQuality::FullHd1080 => "1080p (Full HD)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Mp4,
    WebM,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Mp4, ExportFormat::WebM];

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Mp4 => "MP4",
            ExportFormat::WebM => "WebM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Portrait9x16,
    Square,
    Landscape16x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [AspectRatio::Portrait9x16, AspectRatio::Square, AspectRatio::Landscape16x9];

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Portrait9x16 => "9:16 (TikTok)",
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape16x9 => "16:9",
        }
    }
}

/// Output parameters picked on the preview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub quality: ExportQuality,
    pub format: ExportFormat,
    pub frame_rate: u32,
    pub aspect: AspectRatio,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            quality: ExportQuality::FullHd1080,
            format: ExportFormat::Mp4,
            frame_rate: 30,
            aspect: AspectRatio::Portrait9x16,
        }
    }
}

pub const FRAME_RATES: [u32; 2] = [30, 60];

#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
    Progress(u8),
    Completed {
        record_id: String,
        settings: EditSettings,
        options: ExportOptions,
    },
}

/// A simulated export. No media is encoded and no file is written; the job
/// only reports progress and, once, completion for the record it was
/// started for.
#[derive(Debug, Clone)]
pub struct ExportJob {
    record_id: String,
    settings: EditSettings,
    options: ExportOptions,
    task: ProgressTask,
}

impl ExportJob {
    /// Snapshots `settings`; later edits do not affect a running job.
    pub fn start(record_id: String, settings: &EditSettings, options: ExportOptions, now: Instant) -> Self {
        tracing::info!(record_id = %record_id, ?options, "Starting export");
        Self {
            record_id,
            settings: settings.clone(),
            options,
            task: ProgressTask::start(EXPORT_STEP, EXPORT_PERIOD, now),
        }
    }

    pub fn poll(&mut self, now: Instant) -> Vec<ExportEvent> {
        self.task
            .poll(now)
            .into_iter()
            .map(|event| match event {
                TaskEvent::Progress(p) => ExportEvent::Progress(p),
                TaskEvent::Finished => {
                    tracing::info!(record_id = %self.record_id, "Export complete");
                    ExportEvent::Completed {
                        record_id: self.record_id.clone(),
                        settings: self.settings.clone(),
                        options: self.options,
                    }
                }
            })
            .collect()
    }

    pub fn cancel(&mut self) {
        if self.task.is_running() {
            tracing::info!(record_id = %self.record_id, progress = self.task.progress(), "Export cancelled");
        }
        self.task.cancel();
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
    use crate::types::settings::SettingValue;

    fn run_to_end(job: &mut ExportJob, t0: Instant) -> Vec<ExportEvent> {
        let mut events = Vec::new();
        // Poll at an uneven cadence, as a UI frame loop would.
        for ms in (0..=10_000).step_by(170) {
            events.extend(job.poll(t0 + Duration::from_millis(ms)));
        }
        events
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let t0 = Instant::now();
        let mut job = ExportJob::start("rec-1".to_string(), &EditSettings::default(), ExportOptions::default(), t0);
        let events = run_to_end(&mut job, t0);

        let progress: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                ExportEvent::Progress(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(progress.len(), 20);
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(progress.first(), Some(&5));
        assert_eq!(progress.last(), Some(&100));
        assert!(matches!(events.last(), Some(ExportEvent::Completed { .. })));
    }

    #[test]
    fn test_completion_fires_once_with_snapshot() {
        let t0 = Instant::now();
        let settings = EditSettings::default().with_field(SettingValue::Speed(2.0));
        let mut job = ExportJob::start("rec-7".to_string(), &settings, ExportOptions::default(), t0);
        let mut events = run_to_end(&mut job, t0);
        events.extend(job.poll(t0 + Duration::from_secs(60)));

        let completions: Vec<&ExportEvent> = events
            .iter()
            .filter(|e| matches!(e, ExportEvent::Completed { .. }))
            .collect();
        assert_eq!(completions.len(), 1);
        match completions[0] {
            ExportEvent::Completed { record_id, settings: done, .. } => {
                assert_eq!(record_id, "rec-7");
                assert_eq!(done.speed, 2.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_cancelled_job_never_completes() {
        let t0 = Instant::now();
        let mut job = ExportJob::start("rec-2".to_string(), &EditSettings::default(), ExportOptions::default(), t0);
        job.poll(t0 + Duration::from_millis(900));
        assert_eq!(job.progress(), 15);
        job.cancel();
        assert!(!job.is_running());
        assert!(run_to_end(&mut job, t0).is_empty());
    }
}
