use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::ApiVideo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Completed,
    Processing,
    Failed,
}

impl VideoStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VideoStatus::Completed => "Completed",
            VideoStatus::Processing => "Processing",
            VideoStatus::Failed => "Failed",
        }
    }
}

/// One row of the dashboard list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub name: String,
    pub duration_label: String,
    pub status: VideoStatus,
    pub created_at: NaiveDate,
}

impl VideoRecord {
    /// A freshly uploaded file: processing until its export completes.
    pub fn processing(name: String, created_at: NaiveDate) -> Self {
        VideoRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            duration_label: "0:00".to_string(),
            status: VideoStatus::Processing,
            created_at,
        }
    }

    pub fn from_api(video: &ApiVideo) -> Self {
        let created_at = video
            .created_at
            .get(..10)
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        VideoRecord {
            id: video.id.clone(),
            name: video.display_name().to_string(),
            duration_label: "0:00".to_string(),
            status: video.status,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub completed: usize,
    pub processing: usize,
    pub failed: usize,
}

/// Records shown on the dashboard, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoLibrary {
    items: Vec<VideoRecord>,
}

impl VideoLibrary {
    pub fn new() -> Self {
        VideoLibrary { items: Vec::new() }
    }

    pub fn add(&mut self, record: VideoRecord) {
        self.items.insert(0, record);
    }

    pub fn all_items(&self) -> &[VideoRecord] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&VideoRecord> {
        self.items.iter().find(|record| record.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut VideoRecord> {
        self.items.iter_mut().find(|record| record.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<VideoRecord> {
        let idx = self.items.iter().position(|record| record.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Returns false when no record carries `id`.
    pub fn set_status(&mut self, id: &str, status: VideoStatus) -> bool {
        match self.find_mut(id) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    pub fn mark_completed(&mut self, id: &str) -> bool {
        self.set_status(id, VideoStatus::Completed)
    }

    pub fn set_duration_label(&mut self, id: &str, label: String) -> bool {
        match self.find_mut(id) {
            Some(record) => {
                record.duration_label = label;
                true
            }
            None => false,
        }
    }

    /// Adds backend records not already listed, keeping local ones in front.
    pub fn merge_remote(&mut self, videos: &[ApiVideo]) -> usize {
        let mut added = 0;
        for video in videos {
            if self.find(&video.id).is_none() {
                self.items.push(VideoRecord::from_api(video));
                added += 1;
            }
        }
        added
    }

    pub fn counts(&self) -> StatusCounts {
        status_counts(&self.items)
    }
}

pub fn status_counts(records: &[VideoRecord]) -> StatusCounts {
    records.iter().fold(
        StatusCounts {
            total: records.len(),
            ..StatusCounts::default()
        },
        |mut counts, record| {
            match record.status {
                VideoStatus::Completed => counts.completed += 1,
                VideoStatus::Processing => counts.processing += 1,
                VideoStatus::Failed => counts.failed += 1,
            }
            counts
        },
    )
}

/// Placeholder rows the dashboard shows before anything is uploaded.
pub fn sample_records() -> Vec<VideoRecord> {
    let row = |id: &str, name: &str, duration: &str, status, date: (i32, u32, u32)| VideoRecord {
        id: id.to_string(),
        name: name.to_string(),
        duration_label: duration.to_string(),
        status,
        created_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or(NaiveDate::MIN),
    };
    vec![
        row("1", "My TikTok Video", "0:30", VideoStatus::Completed, (2026, 2, 7)),
        row("2", "Product Demo", "1:15", VideoStatus::Processing, (2026, 2, 6)),
        row("3", "Tutorial Video", "2:45", VideoStatus::Failed, (2026, 2, 5)),
    ]
}
