//! Client for the editor backend.
//!
//! The backend owns three endpoints: a health probe, the video list and a
//! metadata-only upload registration. Registration is best effort: it runs
//! off the UI thread and its outcome is only logged.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::media::FileDescriptor;
use crate::types::video_library::VideoStatus;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A video as listed by `GET /api/videos`. The backend names videos
/// inconsistently, so all three naming fields are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVideo {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub status: VideoStatus,
    pub created_at: String,
}

impl ApiVideo {
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.filename.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("Untitled video")
    }
}

#[derive(Debug, Serialize)]
struct UploadMetadata<'a> {
    filename: &'a str,
    size: u64,
}

/// Sink for upload registrations. The upload flow only needs to announce
/// a file; how (and whether) that reaches a server is up to the sink.
pub trait UploadRegistrar {
    fn register_upload(&self, file: &FileDescriptor);
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    pub fn health(&self) -> Result<serde_json::Value, ApiError> {
        let response = self.http.get(self.url("/api/health")).send()?;
        Ok(Self::check(response)?.json()?)
    }

    pub fn list_videos(&self) -> Result<Vec<ApiVideo>, ApiError> {
        let response = self.http.get(self.url("/api/videos")).send()?;
        Ok(Self::check(response)?.json()?)
    }

    /// Registers upload metadata (name and size only; no media bytes).
    pub fn upload_metadata(&self, filename: &str, size: u64) -> Result<serde_json::Value, ApiError> {
        let response = self
            .http
            .post(self.url("/api/videos/upload"))
            .json(&UploadMetadata { filename, size })
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    /// Fetches the video list on a background thread and sends the outcome
    /// on `tx`. A dropped receiver is ignored.
    pub fn spawn_list_videos(&self, tx: crossbeam_channel::Sender<Result<Vec<ApiVideo>, ApiError>>) {
        let client = self.clone();
        std::thread::spawn(move || {
            let result = client.list_videos();
            if let Err(e) = &result {
                tracing::warn!(error = %e, "Failed to fetch videos");
            }
            let _ = tx.send(result);
        });
    }
}

impl UploadRegistrar for BackendClient {
    fn register_upload(&self, file: &FileDescriptor) {
        let client = self.clone();
        let filename = file.file_name.clone();
        let size = file.size;
        std::thread::spawn(move || match client.upload_metadata(&filename, size) {
            Ok(body) => tracing::info!(filename = %filename, size, response = %body, "Upload metadata registered"),
            Err(e) => tracing::error!(filename = %filename, error = %e, "Upload metadata failed"),
        });
    }
}
