/// Rejections raised before an upload starts. The `Display` text is shown
/// to the user verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("Please select a video file")]
    NotVideo { mime_type: String },

    #[error("File size must be less than 500MB")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported file format")]
    UnsupportedFormat { extension: String },
}

/// Media load and playback failures. Once raised, the preview stays in its
/// failed state until a new source is supplied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to load video: {0}")]
    Load(String),

    #[error("Failed to play video: {0}")]
    Playback(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed stored value: {0}")]
    Json(#[from] serde_json::Error),
}
