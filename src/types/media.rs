use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

/// Container extensions the editor accepts.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["mp4", "webm", "mov", "avi", "mkv"];

/// A local file picked for upload, with the attributes validation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub file_name: String,
    pub path: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileDescriptor {
    pub fn new(file_name: String, path: String, size: u64, mime_type: String) -> Self {
        FileDescriptor {
            file_name,
            path,
            size,
            mime_type,
        }
    }

    /// Describe a file on disk, inferring its MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let size = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let mime_type = mime_for_extension(&extension_of(&file_name)).to_string();
        Ok(FileDescriptor::new(
            file_name,
            path.to_string_lossy().to_string(),
            size,
            mime_type,
        ))
    }

    pub fn extension(&self) -> String {
        extension_of(&self.file_name)
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }
}

/// Lowercased text after the last dot, or empty when there is none.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("clip.MP4"), "mp4");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_mime_inference() {
        assert_eq!(mime_for_extension("mov"), "video/quicktime");
        assert_eq!(mime_for_extension("wav"), "audio/wav");
        assert_eq!(mime_for_extension("exe"), "application/octet-stream");
    }

    #[test]
    fn test_from_path_reads_size_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holiday.webm");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 2048]).unwrap();

        let fd = FileDescriptor::from_path(&path).unwrap();
        assert_eq!(fd.file_name, "holiday.webm");
        assert_eq!(fd.size, 2048);
        assert_eq!(fd.mime_type, "video/webm");
        assert!(fd.is_video());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileDescriptor::from_path(&dir.path().join("nope.mp4")).is_err());
    }
}
