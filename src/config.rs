use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://ai-video-editor-backend-production.up.railway.app";

/// Runtime configuration, read once at startup.
///
/// | Variable               | Default                          |
/// |------------------------|----------------------------------|
/// | `REELCUT_API_BASE_URL` | production backend               |
/// | `REELCUT_DATA_DIR`     | `<platform data dir>/reelcut`    |
/// | `REELCUT_PREVIEW_SIZE` | `640x360`                        |
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub data_dir: PathBuf,
    pub preview_width: u32,
    pub preview_height: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("REELCUT_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let data_dir = lookup("REELCUT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let (preview_width, preview_height) = lookup("REELCUT_PREVIEW_SIZE")
            .and_then(|v| parse_size(&v))
            .unwrap_or((640, 360));

        Self {
            api_base_url,
            data_dir,
            preview_width,
            preview_height,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("reelcut")
}

fn parse_size(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once('x')?;
    let w = w.trim().parse().ok().filter(|w: &u32| *w > 0)?;
    let h = h.trim().parse().ok().filter(|h: &u32| *h > 0)?;
    Some((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!((config.preview_width, config.preview_height), (640, 360));
        assert!(config.data_dir.ends_with("reelcut"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("REELCUT_API_BASE_URL", "http://localhost:3000"),
            ("REELCUT_DATA_DIR", "/tmp/reelcut-test"),
            ("REELCUT_PREVIEW_SIZE", "1280x720"),
        ]);
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/reelcut-test"));
        assert_eq!((config.preview_width, config.preview_height), (1280, 720));
    }

    #[test]
    fn test_bad_preview_size_ignored() {
        let config = config_from(&[("REELCUT_PREVIEW_SIZE", "0x720")]);
        assert_eq!((config.preview_width, config.preview_height), (640, 360));
        assert_eq!(parse_size("wide"), None);
    }
}
