use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Small key-value store: one pretty-printed JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)?;
        let mut file = File::create(self.path_for(key))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// `Ok(None)` when nothing was ever saved under `key`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut file = match File::open(self.path_for(key)) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Like [`load`](Self::load), but logs failures and falls back to the default.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to load stored value");
                T::default()
            }
        }
    }

    pub fn save_logged<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.save(key, value) {
            tracing::error!(key, error = %e, "Failed to save value");
        }
    }
}
