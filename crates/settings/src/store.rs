use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings file {path} does not contain a JSON object")]
    NotAnObject { path: PathBuf },
    #[error("failed to serialize settings {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to prepare directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 應用程式共用的鍵值設定服務。 / Key-value settings service shared by application panels.
///
/// Panels receive an implementation through their constructors instead of reaching for a
/// process-wide singleton, so tests can hand in [`MemorySettings`].
pub trait SettingsStore {
    /// 讀取整數設定；不存在或型別不符時回傳 `None`。 / Reads an integer, `None` when missing or not an integer.
    fn get_int(&self, key: &str) -> Option<i64>;

    /// 寫入整數設定。 / Stores an integer under `key`.
    fn set_int(&mut self, key: &str, value: i64) -> Result<(), SettingsError>;

    /// 移除設定，回傳是否曾存在。 / Removes `key`, reporting whether it was present.
    fn remove(&mut self, key: &str) -> Result<bool, SettingsError>;
}

/// 僅存在記憶體中的設定。 / Settings held in memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    values: BTreeMap<String, i64>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, SettingsError> {
        Ok(self.values.remove(key).is_some())
    }
}

/// 以 JSON 檔案保存的設定，每次變更後立即寫回。 / JSON-file settings, persisted after every change.
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonSettingsStore {
    /// 從指定路徑載入設定；若檔案不存在則回傳空集合。 / Loads settings from disk, empty when the file is missing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                values: Map::new(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self {
                path,
                values: Map::new(),
            });
        }
        let parsed: Value =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.clone(),
                source,
            })?;
        match parsed {
            Value::Object(values) => Ok(Self { path, values }),
            _ => Err(SettingsError::NotAnObject { path }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = serde_json::to_string_pretty(&self.values).map_err(|source| {
            SettingsError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, payload.as_bytes()).map_err(|source| SettingsError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), SettingsError> {
        if self.get_int(key) == Some(value) {
            return Ok(());
        }
        log::debug!("settings: {key} = {value}");
        let previous = self.values.insert(key.to_string(), Value::from(value));
        if let Err(err) = self.save() {
            // memory must match the file after a failed write
            match previous {
                Some(previous) => self.values.insert(key.to_string(), previous),
                None => self.values.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, SettingsError> {
        let Some(previous) = self.values.remove(key) else {
            return Ok(false);
        };
        if let Err(err) = self.save() {
            self.values.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_settings_round_trip() {
        let mut settings = MemorySettings::new();
        assert_eq!(settings.get_int("catalog_page_size"), None);
        settings.set_int("catalog_page_size", 100).unwrap();
        assert_eq!(settings.get_int("catalog_page_size"), Some(100));
        assert!(settings.remove("catalog_page_size").unwrap());
        assert!(!settings.remove("catalog_page_size").unwrap());
        assert!(settings.is_empty());
    }

    #[test]
    fn json_store_persists_on_every_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        {
            let mut store = JsonSettingsStore::load(&path).unwrap();
            store.set_int("search_page_size", 20).unwrap();
            store.set_int("catalog_page_size", 200).unwrap();
        }

        let mut store = JsonSettingsStore::load(&path).unwrap();
        assert_eq!(store.get_int("search_page_size"), Some(20));
        assert_eq!(store.get_int("catalog_page_size"), Some(200));
        assert!(store.remove("search_page_size").unwrap());

        let store = JsonSettingsStore::load(&path).unwrap();
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["catalog_page_size"]);
        assert!(!path.with_extension("tmp").exists());
    }
}
