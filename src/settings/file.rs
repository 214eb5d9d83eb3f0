//! TOML-backed settings store.
//!
//! Values live in a `[bindings]` table:
//!
//! ```toml
//! [bindings]
//! SPRINT = 32
//! UP = 273
//! ```
//!
//! Writes stay in memory until [`SettingsStore::flush`]; a dirty store flushes once more
//! when dropped.

use crate::error::{HudkitError, Result};
use crate::settings::SettingsStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    bindings: BTreeMap<String, i32>,
}

#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, i32>,
    dirty: bool,
}

impl FileSettings {
    /// Open the store at `path`. A missing file is an empty store, not an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => parse_document(&path, &contents)?.bindings,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(err) => {
                return Err(HudkitError::file_error(
                    format!("reading {}", path.display()),
                    err,
                ))
            }
        };

        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    /// Open the store at the platform default location.
    pub fn open_default() -> Result<Self> {
        let path = default_path()
            .ok_or_else(|| HudkitError::config("no configuration directory on this platform"))?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn write_out(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    HudkitError::file_error(format!("creating {}", parent.display()), err)
                })?;
            }
        }

        let document = SettingsDocument {
            bindings: self.values.clone(),
        };
        let contents = toml::to_string_pretty(&document).map_err(|err| {
            HudkitError::SettingsFormat {
                path: self.path.clone(),
                message: err.to_string(),
            }
        })?;

        // Write beside the target and rename so a crash never leaves a truncated file.
        let staging = self.path.with_extension("toml.tmp");
        fs::write(&staging, contents)
            .map_err(|err| HudkitError::file_error(format!("writing {}", staging.display()), err))?;
        fs::rename(&staging, &self.path).map_err(|err| {
            HudkitError::file_error(format!("replacing {}", self.path.display()), err)
        })?;
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get_int(&self, key: &str, fallback: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(fallback)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        if self.values.insert(key.to_string(), value) != Some(value) {
            self.dirty = true;
        }
    }

    fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.write_out()?;
        self.dirty = false;
        log::debug!("flushed {} settings to {}", self.values.len(), self.path.display());
        Ok(())
    }
}

impl Drop for FileSettings {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            log::warn!("failed to save settings on drop: {}", err);
        }
    }
}

/// `<config dir>/hudkit/settings.toml`, when the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hudkit").join(SETTINGS_FILE_NAME))
}

fn parse_document(path: &Path, contents: &str) -> Result<SettingsDocument> {
    toml::from_str(contents).map_err(|err| HudkitError::SettingsFormat {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileSettings::open(dir.path().join("settings.toml")).unwrap();
        assert_eq!(store.get_int("SPRINT", 304), 304);
        assert!(!store.is_dirty());
    }

    #[test]
    fn flush_then_reopen_preserves_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let mut store = FileSettings::open(&path).unwrap();
        store.set_int("SPRINT", 32);
        store.set_int("UP", 273);
        assert!(store.is_dirty());
        store.flush().unwrap();
        assert!(!store.is_dirty());
        drop(store);

        let reopened = FileSettings::open(&path).unwrap();
        assert_eq!(reopened.get_int("SPRINT", 304), 32);
        assert_eq!(reopened.get_int("UP", 119), 273);
        assert!(!reopened.has_key("DOWN"));
    }

    #[test]
    fn drop_flushes_pending_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        {
            let mut store = FileSettings::open(&path).unwrap();
            store.set_int("INTERACT", 102);
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[bindings]"));
        assert!(contents.contains("INTERACT = 102"));
    }

    #[test]
    fn rewriting_same_value_is_not_dirty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[bindings]\nSNEAK = 306\n").unwrap();

        let mut store = FileSettings::open(&path).unwrap();
        store.set_int("SNEAK", 306);
        assert!(!store.is_dirty());
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[bindings]\nSPRINT = \"fast\"\n").unwrap();

        let err = FileSettings::open(&path).unwrap_err();
        assert!(matches!(err, HudkitError::SettingsFormat { .. }));
    }
}
