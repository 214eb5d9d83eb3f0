//! Configuration loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine:
//!
//! ```toml
//! settings_path = "/home/me/.config/hudkit/settings.toml"
//!
//! [overlay]
//! fade_time = 10.0
//! hold_time = 1.0
//! initial_objective = "Find the documentary crew"
//!
//! [rebind]
//! frame_limit = 600
//! frame_rate = 60
//!
//! [viewer]
//! close_prompt = "Press [INTERACT] to close"
//! ```

use crate::error::{HudkitError, Result};
use crate::settings::file;
use crate::ui::{OverlayTiming, DEFAULT_CLOSE_PROMPT, DEFAULT_OBJECTIVE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HudConfig {
    /// Where bindings are stored; defaults to the platform config directory.
    pub settings_path: Option<PathBuf>,
    pub overlay: OverlayConfig,
    pub rebind: RebindConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    pub fade_time: f32,
    pub hold_time: f32,
    pub initial_objective: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let timing = OverlayTiming::default();
        Self {
            fade_time: timing.fade_time,
            hold_time: timing.hold_time,
            initial_objective: DEFAULT_OBJECTIVE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RebindConfig {
    /// Frames to wait for a key before giving up; `None` waits forever.
    pub frame_limit: Option<u32>,
    /// Frame rate of the CLI capture loop.
    pub frame_rate: u32,
}

impl Default for RebindConfig {
    fn default() -> Self {
        Self {
            frame_limit: Some(600),
            frame_rate: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub close_prompt: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            close_prompt: DEFAULT_CLOSE_PROMPT.to_string(),
        }
    }
}

impl HudConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(HudkitError::file_error(
                    format!("reading config {}", path.display()),
                    err,
                ))
            }
        };

        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|err| HudkitError::config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let overlay = &self.overlay;
        if !overlay.fade_time.is_finite() || overlay.fade_time < 0.0 {
            return Err(HudkitError::config("overlay.fade_time must be a non-negative number"));
        }
        if !overlay.hold_time.is_finite() || overlay.hold_time < 0.0 {
            return Err(HudkitError::config("overlay.hold_time must be a non-negative number"));
        }
        if self.rebind.frame_rate == 0 {
            return Err(HudkitError::config("rebind.frame_rate must be at least 1"));
        }
        Ok(())
    }

    pub fn overlay_timing(&self) -> OverlayTiming {
        OverlayTiming {
            fade_time: self.overlay.fade_time,
            hold_time: self.overlay.hold_time,
        }
    }

    /// Configured settings path, falling back to the platform default.
    pub fn resolved_settings_path(&self) -> Option<PathBuf> {
        self.settings_path.clone().or_else(file::default_path)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.rebind.frame_rate.max(1)))
    }
}

/// `<config dir>/hudkit/config.toml`, when the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hudkit").join("config.toml"))
}
