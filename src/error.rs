//! Error types and handling infrastructure for hudkit.
//!
//! The binding core itself never fails: missing settings fall back to defaults and a
//! rebind poll that sees no key is a normal outcome. Errors only come from the layers
//! around it (settings files, configuration, parsing names typed by a user, documents).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hudkit operations.
#[derive(Error, Debug)]
pub enum HudkitError {
    /// File system related errors while reading or writing settings and config files
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A settings file exists but could not be parsed
    #[error("Settings file {path} is malformed: {message}")]
    SettingsFormat { path: PathBuf, message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// An action name that does not match any `InputAction`
    #[error("Unknown action: {name}")]
    UnknownAction { name: String },

    /// A key name or code that does not match any `KeyCode`
    #[error("Unknown key: {name}")]
    UnknownKey { name: String },

    /// A rebind was requested for an action whose binding is fixed
    #[error("Action {action} cannot be remapped")]
    NotRemappable { action: String },

    /// A document viewer was built without any pages
    #[error("Document {name} has no pages")]
    EmptyDocument { name: String },
}

/// Standard Result type for hudkit operations.
pub type Result<T> = std::result::Result<T, HudkitError>;

impl HudkitError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn unknown_action(name: impl Into<String>) -> Self {
        Self::UnknownAction { name: name.into() }
    }

    pub fn unknown_key(name: impl Into<String>) -> Self {
        Self::UnknownKey { name: name.into() }
    }
}

impl From<std::io::Error> for HudkitError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let settings = HudkitError::SettingsFormat {
            path: PathBuf::from("/tmp/settings.toml"),
            message: "expected integer".to_string(),
        };
        assert_eq!(
            settings.to_string(),
            "Settings file /tmp/settings.toml is malformed: expected integer"
        );

        let remap = HudkitError::NotRemappable {
            action: "ESCAPE_MENU".to_string(),
        };
        assert_eq!(remap.to_string(), "Action ESCAPE_MENU cannot be remapped");

        let config = HudkitError::config("fade_time must be positive");
        assert_eq!(
            config.to_string(),
            "Configuration error: fade_time must be positive"
        );
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            HudkitError::unknown_action("JUMP"),
            HudkitError::UnknownAction { .. }
        ));
        assert!(matches!(
            HudkitError::unknown_key("Hyper"),
            HudkitError::UnknownKey { .. }
        ));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: HudkitError = io_err.into();

        match err {
            HudkitError::FileError { message, .. } => {
                assert_eq!(message, "Permission denied");
            }
            _ => panic!("Expected FileError variant"),
        }
    }
}
