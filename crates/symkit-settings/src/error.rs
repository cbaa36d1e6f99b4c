//! Errors of the settings crate.
//!
//! [`SettingsError`] covers reading and writing configuration files,
//! [`ConfigError`] rejects values that parse but make no sense to the editor.

use std::io;
use thiserror::Error;

/// Failure while loading or saving the configuration
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read configuration: {0}")]
    LoadError(String),

    #[error("Cannot write configuration: {0}")]
    SaveError(String),

    /// A single value failed a range or consistency check
    #[error("Setting '{key}' rejected: {reason}")]
    InvalidSetting { key: String, reason: String },

    /// No platform configuration directory
    #[error("No configuration directory: {0}")]
    ConfigDirectory(String),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error("Malformed JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Malformed TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Cannot encode configuration as TOML: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Semantically invalid configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File extension other than `.json` or `.toml`
    #[error("Unsupported configuration format '{0}'")]
    UnsupportedFormat(String),

    #[error("'{key}' out of range: {value}")]
    ValueOutOfRange { key: String, value: String },

    /// Default layer not usable for the element kind
    #[error("Layer '{layer}' cannot be used for {usage}")]
    LayerNotAllowed { layer: String, usage: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
