//! symkit Settings Crate
//!
//! Handles editor configuration: grid and selection tolerances, the paste
//! collision policy, undo depth and the default properties new elements are
//! created with. Settings are persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, EditorSettings, ToolSettings, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
