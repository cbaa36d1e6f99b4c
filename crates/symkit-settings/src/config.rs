//! Configuration and settings management for symkit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Editor settings (grid, tolerances, undo depth, paste policy)
//! - Tool defaults (properties new polygons, circles, texts and pins get)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use symkit_core::{Layer, Length, LengthUnit, PositiveLength, UnsignedLength};

/// Name of the configuration directory below the platform config dir
pub const CONFIG_DIR_NAME: &str = "symkit";

/// Name of the default configuration file
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Grid interval new positions snap to
    pub grid_interval: PositiveLength,
    /// Unit used for overlay texts and measurements
    pub length_unit: LengthUnit,
    /// Hit-test tolerance for exact matches
    pub select_tolerance: UnsignedLength,
    /// Hit-test tolerance for near matches
    pub near_tolerance: UnsignedLength,
    /// Maximum number of name increments tried when a pasted pin name collides
    pub paste_name_retry_limit: u32,
    /// Maximum number of undo steps kept, unlimited if unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undo_limit: Option<usize>,
    /// Open symbols read-only
    pub read_only: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_interval: PositiveLength::saturating(2_540_000),
            length_unit: LengthUnit::Millimeters,
            select_tolerance: UnsignedLength::saturating(500_000),
            near_tolerance: UnsignedLength::saturating(1_500_000),
            paste_name_retry_limit: 1000,
            undo_limit: None,
            read_only: false,
        }
    }
}

/// Initial properties of newly drawn elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Layer of new polygons
    pub polygon_layer: Layer,
    /// Line width of new polygons
    pub polygon_line_width: UnsignedLength,
    /// Fill new polygons
    pub polygon_filled: bool,
    /// Use new polygons as grab area
    pub polygon_grab_area: bool,
    /// Layer of new circles
    pub circle_layer: Layer,
    /// Line width of new circles
    pub circle_line_width: UnsignedLength,
    /// Fill new circles
    pub circle_filled: bool,
    /// Use new circles as grab area
    pub circle_grab_area: bool,
    /// Layer of new free texts
    pub text_layer: Layer,
    /// Height of new texts
    pub text_height: PositiveLength,
    /// Length of new pins
    pub pin_length: UnsignedLength,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            polygon_layer: Layer::SymbolOutlines,
            polygon_line_width: UnsignedLength::saturating(200_000),
            polygon_filled: false,
            polygon_grab_area: true,
            circle_layer: Layer::SymbolOutlines,
            circle_line_width: UnsignedLength::saturating(200_000),
            circle_filled: false,
            circle_grab_area: true,
            text_layer: Layer::SymbolOutlines,
            text_height: PositiveLength::saturating(2_500_000),
            pin_length: UnsignedLength::saturating(2_540_000),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor behaviour
    pub editor: EditorSettings,
    /// Tool defaults
    pub tools: ToolSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Self::format_of(path)? {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Self::format_of(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;
        if editor.near_tolerance.get() < editor.select_tolerance.get() {
            return Err(SettingsError::InvalidSetting {
                key: "editor.near_tolerance".to_string(),
                reason: "must not be smaller than select_tolerance".to_string(),
            });
        }

        if editor.paste_name_retry_limit == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.paste_name_retry_limit".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if editor.undo_limit == Some(0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.undo_limit".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        let tools = &self.tools;
        check_layer(tools.polygon_layer, Layer::CIRCLE_AND_POLYGON_LAYERS, "polygons")?;
        check_layer(tools.circle_layer, Layer::CIRCLE_AND_POLYGON_LAYERS, "circles")?;
        check_layer(tools.text_layer, Layer::TEXT_LAYERS, "texts")?;

        Ok(())
    }

    /// Default configuration file location
    /// (`<config dir>/symkit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load the config at `path`, falling back to defaults if it is missing
    /// or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid configuration");
                Self::default()
            }
        }
    }

    /// Grid interval as a plain length
    pub fn grid_interval(&self) -> Length {
        self.editor.grid_interval.get()
    }

    fn format_of(path: &Path) -> SettingsResult<FileFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FileFormat {
    Json,
    Toml,
}

fn check_layer(layer: Layer, allowed: &[Layer], usage: &str) -> SettingsResult<()> {
    if allowed.contains(&layer) {
        Ok(())
    } else {
        Err(ConfigError::LayerNotAllowed {
            layer: layer.to_string(),
            usage: usage.to_string(),
        }
        .into())
    }
}
