//! Configuration for the rearrange binary
//!
//! Loaded in order of precedence:
//! 1. Command-line flags (highest priority)
//! 2. Config file (~/.config/rearrange/config.toml or --config)
//! 3. Built-in defaults (lowest priority)

use crate::error::{Error, Result};
use crate::list::{ListProps, DEFAULT_MOVE_DOWN_ICON, DEFAULT_MOVE_UP_ICON};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub props: ListProps,
    /// Object field used as item text for JSON object items.
    pub text_field: Option<String>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    pub level: String,
    /// The terminal owns stdout, so logs only go to a file.
    pub file_enabled: bool,
    pub file_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
        }
    }
}

// Raw TOML shape: every key optional so partial files merge over defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub label: Option<String>,
    pub max_height: Option<u16>,
    pub disabled: Option<bool>,
    pub disable_drag_and_drop: Option<bool>,
    pub remove_arrows: Option<bool>,
    pub move_up_icon: Option<String>,
    pub move_down_icon: Option<String>,
    pub text_field: Option<String>,
    #[serde(default)]
    pub logging: FileLogging,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<PathBuf>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub label: Option<String>,
    pub max_height: Option<u16>,
    pub disabled: bool,
    pub disable_drag_and_drop: bool,
    pub remove_arrows: bool,
    pub move_up_icon: Option<String>,
    pub move_down_icon: Option<String>,
    pub text_field: Option<String>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rearrange").join("config.toml"))
    }

    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load_file(path: &Path) -> Result<FileConfig> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
            Err(e) => return Err(Error::io(path, e)),
        };
        toml::from_str(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(explicit: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let file = match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_file(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(file, overrides))
    }

    pub fn merge(file: FileConfig, cli: Overrides) -> Self {
        let props = ListProps {
            label: cli.label.or(file.label),
            max_height: cli.max_height.or(file.max_height),
            disabled: cli.disabled || file.disabled.unwrap_or(false),
            disable_drag_and_drop: cli.disable_drag_and_drop
                || file.disable_drag_and_drop.unwrap_or(false),
            remove_arrows: cli.remove_arrows || file.remove_arrows.unwrap_or(false),
            move_up_icon: cli
                .move_up_icon
                .or(file.move_up_icon)
                .unwrap_or_else(|| DEFAULT_MOVE_UP_ICON.to_string()),
            move_down_icon: cli
                .move_down_icon
                .or(file.move_down_icon)
                .unwrap_or_else(|| DEFAULT_MOVE_DOWN_ICON.to_string()),
        };
        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file.logging.level.unwrap_or(defaults.level),
            file_enabled: file.logging.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.logging.file_dir.unwrap_or(defaults.file_dir),
        };
        Config {
            props,
            text_field: cli.text_field.or(file.text_field),
            logging,
        }
    }
}
