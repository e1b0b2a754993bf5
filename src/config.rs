use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{GardenError, Result};

/// Name of the single slot holding every record
pub const DEFAULT_SLOT_NAME: &str = "garden_records";

const CONFIG_FILE_NAME: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the records slot
    pub data_dir: PathBuf,

    /// Slot name, stored as `<slot_name>.json` inside `data_dir`
    pub slot_name: String,

    /// Keep a copy of the previous slot content before every overwrite
    pub backup_on_write: bool,

    /// Editor used by `add --edit`
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".little-garden"));

        Self {
            data_dir,
            slot_name: DEFAULT_SLOT_NAME.to_string(),
            backup_on_write: false,
            editor_command: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default config location.
    ///
    /// A missing file yields the defaults; an unreadable or unparsable one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            debug!("No config location available, using defaults");
            return Ok(Self::default());
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(GardenError::ConfigError {
                    message: format!("cannot read {}: {}", path.display(), e),
                })
            }
        };

        let config: Config = serde_json::from_str(&raw).map_err(|e| GardenError::ConfigError {
            message: format!("cannot parse {}: {}", path.display(), e),
        })?;

        if config.slot_name.trim().is_empty() {
            return Err(GardenError::ConfigError {
                message: "slot_name must not be empty".to_string(),
            });
        }

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "little-garden")
}

/// `config.json` in the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.slot_name, "garden_records");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"data_dir": "/tmp/garden", "backup_on_write": true}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/garden"));
        assert!(config.backup_on_write);
        assert_eq!(config.slot_name, DEFAULT_SLOT_NAME);
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(GardenError::ConfigError { .. })
        ));
    }

    #[test]
    fn configured_editor_wins() {
        let config = Config {
            editor_command: Some("code --wait".to_string()),
            ..Config::default()
        };
        assert_eq!(config.get_editor_command(), "code --wait");
    }
}
