use crate::error::{JotzError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_COLOR: &str = "#ffffff";
const DEFAULT_PREVIEW_WIDTH: usize = 60;

/// Configuration for jotz, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JotzConfig {
    /// Color given to new notes when none is passed
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Maximum width of the note text shown by `list`
    #[serde(default = "default_preview_width")]
    pub preview_width: usize,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_preview_width() -> usize {
    DEFAULT_PREVIEW_WIDTH
}

impl Default for JotzConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }
}

/// Keys understood by [`JotzConfig::get`] and [`JotzConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["default-color", "preview-width"];

impl JotzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JotzError::Io)?;
        let config: JotzConfig =
            serde_json::from_str(&content).map_err(JotzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JotzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JotzError::Serialization)?;
        fs::write(config_path, content).map_err(JotzError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "default-color" => Ok(self.default_color.clone()),
            "preview-width" => Ok(self.preview_width.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-color" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(JotzError::Config("default-color cannot be empty".into()));
                }
                self.default_color = value.to_string();
            }
            "preview-width" => {
                self.preview_width = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|w| *w > 0)
                    .ok_or_else(|| {
                        JotzError::Config(format!(
                            "preview-width must be a positive number, got {:?}",
                            value
                        ))
                    })?;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> JotzError {
    JotzError::Config(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
