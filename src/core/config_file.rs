//! User configuration file handling
//!
//! Manages settings from `<config dir>/tofu/settings.json`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// User configuration from settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub family_name: Option<String>,
    pub style_name: Option<String>,
    pub version_major: Option<i32>,
    pub version_minor: Option<u32>,
    /// License text written into the name table
    pub license: Option<String>,
    pub license_url: Option<String>,
    /// Glyphs per font when `--split` is given without a size
    pub split_size: Option<usize>,
    /// Command used to compile UFO sources (default `fontc`)
    pub fontc_command: Option<String>,
    /// Command used to merge fonts into a collection (default `otf2otc`)
    pub collection_command: Option<String>,
    /// Also write logs to the logs directory
    pub log_to_file: bool,
}

impl ConfigFile {
    /// Get the path to the tofu config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("tofu")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from the user config file
    ///
    /// A missing file is not an error.
    pub fn load() -> anyhow::Result<Option<Self>> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        debug!("Loaded user settings from {:?}", path);
        Ok(Some(config))
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings written by `--new-config`
    pub fn example() -> Self {
        ConfigFile {
            family_name: Some("Tofu".to_string()),
            style_name: Some("Regular".to_string()),
            version_major: Some(1),
            version_minor: Some(0),
            license: None,
            license_url: None,
            split_size: Some(crate::font_source::DEFAULT_SPLIT_SIZE),
            fontc_command: Some("fontc".to_string()),
            collection_command: Some("otf2otc".to_string()),
            log_to_file: false,
        }
    }

    /// Initialize the complete user configuration directory
    ///
    /// This creates:
    /// 1. The tofu config directory
    /// 2. A logs/ directory
    /// 3. A settings.json file with default values, unless one exists
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();

        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = Self::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::example().save()?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - Enable log_to_file to keep logs in: {:?}", logs_dir);

        Ok(())
    }
}
