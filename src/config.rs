//! Configuration options

use crate::utils::deserialize_shellexpand;
use anyhow::{Context, Result};
use colored::Colorize;
use directories::ProjectDirs;
use format_serde_error::SerdeError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Configuration file name
const CONFIG_FILE: &str = "monwm.yml";

/// Directories used to resolve the default configuration path
pub(crate) static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("com", "monwm", "monwm"));

// =============== GlobalSettings ================= [[[

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GlobalSettings {
    /// Whether logs should be written to a file
    #[serde(alias = "log-to-file")]
    pub(crate) log_to_file: bool,

    /// The directory to write the log to
    #[serde(alias = "log-dir", deserialize_with = "deserialize_shellexpand")]
    pub(crate) log_dir: Option<PathBuf>,

    /// Gap applied once on top of the padding of every monitor
    #[serde(alias = "window-gap")]
    pub(crate) window_gap: u32,

    /// When asked to show a tag that is visible on another monitor, swap the
    /// tags of the two monitors instead of doing nothing
    #[serde(alias = "swap-monitors-to-get-tag")]
    pub(crate) swap_monitors_to_get_tag: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            log_to_file: false,
            log_dir: None,
            window_gap: 0,
            swap_monitors_to_get_tag: true,
        }
    }
} // ]]] === Global Settings ===

// =================== Config ===================== [[[

/// Configuration file to parse
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub(crate) struct Config {
    /// Global settings
    #[serde(flatten)]
    pub(crate) global: GlobalSettings,

    /// Names of the tags created at startup
    pub(crate) tags: Vec<String>,
}

impl Config {
    /// Create the default configuration file
    pub(crate) fn create_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("Creating configuration path: {}", path.display());
            fs::create_dir_all(path).context("unable to create configuration directory")?;
        }

        let path = path.join(CONFIG_FILE);
        log::debug!("{}: {}", "Configuration path".bright_blue(), path.display());

        if !path.is_file() {
            let initialization = include_str!("../example/monwm.yml");

            let mut config_file: fs::File = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .open(&path)
                .with_context(|| format!("could not create monwm config: '{}'", path.display()))?;

            config_file
                .write_all(initialization.as_bytes())
                .with_context(|| format!("could not create monwm config: '{}'", path.display()))?;
            config_file.flush()?;
        }

        Self::load(path)
    }

    /// Load the configuration file from a given path
    pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = fs::read_to_string(path).context("failed to read config file")?;
        let res = serde_yaml::from_str(&file).map_err(|e| SerdeError::new(file, e))?;

        Ok(res)
    }

    /// Load the default configuration file, creating it if missing
    pub(crate) fn load_default() -> Result<Self> {
        let dirs = PROJECT_DIRS
            .as_ref()
            .context("failed to determine a configuration directory")?;

        log::debug!("loading default config: {}", dirs.config_dir().display());
        Self::create_default(dirs.config_dir())
    }
} // ]]] === Config ===
