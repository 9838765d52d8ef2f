// src/config.rs

//! Configuration structures for the editor.
//!
//! Every section deserializes with `#[serde(default)]` so a config file only
//! needs to name what it overrides. `load_or_default` reads an optional JSON
//! file named by the `CELLPAINT_CONFIG` environment variable; any problem
//! with it degrades to the built-in defaults with a warning rather than
//! aborting startup.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Complete editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Canvas dimensions.
    pub canvas: CanvasConfig,
    /// Undo/redo history settings.
    pub history: HistoryConfig,
    /// Saved-drawing storage settings.
    pub storage: StorageConfig,
    /// Transient status message settings.
    pub status: StatusConfig,
}

impl Config {
    /// Loads the config file named by `CELLPAINT_CONFIG`, or returns the
    /// defaults when the variable is unset or the file is unusable.
    pub fn load_or_default() -> Self {
        let Some(path) = std::env::var_os("CELLPAINT_CONFIG") else {
            return Config::default();
        };
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", PathBuf::from(&path).display());
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config {}: {}. Using defaults.",
                        PathBuf::from(&path).display(),
                        e
                    );
                    Config::default()
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read config {}: {}. Using defaults.",
                    PathBuf::from(&path).display(),
                    e
                );
                Config::default()
            }
        }
    }
}

/// Canvas dimensions in cells. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 30,
            height: 15,
        }
    }
}

/// Undo/redo history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of retained snapshots.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig { capacity: 50 }
    }
}

/// Saved-drawing storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding saved records, relative to the working directory
    /// unless absolute. Created on first save.
    pub directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            directory: PathBuf::from("drawings"),
        }
    }
}

/// Transient status message settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// How long a status message stays on screen.
    pub message_duration_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        StatusConfig {
            message_duration_ms: 2000,
        }
    }
}
