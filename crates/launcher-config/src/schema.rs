//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use launcher_protocols::LaunchMode;

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub launcher: LauncherConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the synchronized store lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Per-item size limit in bytes. Unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            item_quota_bytes: None,
        }
    }
}

impl StorageConfig {
    /// The store path with `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.path))
    }
}

fn default_storage_path() -> String {
    "~/.hotkey-launcher/sync.json".to_string()
}

/// DevTools endpoint of the browser whose tabs are driven.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_browser_host")]
    pub host: String,

    #[serde(default = "default_debug_port")]
    pub debug_port: u16,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            host: default_browser_host(),
            debug_port: default_debug_port(),
        }
    }
}

impl BrowserConfig {
    /// HTTP endpoint of the DevTools server.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.debug_port)
    }
}

fn default_browser_host() -> String {
    "127.0.0.1".to_string()
}

fn default_debug_port() -> u16 {
    9222
}

/// The launcher surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Address of the launcher page, without launch parameters.
    #[serde(default = "default_page_url")]
    pub page_url: String,

    /// Mode used when a command does not pick one.
    #[serde(default)]
    pub default_mode: LaunchMode,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            default_mode: LaunchMode::default(),
        }
    }
}

fn default_page_url() -> String {
    "http://127.0.0.1:7878/launcher.html".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_directory")]
    pub directory: String,

    /// Days of rotated log files to keep.
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            max_files: default_max_log_files(),
        }
    }
}

impl LoggingConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.directory))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "~/.hotkey-launcher/logs".to_string()
}

fn default_max_log_files() -> usize {
    30
}
