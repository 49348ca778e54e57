// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logger;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub spa: SpaConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (common or combined)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// SPA serving configuration
///
/// All servable assets live under `root_dir`; `index_file` is both the
/// default document and the fallback for unknown routes.
#[derive(Debug, Deserialize, Clone)]
pub struct SpaConfig {
    pub root_dir: String,
    pub index_file: String,
}

impl SpaConfig {
    /// Path of the index document under the root directory
    pub fn index_path(&self) -> PathBuf {
        Path::new(&self.root_dir).join(&self.index_file)
    }

    /// Warn (without failing) when the root directory or index document is
    /// missing at startup. A missing index still surfaces as a 500 on the
    /// first request that needs it.
    pub fn warn_if_missing(&self) {
        let root = Path::new(&self.root_dir);
        if !root.is_dir() {
            logger::log_warning(&format!(
                "Root directory '{}' does not exist",
                self.root_dir
            ));
        } else if !self.index_path().is_file() {
            logger::log_warning(&format!(
                "Index document '{}' does not exist; unknown routes will fail",
                self.index_path().display()
            ));
        }
    }
}
