//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::{get_env_flag, get_env_or};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "client=info,warn";

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory (daily rotation)
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "client=debug,info")
    pub log_level: String,
    /// Mirror log output to stderr
    pub log_to_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_dir: PathBuf::from(get_env_or("SIGNALS_LOG_DIR", "logs")),
            log_level: get_env_or("RUST_LOG", DEFAULT_LOG_LEVEL),
            log_to_stderr: get_env_flag("SIGNALS_LOG_STDERR"),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(super::LOG_FILE_NAME)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
