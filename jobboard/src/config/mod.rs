//! Configuration system for `jobboard`.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/jobboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use jobboard_model::MAX_JOB_TITLE_LENGTH;

use crate::controller::ControllerSettings;
use crate::state::View;
use crate::view::DEFAULT_DASHBOARD_LIMIT;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// `date_format` is not a valid chrono format string.
    #[error("invalid date_format {0:?}: not a chrono strftime pattern")]
    InvalidDateFormat(String),

    /// No data directory was configured and none could be determined.
    #[error("could not determine data directory (pass --data-dir or set XDG_DATA_HOME)")]
    NoDataDir,
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    ui: UiFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    default_view: Option<View>,
    poll_timeout_ms: Option<u64>,
    date_format: Option<String>,
    dashboard_limit: Option<usize>,
    max_title_len: Option<usize>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    // -- Storage --
    /// Directory holding the job records. `None` means the platform default.
    pub data_dir: Option<PathBuf>,
    /// Keep records in memory only.
    pub ephemeral: bool,

    // -- UI --
    /// View shown on startup.
    pub default_view: View,
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Due date display format string (chrono).
    pub date_format: String,
    /// Number of jobs on the dashboard.
    pub dashboard_limit: usize,
    /// Maximum job title length in characters.
    pub max_title_len: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            ephemeral: false,
            default_view: View::Dashboard,
            poll_timeout: Duration::from_millis(50),
            date_format: "%b %-d, %Y".to_string(),
            dashboard_limit: DEFAULT_DASHBOARD_LIMIT,
            max_title_len: MAX_JOB_TITLE_LENGTH,
        }
    }
}

impl TrackerConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/jobboard/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or if its `date_format` is not a valid chrono pattern.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        let config = Self::resolve(cli, &file);
        check_date_format(&config.date_format)?;
        Ok(config)
    }

    /// Resolve a `TrackerConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Kept apart from `load()` so it can be
    /// unit tested without CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone()),
            ephemeral: cli.ephemeral,
            default_view: cli
                .view
                .or(file.ui.default_view)
                .unwrap_or(defaults.default_view),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            date_format: file
                .ui
                .date_format
                .clone()
                .unwrap_or(defaults.date_format),
            dashboard_limit: file
                .ui
                .dashboard_limit
                .unwrap_or(defaults.dashboard_limit),
            max_title_len: file.ui.max_title_len.unwrap_or(defaults.max_title_len),
        }
    }

    /// Directory the file store keeps its records in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] if no directory is configured and
    /// the platform data directory is unknown.
    pub fn jobs_dir(&self) -> Result<PathBuf, ConfigError> {
        let base = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join("jobboard"),
        };
        Ok(base.join("jobs"))
    }

    /// Controller tunables from this configuration.
    #[must_use]
    pub const fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            max_title_len: self.max_title_len,
            dashboard_limit: self.dashboard_limit,
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal job tracker with dashboard, kanban and list views")]
pub struct CliArgs {
    /// Directory for job records (default: platform data dir + `/jobboard`).
    #[arg(long, env = "JOBBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to config file (default: `~/.config/jobboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// View to open on startup.
    #[arg(long, value_enum)]
    pub view: Option<View>,

    /// Keep jobs in memory only; nothing is written to disk.
    #[arg(long)]
    pub ephemeral: bool,

    /// Print jobs that are past due and not done, then exit.
    #[arg(long)]
    pub overdue: bool,

    /// Log level filter (trace, debug, info, warn, error). `RUST_LOG` takes
    /// precedence when set.
    #[arg(long, default_value = "info", env = "JOBBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/jobboard.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Rejects format strings chrono would fail on at render time.
fn check_date_format(format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("jobboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
