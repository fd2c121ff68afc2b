//! User configuration.
//!
//! Loaded from an optional TOML file plus `GITSTATE_*` environment overrides:
//!
//! ```toml
//! git = "git"
//! command-timeout-ms = 5000
//!
//! [symbols]
//! ahead = "^"
//! behind = "v"
//! ```
//!
//! File location, in priority order:
//! 1. `GITSTATE_CONFIG_PATH`
//! 2. `<config dir>/gitstate/config.toml` (XDG on Linux and macOS, `%APPDATA%` on Windows)
//!
//! Environment overrides apply to top-level keys, e.g.
//! `GITSTATE_COMMAND_TIMEOUT_MS=500` or `GITSTATE_GIT=/usr/local/bin/git`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Case, Config, ConfigError, Environment, File, FileFormat};
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

use crate::styling::Symbols;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV_VAR: &str = "GITSTATE_CONFIG_PATH";

const ENV_PREFIX: &str = "GITSTATE";

const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserConfig {
    /// Git executable to invoke
    pub git: String,
    /// Per-invocation timeout in milliseconds; 0 disables it
    pub command_timeout_ms: u64,
    pub symbols: Symbols,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
            symbols: Symbols::default(),
        }
    }
}

impl UserConfig {
    /// Load from the default location, falling back to defaults on any error.
    ///
    /// A prompt must always render, so a broken config only produces a warning.
    pub fn load() -> Self {
        let path = config_path();
        match Self::load_from(path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring invalid config: {}", e);
                Self::default()
            }
        }
    }

    /// Load from `path` (if given and present) layered under environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            log::debug!("Loading config from {}", path.display());
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .convert_case(Case::Kebab)
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_ms > 0).then(|| Duration::from_millis(self.command_timeout_ms))
    }
}

/// Resolve the config file path, or `None` if no home directory is known.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("gitstate").join("config.toml"))
}
