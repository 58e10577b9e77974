//! Configuration
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `lettercode.toml` in the working directory, or an explicit file
//! 3. `LETTERCODE__*` environment variables (a `.env` file is loaded first)
//!
//! Nested keys use a double underscore in the environment, for example
//! `LETTERCODE__INPUT__PROMPT` sets `input.prompt`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "lettercode.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LETTERCODE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub source: SourceSettings,
    pub input: InputSettings,
    pub log: LogSettings,
}

/// How program files are located and checked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Required file extension, without the dot
    pub extension: String,
    pub require_extension: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            extension: "lc".to_string(),
            require_extension: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Written to stderr before each input request. Empty disables it.
    pub prompt: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            prompt: "The program asked for input.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `tracing` filter used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Render the effective settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render settings as TOML")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    config_path: Option<PathBuf>,
    skip_env: bool,
}

impl SettingsBuilder {
    /// Read this file instead of `lettercode.toml`. The file must exist.
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Ignore `.env` and environment variables
    pub fn skip_env(mut self, skip: bool) -> Self {
        self.skip_env = skip;
        self
    }

    pub fn build(self) -> Result<Settings> {
        if !self.skip_env {
            // A missing .env file is not an error
            let _ = dotenvy::dotenv();
        }

        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("source.extension", defaults.source.extension)?
            .set_default("source.require_extension", defaults.source.require_extension)?
            .set_default("input.prompt", defaults.input.prompt)?
            .set_default("log.filter", defaults.log.filter)?;

        builder = match &self.config_path {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false)),
        };

        if !self.skip_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings: Settings = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        debug!(config_path = ?self.config_path, "loaded settings");
        Ok(settings)
    }
}
