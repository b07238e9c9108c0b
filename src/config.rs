//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/cprintf/cprintf.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `CPRINTF_*` prefix
//!
//! Only the command line front end loads settings; the library API takes
//! everything explicitly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, LineStyle, Options, Printer, ProgressStyle};
use crate::domain::{FormatMode, Level};
use crate::infrastructure::Console;

/// Unified configuration for cprintf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Minimum severity that gets printed (default: INFO)
    pub level: Level,
    /// Prefix messages with a local timestamp
    pub timestamp: bool,
    /// Default format mode for messages
    pub format: FormatMode,
    /// Length of separator lines
    pub line_length: usize,
    /// Width of progress bars
    pub progress_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: Level::Info,
            timestamp: false,
            format: FormatMode::Auto,
            line_length: LineStyle::default().length,
            progress_width: ProgressStyle::default().width,
        }
    }
}

/// Get the XDG config directory for cprintf.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cprintf").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("cprintf.toml"))
}

impl Settings {
    /// Load settings with layered precedence, see module docs.
    pub fn load(explicit: Option<&Path>) -> ApplicationResult<Self> {
        Self::load_layers(global_config_path().as_deref(), explicit)
    }

    /// Load from the given global and explicit files plus the environment.
    ///
    /// A missing global file is skipped, a missing explicit file is an error.
    pub fn load_layers(global: Option<&Path>, explicit: Option<&Path>) -> ApplicationResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("level", defaults.level.name())
            .map_err(config_err)?
            .set_default("timestamp", defaults.timestamp)
            .map_err(config_err)?
            .set_default("format", defaults.format.name())
            .map_err(config_err)?
            .set_default("line_length", defaults.line_length as i64)
            .map_err(config_err)?
            .set_default("progress_width", defaults.progress_width as i64)
            .map_err(config_err)?;

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                builder = builder.add_source(
                    File::from(global_path.to_path_buf())
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("loading config: {}", path.display());
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("CPRINTF")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Default per-call options derived from these settings.
    pub fn options(&self) -> Options {
        Options::default()
            .format(self.format)
            .timestamp(self.timestamp)
    }

    pub fn line_style(&self) -> LineStyle {
        LineStyle {
            length: self.line_length,
            ..LineStyle::default()
        }
    }

    pub fn progress_style(&self) -> ProgressStyle {
        ProgressStyle {
            width: self.progress_width,
            ..ProgressStyle::default()
        }
    }

    /// Printer writing to `console` with the configured threshold.
    pub fn printer(&self, console: Arc<dyn Console>) -> Printer {
        Printer::new(console).with_level(self.level)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# cprintf configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/cprintf/cprintf.toml
#   File:   --config <path>
#   Env:    CPRINTF_* environment variables (e.g. CPRINTF_LEVEL=warning)

# Minimum severity printed: DEBUG, INFO, WARNING, ERROR, FATAL
# level = "INFO"

# Prefix every message with [YYYY-MM-DD HH:MM:SS]
# timestamp = false

# Message format: auto, raw, json, pretty
# format = "auto"

# Separator line length
# line_length = 50

# Progress bar width
# progress_width = 50
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_files_when_loading_then_uses_defaults() {
        let settings = Settings::load_layers(None, None).expect("load defaults");
        assert_eq!(settings.line_length, 50);
        assert_eq!(settings.progress_width, 50);
        assert_eq!(settings.format, FormatMode::Auto);
    }

    #[test]
    fn given_settings_when_serialized_then_toml_roundtrips() {
        let settings = Settings {
            level: Level::Warning,
            timestamp: true,
            format: FormatMode::Json,
            line_length: 72,
            progress_width: 20,
        };
        let text = settings.to_toml().expect("serialize");
        assert!(text.contains("level = \"WARNING\""));
        let parsed: Settings = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("parse template");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_settings_when_deriving_styles_then_values_flow_through() {
        let settings = Settings {
            format: FormatMode::Raw,
            timestamp: true,
            line_length: 10,
            progress_width: 30,
            ..Settings::default()
        };
        let opts = settings.options();
        assert_eq!(opts.format, FormatMode::Raw);
        assert!(opts.timestamp);
        assert_eq!(settings.line_style().length, 10);
        assert_eq!(settings.progress_style().width, 30);
    }
}
