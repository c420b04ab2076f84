//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/jsonfn/jsonfn.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `JSONFN_*` prefix, `__` between sections
//!    (e.g. `JSONFN_PROJECTION__MAX_DEPTH=8`)

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::application::{NamingConvention, NestedErrorPolicy, ProjectionOptions};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("environment: {0}")]
    Environment(#[from] config::ConfigError),

    #[error("render settings: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Projection behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Selector name to accessor name transform
    pub naming: NamingConvention,
    /// Maximum relation nesting
    pub max_depth: usize,
    /// Policy for nested decode and shape failures
    pub nested_errors: NestedErrorPolicy,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        let options = ProjectionOptions::default();
        Self {
            naming: options.naming,
            max_depth: options.max_depth,
            nested_errors: options.nested_errors,
        }
    }
}

/// CLI output formatting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawProjectionSettings {
    pub naming: Option<NamingConvention>,
    pub max_depth: Option<usize>,
    pub nested_errors: Option<NestedErrorPolicy>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputSettings {
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub projection: RawProjectionSettings,
    pub output: RawOutputSettings,
}

/// Unified configuration for jsonfn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub projection: ProjectionSettings,
    pub output: OutputSettings,
}

/// Get the XDG config directory for jsonfn.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "jsonfn").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("jsonfn.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let p = &overlay.projection;
        Self {
            projection: ProjectionSettings {
                naming: p.naming.unwrap_or(self.projection.naming),
                max_depth: p.max_depth.unwrap_or(self.projection.max_depth),
                nested_errors: p.nested_errors.unwrap_or(self.projection.nested_errors),
            },
            output: OutputSettings {
                pretty: overlay.output.pretty.unwrap_or(self.output.pretty),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// A missing global config is fine; a missing explicit config is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&Self::load_explicit(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Defaults overlaid with exactly one file; no global config, no environment.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        Ok(Self::default().merge_with(&Self::load_explicit(path)?))
    }

    fn load_explicit(path: &Path) -> Result<RawSettings, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        debug!("loading config {}", path.display());
        load_raw_settings(path)
    }

    /// Apply JSONFN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("JSONFN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        if let Ok(val) = config.get::<NamingConvention>("projection.naming") {
            settings.projection.naming = val;
        }
        if let Ok(val) = config.get::<usize>("projection.max_depth") {
            settings.projection.max_depth = val;
        }
        if let Ok(val) = config.get::<NestedErrorPolicy>("projection.nested_errors") {
            settings.projection.nested_errors = val;
        }
        if let Ok(val) = config.get_bool("output.pretty") {
            settings.output.pretty = val;
        }

        Ok(settings)
    }

    pub fn projection_options(&self) -> ProjectionOptions {
        ProjectionOptions {
            naming: self.projection.naming,
            max_depth: self.projection.max_depth,
            nested_errors: self.projection.nested_errors,
        }
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
