//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treerender/treerender.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TREERENDER_*` prefix, `__` for nesting
//!    (e.g. `TREERENDER_STYLE__CONNECTOR`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::RenderStyle;

/// Raw style for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStyle {
    pub dash: Option<char>,
    pub connector: Option<String>,
    pub continuation: Option<String>,
    pub blank: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub overwrite: Option<bool>,
    pub style: RawStyle,
}

/// Unified configuration for treerender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Replace an existing output file (default: true)
    pub overwrite: bool,
    /// Glyphs used for drawing
    pub style: RenderStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overwrite: true,
            style: RenderStyle::default(),
        }
    }
}

/// Get the XDG config directory for treerender.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treerender").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treerender.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay values win if specified, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let style = &overlay.style;
        Self {
            overwrite: overlay.overwrite.unwrap_or(self.overwrite),
            style: RenderStyle {
                dash: style.dash.unwrap_or(self.style.dash),
                connector: style
                    .connector
                    .clone()
                    .unwrap_or_else(|| self.style.connector.clone()),
                continuation: style
                    .continuation
                    .clone()
                    .unwrap_or_else(|| self.style.continuation.clone()),
                blank: style
                    .blank
                    .clone()
                    .unwrap_or_else(|| self.style.blank.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    ///
    /// # Errors
    /// Unreadable or malformed files, malformed environment overrides and
    /// styles whose glyph widths do not line up are reported as
    /// [`ApplicationError::Config`].
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Check that the configured style draws aligned trees.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.style.validate().map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }

    /// Apply TREERENDER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("TREERENDER")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Some(val) = env_value(config.get_bool("overwrite"))? {
            settings.overwrite = val;
        }
        if let Some(val) = env_value(config.get_string("style.dash"))? {
            let mut chars = val.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => settings.style.dash = c,
                _ => {
                    return Err(ApplicationError::Config {
                        message: format!("style.dash must be a single character, got '{}'", val),
                    })
                }
            }
        }
        if let Some(val) = env_value(config.get_string("style.connector"))? {
            settings.style.connector = val;
        }
        if let Some(val) = env_value(config.get_string("style.continuation"))? {
            settings.style.continuation = val;
        }
        if let Some(val) = env_value(config.get_string("style.blank"))? {
            settings.style.blank = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

/// An unset variable is `None`; one that is set but does not parse is an error.
fn env_value<T>(lookup: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match lookup {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
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
    fn test_defaults_match_plain_ascii_style() {
        let settings = Settings::default();
        assert!(settings.overwrite);
        assert_eq!(settings.style.connector, "---+");
        assert_eq!(settings.style.dash, '-');
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_merge_with_keeps_unspecified_values() {
        let raw: RawSettings = toml::from_str(
            r#"
[style]
connector = "--+"
"#,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&raw);

        assert!(merged.overwrite);
        assert_eq!(merged.style.connector, "--+");
        assert_eq!(merged.style.blank, "    ");
        // widths no longer line up
        assert!(merged.validate().is_err());
    }

    #[test]
    fn test_env_value_distinguishes_unset_from_malformed() {
        assert_eq!(env_value(Ok(true)).unwrap(), Some(true));
        let unset: Result<bool, _> = Err(ConfigError::NotFound("overwrite".into()));
        assert_eq!(env_value(unset).unwrap(), None);
        let malformed: Result<bool, _> = Err(ConfigError::Message("invalid type".into()));
        assert!(matches!(
            env_value(malformed),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
