use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use serde_yaml::Value;

/// File name of the per-user and per-repository override files.
pub const OVERRIDE_FILE_NAME: &str = ".git-spruce.yml";

/// Defaults shipped inside the binary.
const BUNDLED_CONFIG: &str = include_str!("../../config.yml");

/// Label used in errors about the bundled defaults.
const BUNDLED_CONFIG_LABEL: &str = "<bundled config.yml>";

/// Resolved configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Branch that every other branch is checked against.
    pub merge_base: String,

    /// Branch names excluded from scanning entirely.
    pub ignore_branches: Vec<String>,

    /// Remote used by the prune fetch.
    pub origin: String,
}

/// One configuration file. Every key is optional so a layer only
/// overrides what it names.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    merge_base: Option<String>,
    ignore_branches: Option<Vec<String>>,
    origin: Option<String>,
}

impl ConfigLayer {
    /// Shallow merge: each key set in `over` replaces the same key in `self`.
    /// Lists are replaced wholesale.
    fn merge(self, over: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            merge_base: over.merge_base.or(self.merge_base),
            ignore_branches: over.ignore_branches.or(self.ignore_branches),
            origin: over.origin.or(self.origin),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error or unknown key
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A required key is missing after all layers were merged
    #[error("Missing required config key: {0}")]
    MissingKey(&'static str),
}

/// Load the configuration for the current directory.
///
/// Layers, lowest precedence first: the bundled defaults,
/// `~/.git-spruce.yml`, then `./.git-spruce.yml`.
pub fn load_config() -> anyhow::Result<Config> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let mut layers = Vec::new();
    if let Some(home) = dirs::home_dir() {
        layers.push(home.join(OVERRIDE_FILE_NAME));
    }
    layers.push(cwd.join(OVERRIDE_FILE_NAME));

    load_config_with_layers(BUNDLED_CONFIG, &layers)
}

/// Resolve a configuration from default YAML content and override files.
/// Override files that do not exist are skipped.
pub fn load_config_with_layers(
    default_yaml: &str,
    layer_paths: &[PathBuf],
) -> anyhow::Result<Config> {
    let mut merged = parse_layer(default_yaml, Path::new(BUNDLED_CONFIG_LABEL))?;

    for path in layer_paths {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "Using config file");
                merged = merged.merge(parse_layer(&content, path)?);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: path.clone(),
                    source: e,
                }
                .into());
            }
        }
    }

    Ok(Config {
        merge_base: merged
            .merge_base
            .ok_or(ConfigError::MissingKey("merge_base"))?,
        ignore_branches: merged.ignore_branches.unwrap_or_default(),
        origin: merged.origin.unwrap_or_else(default_origin),
    })
}

fn default_origin() -> String {
    "origin".to_string()
}

/// Parse one YAML layer. An empty document is an empty layer.
fn parse_layer(content: &str, path: &Path) -> anyhow::Result<ConfigLayer> {
    let parse_error = |e: serde_yaml::Error| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let value: Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if value.is_null() {
        return Ok(ConfigLayer::default());
    }

    serde_yaml::from_value(value)
        .map_err(parse_error)
        .map_err(Into::into)
}
