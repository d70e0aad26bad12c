//! Configuration loading for Pagegrade

mod schema;

pub use schema::{
    AeoConfig, AeoThresholds, AeoWeights, EngineConfig, GradeBoundaries, SeoConfig,
    SeoThresholds, SeoWeights,
};

use crate::CheckKind;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = ".pagegraderc.json";

/// Configuration the engine refuses to start with
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{table} weights must sum to 100, got {sum}")]
    WeightSum { table: &'static str, sum: u64 },

    #[error("{table} weight for '{check}' must be greater than zero")]
    ZeroWeight {
        table: &'static str,
        check: CheckKind,
    },

    #[error("invalid threshold {field}: {reason}")]
    Threshold { field: &'static str, reason: String },

    #[error("invalid grade boundaries: {0}")]
    GradeBoundaries(String),

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("circular extends detected in config: {}", .0.display())]
    CircularExtends(PathBuf),

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Find and load config file with extends resolution. Searches current directory then parents.
///
/// The result is validated; an invalid configuration is an error, never a fallback.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<EngineConfig> {
    let path = match custom_path {
        Some(p) => {
            let path = if p.is_absolute() {
                p.to_path_buf()
            } else {
                work_dir.join(p)
            };
            if !path.exists() {
                return Err(ConfigError::NotFound(path).into());
            }
            Some(path)
        }
        None => find_config_in_parents(work_dir),
    };

    let config = match &path {
        Some(path) => {
            let raw = load_raw_with_extends(path, &mut HashSet::new())?;
            serde_json::from_value::<EngineConfig>(raw)
                .map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
        }
        None => EngineConfig::default(),
    };

    config.validate().with_context(|| match &path {
        Some(p) => format!("Rejected config: {}", p.display()),
        None => "Rejected default config".to_string(),
    })?;

    tracing::debug!(path = ?path, "configuration loaded");
    Ok(config)
}

/// Read a config file as JSON and fold in its `extends` chain
fn load_raw_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Value> {
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(ConfigError::CircularExtends(config_path.to_path_buf()).into());
    }

    let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;
    let mut value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })?;

    let extends = value
        .as_object_mut()
        .and_then(|map| map.remove("extends"))
        .and_then(|v| v.as_str().map(str::to_string));

    match extends {
        Some(extends) => {
            let base_path = resolve_extends(config_path, &extends)?;
            let mut base = load_raw_with_extends(&base_path, visited).with_context(|| {
                format!(
                    "Failed to load {} (extended by {})",
                    base_path.display(),
                    config_path.display()
                )
            })?;
            merge_json(&mut base, value);
            Ok(base)
        }
        None => Ok(value),
    }
}

/// Resolve an extends reference relative to the config that names it
fn resolve_extends(config_path: &Path, extends: &str) -> Result<PathBuf> {
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let path = Path::new(extends);
    let extends_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        config_dir.join(path)
    };

    // Ensure it has .json extension
    let extends_path = if extends_path.extension().is_none() {
        extends_path.with_extension("json")
    } else {
        extends_path
    };

    if !extends_path.exists() {
        return Err(ConfigError::NotFound(extends_path)).with_context(|| {
            format!("Extended config referenced from {}", config_path.display())
        });
    }
    Ok(extends_path)
}

/// Deep-merge `overlay` into `base`; objects merge key by key, anything else replaces.
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Search for .pagegraderc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Default configuration as pretty JSON, used by `pagegrade init`
pub fn default_config_json(threshold: Option<u8>) -> String {
    let config = EngineConfig {
        threshold,
        ..EngineConfig::default()
    };
    serde_json::to_string_pretty(&config).unwrap_or_else(|_| "{}".to_string())
}
