//! Run settings for `mfr generate`.
//!
//! Settings come from three layers: built-in defaults, an optional JSON
//! config file, and CLI flags. Later layers win.
use crate::cli::GenerateArgs;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Config file picked up from the output directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "mfr.json";

pub const DEFAULT_FILE_NAME: &str = "fullManifest.xml";
pub const DEFAULT_OUTPUT_DIR: &str = "./manifest";
pub const DEFAULT_ORG_LABEL: &str = "unknown";

/// On-disk config file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewConfig {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_label: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub file_name: String,
    pub org_label: String,
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<ReviewConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ReviewConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {} (expected {CONFIG_SCHEMA_VERSION})",
            config.schema_version
        ));
    }
    if let Some(file_name) = config.file_name.as_deref() {
        validate_file_name(file_name, "config file_name")?;
    }
    Ok(config)
}

/// Merge defaults, the config file, and CLI flags.
pub fn resolve_settings(args: &GenerateArgs) -> Result<Settings> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let config = match args.config.as_deref() {
        Some(path) => Some(load_config(path)?),
        None => {
            let implicit = output_dir.join(CONFIG_FILE_NAME);
            if implicit.is_file() {
                tracing::debug!(path = %implicit.display(), "using config from output directory");
                Some(load_config(&implicit)?)
            } else {
                None
            }
        }
    };
    let config = config.unwrap_or(ReviewConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        file_name: None,
        org_label: None,
    });

    let file_name = args
        .name
        .clone()
        .or(config.file_name)
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
    validate_file_name(&file_name, "--name")?;

    let org_label = args
        .org
        .clone()
        .or(config.org_label)
        .unwrap_or_else(|| DEFAULT_ORG_LABEL.to_string());

    Ok(Settings {
        output_dir,
        file_name,
        org_label,
    })
}

fn validate_file_name(name: &str, label: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(anyhow!(
            "{label} must be a plain file name without directories (got {name:?})"
        )),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
