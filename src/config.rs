// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Delimited source file loaded once at startup.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    /// Fallback log filter when RUST_LOG is unset, e.g. "info,merchantsearch=debug".
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/final_df.csv")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Load from a YAML file; a missing file falls back to defaults so a
    /// bare checkout runs against the conventional dataset location.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config `{}`", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config `{}`", path.display()))?;
        Ok(config)
    }
}
