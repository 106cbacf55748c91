use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    /// Full URL of the prediction route.
    pub endpoint: Option<String>,
    /// 0 disables the timeout.
    pub request_timeout_sec: Option<u64>,
    pub max_ranked: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
