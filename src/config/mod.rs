mod file_config;

pub use file_config::FileConfig;

use crate::predictor::{parse_endpoint, DEFAULT_ENDPOINT};
use crate::session::DEFAULT_MAX_RANKED;
use anyhow::{bail, Result};
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub endpoint: String,
    pub request_timeout_sec: u64,
    pub max_ranked: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_sec: 0,
            max_ranked: DEFAULT_MAX_RANKED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub endpoint: String,
    pub request_timeout: Option<Duration>,
    pub max_ranked: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let endpoint = file.endpoint.unwrap_or_else(|| cli.endpoint.clone());
        let endpoint = match parse_endpoint(&endpoint) {
            Ok(url) => url.to_string(),
            Err(e) => bail!("{}", e),
        };

        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli.request_timeout_sec);
        let request_timeout = if request_timeout_sec > 0 {
            Some(Duration::from_secs(request_timeout_sec))
        } else {
            None
        };

        let max_ranked = file.max_ranked.unwrap_or(cli.max_ranked);
        if max_ranked == 0 {
            bail!("max_ranked must be greater than 0");
        }

        Ok(Self {
            endpoint,
            request_timeout,
            max_ranked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), None).unwrap();

        assert_eq!(config.endpoint, "http://localhost:8000/predict");
        assert!(config.request_timeout.is_none());
        assert_eq!(config.max_ranked, 8);
    }

    #[test]
    fn test_resolve_cli_only() {
        let cli = CliConfig {
            endpoint: "https://emotions.example.com/predict".to_string(),
            request_timeout_sec: 30,
            max_ranked: 4,
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.endpoint, "https://emotions.example.com/predict");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.max_ranked, 4);
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let cli = CliConfig {
            endpoint: "http://should-be-overridden:8000/predict".to_string(),
            request_timeout_sec: 30,
            max_ranked: 4,
        };

        let file_config = FileConfig {
            endpoint: Some("http://127.0.0.1:9000/predict".to_string()),
            request_timeout_sec: Some(0),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/predict");
        assert!(config.request_timeout.is_none());
        // CLI value used when TOML doesn't specify
        assert_eq!(config.max_ranked, 4);
    }

    #[test]
    fn test_resolve_invalid_endpoint_error() {
        let cli = CliConfig {
            endpoint: "localhost:8000".to_string(),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid endpoint"));
    }

    #[test]
    fn test_resolve_zero_max_ranked_error() {
        let file_config = FileConfig {
            max_ranked: Some(0),
            ..Default::default()
        };
        let result = AppConfig::resolve(&CliConfig::default(), Some(file_config));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("max_ranked must be greater than 0"));
    }
}
