use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub download_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub max_concurrent_downloads: usize,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("/downloads"),
            host: "0.0.0.0".to_string(),
            port: 8090,
            max_concurrent_downloads: 4,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config.with_env_overrides())
    }

    pub fn from_env() -> Self {
        Config::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("DOWNLOAD_DIR") {
            if !dir.is_empty() {
                self.download_dir = PathBuf::from(dir);
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        self
    }

    pub fn get_logging_format(&self) -> &str {
        &self.logging.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service_contract() {
        let config = Config::default();
        assert_eq!(config.download_dir, PathBuf::from("/downloads"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8090);
        assert_eq!(config.max_concurrent_downloads, 4);
        assert_eq!(config.get_logging_format(), "json");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            download_dir = "/tmp/media"
            port = 9000

            [logging]
            format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.download_dir, PathBuf::from("/tmp/media"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.get_logging_format(), "pretty");
    }

    #[test]
    fn environment_overrides_file_values() {
        std::env::set_var("DOWNLOAD_DIR", "/tmp/fetchd-env-test");
        std::env::set_var("PORT", "9999");

        let config = Config::from_env();
        assert_eq!(config.download_dir, PathBuf::from("/tmp/fetchd-env-test"));
        assert_eq!(config.port, 9999);

        std::env::remove_var("DOWNLOAD_DIR");
        std::env::remove_var("PORT");
    }
}
