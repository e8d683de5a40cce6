/// Configuration management for Fornost
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables checked for the API token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["HETZNER_API_TOKEN", "HCLOUD_TOKEN"];

/// Optional on-disk configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Hetzner Cloud API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Override for the API root (e.g. a proxy or mock server)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl FileConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fornost").join("config.yaml"))
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load an explicitly requested file, or the default file when present
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Effective settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub endpoint: Option<String>,
}

impl Settings {
    /// Resolve settings from flags, the process environment and the config file
    pub fn resolve(
        flag_token: Option<String>,
        flag_endpoint: Option<String>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let file = FileConfig::load(config_path)?;
        Self::from_sources(flag_token, flag_endpoint, |name| std::env::var(name).ok(), file)
    }

    /// Precedence: flag, then environment, then config file.
    /// Blank values count as unset.
    pub fn from_sources<E>(
        flag_token: Option<String>,
        flag_endpoint: Option<String>,
        env: E,
        file: FileConfig,
    ) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let token = non_blank(flag_token)
            .or_else(|| TOKEN_ENV_VARS.iter().find_map(|name| non_blank(env(*name))))
            .or_else(|| non_blank(file.token))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Hetzner Cloud API token not found. Pass --token, set {} or add `token:` to {}",
                    TOKEN_ENV_VARS.join(" or "),
                    FileConfig::default_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "the config file".to_string())
                )
            })?;

        Ok(Self {
            token,
            endpoint: non_blank(flag_endpoint).or_else(|| non_blank(file.endpoint)),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_flag_wins_over_env_and_file() {
        let file = FileConfig {
            token: Some("from-file".to_string()),
            endpoint: None,
        };
        let settings = Settings::from_sources(
            Some("from-flag".to_string()),
            None,
            env_from(&[("HETZNER_API_TOKEN", "from-env")]),
            file,
        )
        .unwrap();
        assert_eq!(settings.token, "from-flag");
    }

    #[test]
    fn test_env_order_and_blank_values() {
        let settings = Settings::from_sources(
            Some("  ".to_string()),
            None,
            env_from(&[("HETZNER_API_TOKEN", ""), ("HCLOUD_TOKEN", "legacy")]),
            FileConfig::default(),
        )
        .unwrap();
        assert_eq!(settings.token, "legacy");
    }

    #[test]
    fn test_file_is_last_resort() {
        let file = FileConfig {
            token: Some(" from-file\n".to_string()),
            endpoint: Some("http://localhost:9000/v1".to_string()),
        };
        let settings = Settings::from_sources(None, None, env_from(&[]), file).unwrap();
        assert_eq!(settings.token, "from-file");
        assert_eq!(settings.endpoint.as_deref(), Some("http://localhost:9000/v1"));
    }

    #[test]
    fn test_missing_token_is_error() {
        let err = Settings::from_sources(None, None, env_from(&[]), FileConfig::default())
            .unwrap_err()
            .to_string();
        assert!(err.contains("HETZNER_API_TOKEN"));
    }

    #[test]
    fn test_yaml_config_parses() {
        let config: FileConfig = serde_yaml::from_str("token: abc123\n").unwrap();
        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert!(config.endpoint.is_none());
    }
}
