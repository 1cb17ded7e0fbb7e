use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default cloud API URL
const DEFAULT_CLOUD_URL: &str = "https://airtame.cloud/api";

/// Environment variable name for cloud URL override
const ENV_CLOUD_URL: &str = "TAMECTL_CLOUD_URL";

/// Configuration file structure
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    cloud: Option<CloudConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct CloudConfig {
    /// API endpoint URL (e.g., "https://airtame.example.com/api")
    api_url: Option<String>,
}

/// Runtime cloud configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEndpointConfig {
    /// Base URL for API calls (e.g., "https://airtame.cloud/api")
    pub api_url: String,
    /// Source of the configuration (for logging)
    pub source: ConfigSource,
}

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Using default hardcoded values
    Default,
    /// Loaded from environment variable
    Environment,
    /// Loaded from config file
    ConfigFile,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::ConfigFile => write!(f, "config file"),
        }
    }
}

impl CloudEndpointConfig {
    /// Full URL of an API path such as `/devices`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Get the path to the configuration file
fn get_config_file_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|p| p.join("tamectl").join("config.toml"))
}

/// Load configuration from the config file
fn load_config_file() -> Option<ConfigFile> {
    let path = get_config_file_path()?;

    if !path.exists() {
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file {:?}: {}", path, e);
            None
        }
    }
}

fn normalize_url(url: &str) -> Option<String> {
    let url = url.trim().trim_end_matches('/');
    (!url.is_empty()).then(|| url.to_string())
}

/// Load cloud endpoint configuration with priority:
/// 1. Environment variable (TAMECTL_CLOUD_URL)
/// 2. Config file (~/.config/tamectl/config.toml)
/// 3. Default values
pub fn load_cloud_config() -> CloudEndpointConfig {
    resolve_cloud_config(std::env::var(ENV_CLOUD_URL).ok(), load_config_file)
}

fn resolve_cloud_config(
    env_url: Option<String>,
    config_file: impl FnOnce() -> Option<ConfigFile>,
) -> CloudEndpointConfig {
    // Priority 1: Environment variable
    if let Some(url) = env_url.as_deref().and_then(normalize_url) {
        tracing::info!("Using cloud API URL from environment variable: {}", url);
        return CloudEndpointConfig {
            api_url: url,
            source: ConfigSource::Environment,
        };
    }

    // Priority 2: Config file
    let file_url = config_file()
        .and_then(|config| config.cloud)
        .and_then(|cloud| cloud.api_url)
        .and_then(|url| normalize_url(&url));
    if let Some(api_url) = file_url {
        tracing::info!("Using cloud API URL from config file: {}", api_url);
        return CloudEndpointConfig {
            api_url,
            source: ConfigSource::ConfigFile,
        };
    }

    // Priority 3: Default values
    tracing::debug!("Using default cloud API URL: {}", DEFAULT_CLOUD_URL);
    CloudEndpointConfig {
        api_url: DEFAULT_CLOUD_URL.to_string(),
        source: ConfigSource::Default,
    }
}

/// Get the path to the config file for documentation purposes
pub fn get_config_file_path_string() -> String {
    get_config_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.config/tamectl/config.toml".to_string())
}

/// Generate example config file content
pub fn generate_example_config() -> String {
    r#"# tamectl Configuration
# Place this file at: ~/.config/tamectl/config.toml

[cloud]
# API endpoint URL
# Default: https://airtame.cloud/api
# api_url = "https://airtame.example.com/api"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content: &str) -> Option<ConfigFile> {
        Some(toml::from_str(content).unwrap())
    }

    #[test]
    fn test_environment_wins_over_config_file() {
        let config = resolve_cloud_config(Some(" https://env.example/api/ ".to_string()), || {
            file("[cloud]\napi_url = \"https://file.example/api\"")
        });
        assert_eq!(config.api_url, "https://env.example/api");
        assert_eq!(config.source, ConfigSource::Environment);
    }

    #[test]
    fn test_blank_environment_falls_through_to_file() {
        let config = resolve_cloud_config(Some("   ".to_string()), || {
            file("[cloud]\napi_url = \"https://file.example/api//\"")
        });
        assert_eq!(config.api_url, "https://file.example/api");
        assert_eq!(config.source, ConfigSource::ConfigFile);
    }

    #[test]
    fn test_default_when_nothing_configured() {
        let config = resolve_cloud_config(None, || file("[cloud]\n"));
        assert_eq!(config.api_url, DEFAULT_CLOUD_URL);
        assert_eq!(config.source, ConfigSource::Default);

        let config = resolve_cloud_config(None, || None);
        assert_eq!(config.source, ConfigSource::Default);
    }

    #[test]
    fn test_endpoint_joins_path() {
        let config = resolve_cloud_config(None, || None);
        assert_eq!(
            config.endpoint("/devices/commands/reboot/bulk"),
            "https://airtame.cloud/api/devices/commands/reboot/bulk"
        );
    }

    #[test]
    fn test_example_config_parses() {
        let parsed: ConfigFile = toml::from_str(&generate_example_config()).unwrap();
        assert!(parsed.cloud.unwrap().api_url.is_none());
    }
}
