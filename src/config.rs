use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration for the import flow
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Directory where canonical JSON records are stored
    #[serde(default = "default_jsons_dir")]
    pub jsons_dir: String,
    /// Directory where downloaded recipe images are stored
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with page and image fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            jsons_dir: default_jsons_dir(),
            images_dir: default_images_dir(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_jsons_dir() -> String {
    "jsons".to_string()
}

fn default_images_dir() -> String {
    "images".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with CLIPPER__ prefix
/// 2. clipper.toml file in current directory
/// 3. Default values
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("clipper").required(false))
        .add_source(
            Environment::with_prefix("CLIPPER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.jsons_dir, "jsons");
        assert_eq!(config.images_dir, "images");
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_load_config_without_file_uses_defaults() {
        let keys_to_clear: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("CLIPPER__"))
            .map(|(k, _)| k)
            .collect();
        for key in keys_to_clear {
            std::env::remove_var(&key);
        }

        let config = load_config().unwrap();
        assert_eq!(config.timeout, AppConfig::default().timeout);
        assert_eq!(config.jsons_dir, AppConfig::default().jsons_dir);
    }
}
