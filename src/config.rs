use crate::errors::{PalaverError, PalaverResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001/api/chat";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub log_directory: String,
    pub log_level: String,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_directory: "logs".to_string(),
            log_level: "info".to_string(),
            tick_rate_ms: 250,
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> PalaverResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path).map_err(|e| {
            PalaverError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| PalaverError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    } else {
        // Create default config
        let mut config = Config::default();

        // The env var wins on first run so the default file already points
        // at the right backend
        if let Ok(endpoint) = env::var("PALAVER_ENDPOINT") {
            config.endpoint = endpoint;
        }

        validate_config(&config)?;

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            PalaverError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config).map_err(|e| {
            PalaverError::config_error(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&config_path, config_str).map_err(|e| {
            PalaverError::config_error(format!("Failed to write config file: {}", e))
        })?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn get_config_path() -> PalaverResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| PalaverError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("palaver").join("config.json"))
}

fn validate_config(config: &Config) -> PalaverResult<()> {
    if config.endpoint.is_empty() {
        return Err(PalaverError::config_error("Chat endpoint is required"));
    }

    if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
        return Err(PalaverError::config_error(
            "Chat endpoint must be an http(s) URL",
        ));
    }

    if config.log_level.parse::<log::LevelFilter>().is_err() {
        return Err(PalaverError::config_error(format!(
            "Unknown log level: {}",
            config.log_level
        )));
    }

    if config.tick_rate_ms == 0 {
        return Err(PalaverError::config_error(
            "tick_rate_ms must be greater than 0",
        ));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_endpoint() {
        let mut config = Config::default();
        config.endpoint = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_non_http_endpoint() {
        let mut config = Config::default();
        config.endpoint = "ftp://example.com/chat".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_unknown_log_level() {
        let mut config = Config::default();
        config.log_level = "chatty".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_tick_rate() {
        let mut config = Config::default();
        config.tick_rate_ms = 0;
        assert!(validate_config(&config).is_err());
    }
}
