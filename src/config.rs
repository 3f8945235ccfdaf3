use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};
use tracing::info;

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_database_name")]
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            name: default_database_name(),
        }
    }
}

/// Application configuration: an optional `config.toml` with environment
/// overrides. `PORT`, `DATABASE_URL`, and `DATABASE_NAME` win over the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,

    // Tracked for the diagnostic endpoint.
    #[serde(skip)]
    pub database_url_from_env: bool,
    #[serde(skip)]
    pub database_name_from_env: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_PATH).exists() {
            let raw = fs::read_to_string(CONFIG_PATH)
                .with_context(|| format!("Failed to read {}", CONFIG_PATH))?;
            toml::from_str(&raw).with_context(|| format!("Failed to parse {}", CONFIG_PATH))?
        } else {
            info!("No {} found, using defaults", CONFIG_PATH);
            Self::default()
        };

        if let Ok(port) = env::var("PORT") {
            config.server.port = port.parse().context("Invalid PORT value")?;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            config.database.url = url;
            config.database_url_from_env = true;
        }
        if let Ok(name) = env::var("DATABASE_NAME") {
            config.database.name = name;
            config.database_name_from_env = true;
        }

        Ok(config)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "food_ordering".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: AppConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.name, "food_ordering");
        assert!(!config.database_url_from_env);
    }

    #[test]
    fn file_values_override_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [database]
            name = "demo"
            "#,
        )
        .expect("config should parse");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.name, "demo");
        assert_eq!(config.database.url, "mongodb://localhost:27017");
    }
}
