//! Environment-only server configuration.

use std::net::SocketAddr;

use crate::error::{LarderError, Result};
use crate::gateway::{DEFAULT_BASE_URL, SpoonacularConfig};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub provider: SpoonacularConfig,
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `SPOONACULAR_API_KEY` and `SPOONACULAR_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                LarderError::Configuration(format!("PORT must be a port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let api_key = lookup("SPOONACULAR_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            provider: SpoonacularConfig {
                api_key,
                base_url: lookup("SPOONACULAR_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| LarderError::Configuration(format!("invalid listen address: {e}")))
    }

    pub fn has_api_key(&self) -> bool {
        self.provider.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("Defaults must load");

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("SPOONACULAR_API_KEY", "abc123"),
            ("SPOONACULAR_BASE_URL", "http://localhost:9000/recipes"),
        ])
        .expect("Config must load");

        assert_eq!(
            config.socket_addr().expect("valid address").to_string(),
            "127.0.0.1:8080"
        );
        assert_eq!(config.provider.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.provider.base_url, "http://localhost:9000/recipes");
    }

    #[test]
    fn test_blank_api_key_counts_as_unset() {
        let config = config_from(&[("SPOONACULAR_API_KEY", "   ")]).expect("Config must load");
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_bad_port_is_configuration_error() {
        let result = config_from(&[("PORT", "eighty")]);
        assert!(matches!(result, Err(LarderError::Configuration(_))));
    }
}
