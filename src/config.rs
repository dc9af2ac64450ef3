use axum::http::HeaderValue;
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;

use crate::tariffs::usitc::DEFAULT_HTS_URL;

pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,https://tarifftaxiq.org,https://www.tarifftaxiq.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub catalog_path: String,
    pub hts_data_url: String,
    pub hts_timeout: Duration,
    pub allowed_origins: AllowedOrigins,
}

/// Origins permitted by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let catalog_path = env_map
            .get("CATALOG_PATH")
            .cloned()
            .unwrap_or_else(|| "data/sample_data.json".to_string());
        if catalog_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "CATALOG_PATH".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let hts_data_url = env_map
            .get("HTS_DATA_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_HTS_URL.to_string());
        if !(hts_data_url.starts_with("http://") || hts_data_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "HTS_DATA_URL".to_string(),
                format!("must be an http(s) URL, got {}", hts_data_url),
            ));
        }

        let hts_timeout_secs = env_map
            .get("HTS_TIMEOUT_SECS")
            .map(|s| s.as_str())
            .unwrap_or("30")
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "HTS_TIMEOUT_SECS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let allowed_origins = parse_allowed_origins(
            env_map
                .get("ALLOWED_ORIGINS")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_ALLOWED_ORIGINS),
        )?;

        Ok(Config {
            host,
            port,
            catalog_path,
            hts_data_url,
            hts_timeout: Duration::from_secs(hts_timeout_secs),
            allowed_origins,
        })
    }
}

fn parse_allowed_origins(raw: &str) -> Result<AllowedOrigins, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if origins.contains(&"*") {
        return Ok(AllowedOrigins::Any);
    }
    if origins.is_empty() {
        return Err(ConfigError::InvalidValue(
            "ALLOWED_ORIGINS".to_string(),
            "must list at least one origin or *".to_string(),
        ));
    }

    origins
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| {
                ConfigError::InvalidValue(
                    "ALLOWED_ORIGINS".to_string(),
                    format!("invalid origin {}", origin),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AllowedOrigins::List)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.catalog_path, "data/sample_data.json");
        assert_eq!(config.hts_data_url, DEFAULT_HTS_URL);
        assert_eq!(config.hts_timeout, Duration::from_secs(30));
        match config.allowed_origins {
            AllowedOrigins::List(origins) => assert_eq!(origins.len(), 3),
            AllowedOrigins::Any => panic!("Expected origin list"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_host() {
        let mut env_map = HashMap::new();
        env_map.insert("HOST".to_string(), "localhost:80".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "HOST"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_hts_url() {
        let mut env_map = HashMap::new();
        env_map.insert("HTS_DATA_URL".to_string(), "ftp://example.com".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "HTS_DATA_URL"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut env_map = HashMap::new();
        env_map.insert("HTS_TIMEOUT_SECS".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "HTS_TIMEOUT_SECS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_wildcard_origins() {
        let mut env_map = HashMap::new();
        env_map.insert(
            "ALLOWED_ORIGINS".to_string(),
            "http://a.example, *".to_string(),
        );
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.allowed_origins, AllowedOrigins::Any);
    }

    #[test]
    fn test_empty_origins_rejected() {
        let mut env_map = HashMap::new();
        env_map.insert("ALLOWED_ORIGINS".to_string(), " , ".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "ALLOWED_ORIGINS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_custom_origin_list() {
        let mut env_map = HashMap::new();
        env_map.insert(
            "ALLOWED_ORIGINS".to_string(),
            "https://one.example,https://two.example".to_string(),
        );
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(
            config.allowed_origins,
            AllowedOrigins::List(vec![
                HeaderValue::from_static("https://one.example"),
                HeaderValue::from_static("https://two.example"),
            ])
        );
    }
}
