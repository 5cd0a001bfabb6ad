use crate::datasource::subgraph::DEFAULT_SUBGRAPH_URL;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub subgraph_url: String,
    pub rpc_url: String,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let subgraph_url = env_map
            .get("SUBGRAPH_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SUBGRAPH_URL.to_string());

        let rpc_url = env_map
            .get("ETH_RPC_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("ETH_RPC_URL".to_string()))?;

        let cache_ttl_secs = env_map
            .get("CACHE_TTL_SECS")
            .map(|s| s.as_str())
            .unwrap_or("300")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "CACHE_TTL_SECS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        let cache_capacity = env_map
            .get("CACHE_MAXSIZE")
            .map(|s| s.as_str())
            .unwrap_or("1000")
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "CACHE_MAXSIZE".to_string(),
                    "must be a valid usize".to_string(),
                )
            })?;

        Ok(Config {
            subgraph_url,
            rpc_url,
            cache_ttl_secs,
            cache_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(
            "ETH_RPC_URL".to_string(),
            "https://mainnet.example/rpc".to_string(),
        );
        map
    }

    #[test]
    fn test_missing_rpc_url() {
        let result = Config::from_env_map(HashMap::new());
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "ETH_RPC_URL"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.subgraph_url, DEFAULT_SUBGRAPH_URL);
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.cache_capacity, 1000);
    }

    #[test]
    fn test_invalid_cache_ttl() {
        let mut env_map = setup_required_env();
        env_map.insert("CACHE_TTL_SECS".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "CACHE_TTL_SECS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_overrides() {
        let mut env_map = setup_required_env();
        env_map.insert(
            "SUBGRAPH_URL".to_string(),
            "https://indexer.example/v2".to_string(),
        );
        env_map.insert("CACHE_TTL_SECS".to_string(), "60".to_string());
        env_map.insert("CACHE_MAXSIZE".to_string(), "10".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.subgraph_url, "https://indexer.example/v2");
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.cache_capacity, 10);
    }
}
