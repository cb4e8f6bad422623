//! Service configuration.
//!
//! Loaded from an optional JSON file; any field the file leaves out takes
//! its default. The binary layers CLI flags and `MURMUR_*` environment
//! variables on top.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Keys accepted by the `/api` gate when none are configured.
pub const DEFAULT_API_KEYS: [&str; 3] = ["perscholas", "ps-example", "hJAsknw-L198sAJD-l3kasx"];

/// Largest request body accepted when none is configured (100 KiB).
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Keys accepted on `/api` routes
    #[serde(default = "default_api_keys")]
    pub api_keys: Vec<String>,

    /// Largest request body in bytes (default: 102400)
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

fn default_api_keys() -> Vec<String> {
    DEFAULT_API_KEYS.iter().map(|&k| k.to_owned()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_keys: default_api_keys(),
            body_limit: default_body_limit(),
        }
    }
}

impl Config {
    /// Reads a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_owned(), source })?;
        serde_json::from_str(&raw)
            .map_err(|source| Error::ConfigParse { path: path.to_owned(), source })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|source| Error::Address { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
        assert_eq!(config.api_keys.len(), 3);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_keys, default_api_keys());
        assert_eq!(config.body_limit, 100 * 1024);
    }

    #[test]
    fn body_limit_is_configurable() {
        let config: Config = serde_json::from_str(r#"{"body_limit": 512}"#).unwrap();
        assert_eq!(config.body_limit, 512);
    }

    #[test]
    fn bad_host_is_reported() {
        let config = Config { host: "not a host".to_owned(), ..Config::default() };
        assert!(matches!(config.socket_addr(), Err(Error::Address { .. })));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Config::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
