use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub geocoder_url: String,
    pub geocoder_timeout: Duration,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let db_path = PathBuf::from(var("PLACES_DB_PATH", "places.db"));
        let host = var("PLACES_HOST", "0.0.0.0");
        let port: u16 = var("PLACES_PORT", "3000")
            .parse()
            .context("PLACES_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .context("PLACES_HOST must be an IP address")?;
        let timeout_secs: u64 = var("PLACES_GEOCODER_TIMEOUT_SECS", "10")
            .parse()
            .context("PLACES_GEOCODER_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            db_path,
            addr,
            geocoder_url: var("PLACES_GEOCODER_URL", DEFAULT_GEOCODER_URL),
            geocoder_timeout: Duration::from_secs(timeout_secs),
            user_agent: var(
                "PLACES_USER_AGENT",
                concat!("places/", env!("CARGO_PKG_VERSION")),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("places.db"));
        assert_eq!(config.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.geocoder_url, DEFAULT_GEOCODER_URL);
        assert_eq!(config.geocoder_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("places/"));
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("PLACES_DB_PATH", "/tmp/test.db"),
            ("PLACES_HOST", "127.0.0.1"),
            ("PLACES_PORT", "8080"),
            ("PLACES_GEOCODER_URL", "http://localhost:7070"),
            ("PLACES_GEOCODER_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.geocoder_url, "http://localhost:7070");
        assert_eq!(config.geocoder_timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_port_rejected() {
        assert!(config(&[("PLACES_PORT", "http")]).is_err());
        assert!(config(&[("PLACES_GEOCODER_TIMEOUT_SECS", "-1")]).is_err());
    }
}
