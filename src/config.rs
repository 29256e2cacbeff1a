//! Runtime Configuration
//!
//! Read from environment variables at startup:
//! - `FISH_DATA_PATH`: fish CSV (default `dataset/fish_data.csv`)
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: listen port (default `5000`)

use std::net::IpAddr;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "dataset/fish_data.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub data_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
        }
    }
}

impl AdvisorConfig {
    /// Configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup
    ///
    /// Unparsable values fall back to the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_path = lookup("FISH_DATA_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let host = match lookup("HOST") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid HOST '{}', using {}", raw, DEFAULT_HOST);
                defaults.host
            }),
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT '{}', using {}", raw, DEFAULT_PORT);
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            data_path,
            host,
            port,
        }
    }
}
