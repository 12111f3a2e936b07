//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which record store implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordBackend {
    /// One JSON document per record under `DATA_DIR/users`
    File,
    /// Process-local map, lost on restart
    Memory,
}

impl FromStr for RecordBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(RecordBackend::File),
            "memory" => Ok(RecordBackend::Memory),
            other => Err(format!("unknown record backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Directory uploaded files are written to
    pub upload_dir: PathBuf,
    /// Root directory of the file-backed record store
    pub data_dir: PathBuf,
    /// Record store implementation
    pub record_backend: RecordBackend,
    /// Cache TTL in seconds (0 = entries never expire)
    pub cache_ttl: u64,
    /// Background cache sweep interval in seconds
    pub cache_check_period: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPLOAD_DIR` - Upload directory (default: uploads)
    /// - `DATA_DIR` - Record store directory (default: data)
    /// - `RECORD_BACKEND` - `file` or `memory` (default: file)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 100)
    /// - `CACHE_CHECK_PERIOD` - Sweep frequency in seconds (default: 120)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upload_dir: env::var("UPLOAD_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            data_dir: env::var("DATA_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            record_backend: parse_var("RECORD_BACKEND").unwrap_or(defaults.record_backend),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_check_period: parse_var("CACHE_CHECK_PERIOD")
                .unwrap_or(defaults.cache_check_period),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upload_dir: PathBuf::from("uploads"),
            data_dir: PathBuf::from("data"),
            record_backend: RecordBackend::File,
            cache_ttl: 100,
            cache_check_period: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.record_backend, RecordBackend::File);
        assert_eq!(config.cache_ttl, 100);
        assert_eq!(config.cache_check_period, 120);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("UPLOAD_DIR");
        env::remove_var("DATA_DIR");
        env::remove_var("RECORD_BACKEND");
        env::remove_var("CACHE_TTL");
        env::remove_var("CACHE_CHECK_PERIOD");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.record_backend, RecordBackend::File);
        assert_eq!(config.cache_ttl, 100);
        assert_eq!(config.cache_check_period, 120);
    }

    #[test]
    fn test_record_backend_parse() {
        assert_eq!("file".parse::<RecordBackend>(), Ok(RecordBackend::File));
        assert_eq!(" Memory ".parse::<RecordBackend>(), Ok(RecordBackend::Memory));
        assert!("mongo".parse::<RecordBackend>().is_err());
    }
}
