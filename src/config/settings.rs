//! Server settings read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::error::EngineResult;

use super::loader::TaxTableLoader;
use super::types::TaxTables;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Directory of per-year tax YAML files (`TAX_CONFIG_DIR`); built-in tables when unset.
    pub tax_config_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            tax_config_dir: None,
        }
    }
}

impl ServerSettings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through a lookup function instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(port = %raw, default = DEFAULT_PORT, "Invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            tax_config_dir: lookup("TAX_CONFIG_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Returns the `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the bind address as a socket address, if `host` is an IP literal.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.bind_address().parse().ok()
    }

    /// Loads the tax tables from `tax_config_dir`, or returns the built-in tables.
    pub fn load_tax_tables(&self) -> EngineResult<TaxTables> {
        match &self.tax_config_dir {
            Some(dir) => TaxTableLoader::load(dir),
            None => Ok(TaxTables::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> ServerSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = settings(&[]);
        assert_eq!(settings, ServerSettings::default());
        assert_eq!(settings.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_host_port_and_config_dir() {
        let settings = settings(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("TAX_CONFIG_DIR", "config/tax"),
        ]);
        assert_eq!(settings.socket_addr(), Some("127.0.0.1:8080".parse().unwrap()));
        assert_eq!(settings.tax_config_dir, Some(PathBuf::from("config/tax")));
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        assert_eq!(settings(&[("PORT", "http")]).port, 3000);
    }

    #[test]
    fn test_builtin_tables_without_config_dir() {
        let tables = settings(&[]).load_tax_tables().unwrap();
        assert_eq!(tables.years(), vec![2025, 2026]);
    }
}
