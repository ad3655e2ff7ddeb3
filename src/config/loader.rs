//! Configuration loading functionality.
//!
//! This module provides the [`TaxTableLoader`] type for loading per-year tax
//! tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{TaxTables, TaxYearConfig};

/// Loads tax tables from a directory of YAML files.
///
/// # Directory Structure
///
/// Every `.yaml` file in the directory holds one fiscal year:
/// ```text
/// config/tax/
/// ├── 2025.yaml
/// └── 2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_pay_engine::config::TaxTableLoader;
///
/// let tables = TaxTableLoader::load("./config/tax")?;
/// println!("Loaded years: {:?}", tables.years());
/// # Ok::<(), shift_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Loads and validates every year in the directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the tax configuration directory (e.g., "./config/tax")
    ///
    /// # Returns
    ///
    /// Returns the loaded [`TaxTables`] on success, or an error if:
    /// - The directory is missing or holds no `.yaml` file
    /// - Any file contains invalid YAML
    /// - Any table fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<TaxTables> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut configs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let config = Self::load_year(&path)?;
                debug!(
                    fiscal_year = config.fiscal_year,
                    path = %path.display(),
                    "Loaded tax table"
                );
                configs.push(config);
            }
        }

        if configs.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{}/*.yaml", dir_str),
            });
        }

        let tables = TaxTables::new(configs);
        info!(years = ?tables.years(), "Tax tables loaded");
        Ok(tables)
    }

    /// Loads and validates a single year file.
    pub fn load_year<P: AsRef<Path>>(path: P) -> EngineResult<TaxYearConfig> {
        let path = path.as_ref();
        let config = Self::load_yaml::<TaxYearConfig>(path)?;
        config.validate(&path.display().to_string())?;
        Ok(config)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
