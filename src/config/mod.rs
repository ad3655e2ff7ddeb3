//! Configuration loading and management for the shift pay engine.
//!
//! This module provides the per-year tax tables, either built into the crate
//! or loaded from YAML files, and the server settings read from the environment.
//!
//! # Example
//!
//! ```no_run
//! use shift_pay_engine::config::TaxTableLoader;
//!
//! let tables = TaxTableLoader::load("./config/tax").unwrap();
//! println!("Latest tax year: {}", tables.latest().unwrap().fiscal_year);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::TaxTableLoader;
pub use settings::ServerSettings;
pub use types::{TaxBracket, TaxTables, TaxYearConfig};
