//! Application state for the shift pay engine API.

use std::sync::Arc;

use crate::config::TaxTables;

/// Shared application state.
///
/// Holds the tax tables loaded at startup; everything else a request needs
/// arrives in its body.
#[derive(Clone)]
pub struct AppState {
    tax_tables: Arc<TaxTables>,
}

impl AppState {
    /// Creates a new application state with the given tax tables.
    pub fn new(tax_tables: TaxTables) -> Self {
        Self {
            tax_tables: Arc::new(tax_tables),
        }
    }

    /// Returns the tax tables.
    pub fn tax_tables(&self) -> &TaxTables {
        &self.tax_tables
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TaxTables::builtin())
    }
}
