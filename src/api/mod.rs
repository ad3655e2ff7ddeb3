//! HTTP API module for the shift pay engine.
//!
//! This module provides the REST API endpoints for pricing shifts and
//! estimating taxes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EarningsRequest, InvoiceRequest, PricingMatrixRequest, SocialSecurityRequest};
pub use response::{ApiError, HealthResponse};
pub use state::AppState;
