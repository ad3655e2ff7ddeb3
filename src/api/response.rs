//! Response types for the shift pay engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(code: &str, error: &EngineError, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::with_details(code, error.to_string(), details),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::InvalidInterval { .. } => Self::bad_request(
                "INVALID_INTERVAL",
                &error,
                "The shift end_time must be after its start_time",
            ),
            EngineError::InvalidRuleConfiguration { rule, .. } => Self::bad_request(
                "INVALID_RULE_CONFIGURATION",
                &error,
                format!("Fix or deactivate the pricing rule '{}'", rule),
            ),
            EngineError::UnsupportedTaxYear { year } => Self::bad_request(
                "UNSUPPORTED_TAX_YEAR",
                &error,
                format!("Omit the year to use the latest table, or configure a table for {}", year),
            ),
            EngineError::NegativeAmount { field } => Self::bad_request(
                "NEGATIVE_AMOUNT",
                &error,
                format!("Field '{}' must be zero or greater", field),
            ),
            EngineError::InvalidRate { field, .. } => Self::bad_request(
                "INVALID_RATE",
                &error,
                format!("Field '{}' is a fraction, e.g. 0.23 for 23%", field),
            ),
            EngineError::AmountOverflow { field } => Self::bad_request(
                "AMOUNT_OVERFLOW",
                &error,
                format!("Reduce '{}' or the counts and hours it is multiplied by", field),
            ),
            EngineError::UnsupportedPayModel { .. } => Self::bad_request(
                "UNSUPPORTED_PAY_MODEL",
                &error,
                "Only hourly workplaces are priced by pricing rules",
            ),
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the server answers.
    pub status: String,
    /// Fiscal years with a configured tax table.
    pub tax_years: Vec<i32>,
}
