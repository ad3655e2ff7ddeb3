//! HTTP request handlers for the shift pay engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_invoice, calculate_shift_earnings, calculate_tax, estimate_quarterly_social_security,
    pricing_matrix,
};
use crate::error::EngineError;
use crate::models::TaxInput;

use super::request::{EarningsRequest, InvoiceRequest, PricingMatrixRequest, SocialSecurityRequest};
use super::response::{ApiError, ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/earnings/compute", post(compute_earnings_handler))
        .route("/pricing/matrix", post(pricing_matrix_handler))
        .route("/tax/estimate", post(tax_estimate_handler))
        .route("/tax/social-security", post(social_security_handler))
        .route("/invoices/compute", post(invoice_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        &HealthResponse {
            status: "ok".to_string(),
            tax_years: state.tax_tables().years(),
        },
    )
}

/// Handler for POST /earnings/compute.
///
/// Validates the pricing rules, then prices the shift segment by segment.
async fn compute_earnings_handler(
    payload: Result<Json<EarningsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing earnings request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = request
        .into_domain()
        .and_then(|(shift, workplace, rules)| calculate_shift_earnings(&shift, &workplace, &rules));

    match result {
        Ok(earnings) => {
            info!(
                correlation_id = %correlation_id,
                segments = earnings.segments.len(),
                total_cents = earnings.total_cents,
                warnings = earnings.warnings.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Earnings calculated"
            );
            json_response(StatusCode::OK, &earnings)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /pricing/matrix.
async fn pricing_matrix_handler(
    payload: Result<Json<PricingMatrixRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pricing matrix request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let base_rate_cents = request.base_rate_cents;
    if base_rate_cents < 0 {
        return error_response(
            correlation_id,
            EngineError::NegativeAmount {
                field: "base_rate_cents".to_string(),
            },
        );
    }

    let result = request
        .validated_rules()
        .and_then(|rules| Ok((pricing_matrix(&rules, base_rate_cents)?, rules.len())));

    match result {
        Ok((matrix, rules)) => {
            info!(
                correlation_id = %correlation_id,
                rules,
                coverage_percent = matrix.coverage_percent,
                "Pricing matrix built"
            );
            json_response(StatusCode::OK, &matrix)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /tax/estimate.
///
/// An omitted year selects the latest configured table; an unknown year is rejected.
async fn tax_estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax estimate request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = state
        .tax_tables()
        .resolve(input.year)
        .and_then(|config| calculate_tax(&input, config));

    match result {
        Ok(estimate) => {
            info!(
                correlation_id = %correlation_id,
                tax_year = estimate.tax_year,
                irs_amount = estimate.irs_amount,
                net_income = estimate.net_income,
                "Tax estimate calculated"
            );
            json_response(StatusCode::OK, &estimate)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /tax/social-security.
async fn social_security_handler(
    State(state): State<AppState>,
    payload: Result<Json<SocialSecurityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing social security request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = state
        .tax_tables()
        .resolve(request.year)
        .and_then(|config| {
            estimate_quarterly_social_security(config, request.quarterly_gross_cents)
        });

    match result {
        Ok(estimate) => json_response(StatusCode::OK, &estimate),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /invoices/compute.
async fn invoice_handler(
    State(state): State<AppState>,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing invoice request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = state.tax_tables().resolve(request.year).and_then(|config| {
        calculate_invoice(
            request.gross_cents,
            request.withholding_rate.unwrap_or(config.default_withholding_rate),
            request.vat_rate.unwrap_or(Decimal::ZERO),
        )
    });

    match result {
        Ok(invoice) => json_response(StatusCode::OK, &invoice),
        Err(err) => error_response(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}
