//! HTTP request handlers for the compensation engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    apply_loss_of_pay, contract_fee, decompose_with_rates, to_annual_view_with_rates,
};
use crate::error::EngineError;
use crate::statement::{export_annexure, render_text_with_fee};

use super::request::{AnnexureRequest, DecomposeRequest, PayslipRequest};
use super::response::{
    AnnexureResponse, ApiError, ApiErrorResponse, DecomposeResponse, PayslipResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/decompose", post(decompose_handler))
        .route("/annual-view", post(annual_view_handler))
        .route("/annexure", post(annexure_handler))
        .route("/payslip", post(payslip_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /decompose.
///
/// Returns the breakdown with its iteration count, outcome and audit trace.
async fn decompose_handler(
    State(state): State<AppState>,
    payload: Result<Json<DecomposeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing decomposition request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.policy.validate() {
        return error_response(correlation_id, err);
    }
    let (effective_date, rates) = match state.resolve_rates(request.effective_date) {
        Ok(resolved) => resolved,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let result = decompose_with_rates(&request.policy, &rates);
    let infeasible = result.is_infeasible();

    info!(
        correlation_id = %correlation_id,
        annual_ctc = %request.policy.annual_ctc,
        iterations = result.iterations,
        outcome = ?result.outcome,
        gross = %result.breakdown.gross,
        duration_us = start_time.elapsed().as_micros(),
        "Decomposition completed"
    );

    json_response(
        StatusCode::OK,
        DecomposeResponse {
            calculation_id: correlation_id,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            jurisdiction: state.config().metadata().code.clone(),
            effective_date,
            breakdown: result.breakdown,
            iterations: result.iterations,
            outcome: result.outcome,
            infeasible,
            audit_trace: result.audit_trace,
        },
    )
}

/// Handler for POST /annual-view.
async fn annual_view_handler(
    State(state): State<AppState>,
    payload: Result<Json<DecomposeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing annual view request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.policy.validate() {
        return error_response(correlation_id, err);
    }
    let rates = match state.resolve_rates(request.effective_date) {
        Ok((_, rates)) => rates,
        Err(err) => return error_response(correlation_id, err),
    };

    let view = to_annual_view_with_rates(&request.policy, &rates);
    info!(
        correlation_id = %correlation_id,
        annual_gross = %view.annual.gross,
        "Annual view completed"
    );
    json_response(StatusCode::OK, view)
}

/// Handler for POST /annexure.
///
/// Renders the statement and returns it both as text and as a downloadable
/// data URI.
async fn annexure_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnnexureRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing annexure request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if request.name.trim().is_empty() {
        warn!(correlation_id = %correlation_id, "Annexure requested without a name");
        return json_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error("name must not be empty"),
        );
    }
    if let Err(err) = request.policy.validate() {
        return error_response(correlation_id, err);
    }
    let rates = match state.resolve_rates(request.effective_date) {
        Ok((_, rates)) => rates,
        Err(err) => return error_response(correlation_id, err),
    };

    let policy = &request.policy;
    let breakdown = decompose_with_rates(policy, &rates).breakdown;
    let fee = contract_fee(policy.annual_ctc, policy.engagement, &rates);
    let text = render_text_with_fee(&request.name, policy.annual_ctc, &breakdown, fee.as_ref());
    let document = export_annexure(&request.name, &text);

    info!(
        correlation_id = %correlation_id,
        file_name = %document.file_name,
        bytes = text.len(),
        "Annexure rendered"
    );

    json_response(
        StatusCode::OK,
        AnnexureResponse {
            file_name: document.file_name,
            mime_type: document.mime_type,
            data_uri: document.data_uri,
            text,
            contract_fee: fee,
        },
    )
}

/// Handler for POST /payslip.
///
/// Decomposes the policy and prorates the result for loss-of-pay days.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = request.policy.validate() {
        return error_response(correlation_id, err);
    }
    let rates = match state.resolve_rates(request.effective_date) {
        Ok((_, rates)) => rates,
        Err(err) => return error_response(correlation_id, err),
    };

    let decomposition = decompose_with_rates(&request.policy, &rates);
    let step_number = decomposition.audit_trace.steps.len() as u32 + 1;
    let result = match apply_loss_of_pay(&decomposition.breakdown, &request.attendance, step_number)
    {
        Ok(result) => result,
        Err(err) => return error_response(correlation_id, err),
    };

    info!(
        correlation_id = %correlation_id,
        payable_days = %result.payslip.payable_days,
        net_pay = %result.payslip.net_pay,
        "Payslip computed"
    );

    json_response(
        StatusCode::OK,
        PayslipResponse {
            calculation_id: correlation_id,
            breakdown: decomposition.breakdown,
            payslip: result.payslip,
            audit_step: result.audit_step,
        },
    )
}
