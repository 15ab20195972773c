//! # REST API for Contributions
//!
//! Endpoints for submitting contributions and reading the aggregates.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{
    ContributionBreakdownResponse, ContributionListResponse, SubmitContributionRequest,
    SubmitContributionResponse,
};
use tracing::{error, info, warn};

use crate::domain::SubmissionError;
use crate::io::rest::mappers::ContributionMapper;
use crate::AppState;

/// Create a router for contribution related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contributions", get(list_contributions).post(submit_contribution))
        .route("/contributions/summary", get(get_summary))
        .route("/contributions/breakdown", get(get_breakdown))
        .route("/contributions/validate", post(validate_contribution))
}

/// List all contributions, newest first
pub async fn list_contributions(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/contributions");

    let contributions = ContributionMapper::to_dto_list(state.contribution_service.contributions());
    (StatusCode::OK, Json(ContributionListResponse { contributions }))
}

/// Validate the form and run the contribution through the simulated payment
pub async fn submit_contribution(
    State(state): State<AppState>,
    Json(request): Json<SubmitContributionRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/contributions - name: {}, method: {}",
        request.name, request.payment_method
    );

    let command = match state.form_service.to_submit_command(&request) {
        Ok(command) => command,
        Err(validation) => {
            warn!("Rejected contribution form: {:?}", validation.error_message);
            return (StatusCode::BAD_REQUEST, Json(validation)).into_response();
        }
    };

    match state.contribution_service.submit(command).await {
        Ok(result) => {
            let response = SubmitContributionResponse {
                success: result.success,
                notification: result.notification(),
                contribution: Some(ContributionMapper::to_dto(result.contribution)),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let status = match &e {
                SubmissionError::SubmissionInProgress => StatusCode::CONFLICT,
                SubmissionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                SubmissionError::Storage(_) => {
                    error!("Failed to submit contribution: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let response = SubmitContributionResponse {
                success: false,
                contribution: None,
                notification: e.notification(),
            };
            (status, Json(response)).into_response()
        }
    }
}

/// Validate contribution form input without submitting
pub async fn validate_contribution(
    State(state): State<AppState>,
    Json(request): Json<SubmitContributionRequest>,
) -> impl IntoResponse {
    info!("POST /api/contributions/validate");

    let validation = state
        .form_service
        .validate_form(&request.name, &request.amount, &request.phone_number);
    (StatusCode::OK, Json(validation))
}

pub async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/contributions/summary");

    let service = &state.contribution_service;
    let summary = ContributionMapper::to_summary(
        service.total_contributors(),
        service.total_amount(),
        service.has_contributions(),
    );
    (StatusCode::OK, Json(summary))
}

pub async fn get_breakdown(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/contributions/breakdown");

    let response = ContributionBreakdownResponse {
        payment_methods: state.contribution_service.payment_method_breakdown(),
        recent: state.contribution_service.recent_contributions(),
    };
    (StatusCode::OK, Json(response))
}
