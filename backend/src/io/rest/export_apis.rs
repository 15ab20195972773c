//! # REST API for Report Export
//!
//! Endpoints for downloading the contribution report or writing it into the
//! export directory.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{ExportToPathResponse, Notification};
use tracing::{error, info};

use crate::domain::{REPORT_DOWNLOADED_MESSAGE, REPORT_FAILED_MESSAGE};
use crate::AppState;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/report", get(download_report))
        .route("/to-path", post(export_to_path))
}

/// Download the report as a plain-text attachment
pub async fn download_report(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export/report");

    let report = state.contribution_service.build_report();
    info!("Built report with {} contributions", report.contribution_count);

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.filename),
        ),
    ];
    (StatusCode::OK, headers, report.content)
}

/// Write the report into the configured export directory
pub async fn export_to_path(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/export/to-path");

    match state.contribution_service.export_report() {
        Ok(result) => {
            let response = ExportToPathResponse {
                success: true,
                message: format!("Report saved to {}", result.location),
                file_path: Some(result.location),
                contribution_count: result.report.contribution_count,
                notification: Notification::success(REPORT_DOWNLOADED_MESSAGE),
            };
            (StatusCode::OK, Json(response))
        }
        Err(e) => {
            error!("Failed to export report: {:#}", e);
            let response = ExportToPathResponse {
                success: false,
                message: format!("Failed to export report: {}", e),
                file_path: None,
                contribution_count: 0,
                notification: Notification::error(REPORT_FAILED_MESSAGE),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
        }
    }
}
