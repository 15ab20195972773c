//! # REST API Interface Layer
//!
//! HTTP endpoints for the contribution tracker, all nested under `/api`.
//!
//! - `GET  /contributions`: list records, newest first
//! - `POST /contributions`: validate and submit a contribution
//! - `GET  /contributions/summary`: totals and distinct contributors
//! - `GET  /contributions/breakdown`: payment-method totals and recent series
//! - `POST /contributions/validate`: validation only
//! - `GET  /export/report`: download the text report
//! - `POST /export/to-path`: write the report into the export directory

use axum::Router;

use crate::AppState;

pub mod contribution_apis;
pub mod export_apis;
pub mod mappers;

/// Router for everything under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(contribution_apis::router())
        .nest("/export", export_apis::router())
}
