//! # Faraja Backend
//!
//! Contains all non-UI logic for the Faraja contribution tracker.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (browser frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (submission lifecycle, validation, statistics, reports)
//!     ↓
//! Storage Layer (JSON blob on disk, report directory)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{ContributionFormService, ContributionService, LogNotifier, TransactionSimulator};
use crate::storage::{FileConnection, ReportDirectory};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub contribution_service: ContributionService<FileConnection>,
    pub form_service: ContributionFormService,
}

impl AppState {
    pub fn new(contribution_service: ContributionService<FileConnection>) -> Self {
        Self {
            contribution_service,
            form_service: ContributionFormService::new(),
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    initialize_backend_with(config, TransactionSimulator::unseeded())
}

/// Initialize the backend with a specific transaction simulator
pub fn initialize_backend_with(config: &AppConfig, simulator: TransactionSimulator) -> Result<AppState> {
    info!("Setting up storage in {}", config.data_directory.display());
    let connection = Arc::new(FileConnection::new(&config.data_directory)?);
    let report_directory = ReportDirectory::new(&config.export_directory);

    info!("Setting up domain model");
    let contribution_service = ContributionService::new(
        connection,
        simulator,
        Arc::new(LogNotifier),
        Arc::new(report_directory),
    );

    Ok(AppState::new(contribution_service))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: HeaderValue, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let mut router = Router::new().nest("/api", io::rest::router());
    if let Some(dir) = static_dir {
        info!("Serving frontend from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(cors).with_state(app_state)
}
