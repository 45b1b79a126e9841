//! Error types for the ts-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Project(String),

    #[error("Scenario file already exists: {path}")]
    ScenarioExists { path: PathBuf },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Component error: {0}")]
    Component(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ts-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<ts_project::ProjectError> for AppError {
    fn from(err: ts_project::ProjectError) -> Self {
        match err {
            ts_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<ts_project::ValidationError> for AppError {
    fn from(err: ts_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ts_components::ComponentError> for AppError {
    fn from(err: ts_components::ComponentError) -> Self {
        AppError::Component(err.to_string())
    }
}

impl From<ts_sim::SimError> for AppError {
    fn from(err: ts_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<ts_results::ResultsError> for AppError {
    fn from(err: ts_results::ResultsError) -> Self {
        match err {
            ts_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
