//! Shared application service layer for thermosurge.
//!
//! Centralizes scenario management, compilation of a scenario into a package
//! model, cached run execution, and result queries for the CLI.

pub mod compile;
pub mod error;
pub mod progress;
pub mod query;
pub mod run_service;
pub mod scenario_service;

// Re-export key types for convenience
pub use compile::{CompiledScenario, compile_scenario};
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage, TransientProgress};
pub use query::{RunSummary, extract_series, get_run_summary};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, RunTiming, ScenarioOverrides, SimulationOutput,
    ensure_run, ensure_run_with_progress, list_runs, load_run, runs_dir, simulate,
};
pub use scenario_service::{init_scenario, load_scenario, save_scenario, validate_scenario};
