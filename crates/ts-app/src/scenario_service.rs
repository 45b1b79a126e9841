//! Scenario loading, saving, validation and scaffolding.

use std::path::Path;
use ts_project::schema::Scenario;

use crate::error::{AppError, AppResult};

/// Load a scenario from YAML or JSON (by extension), migrated and validated.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::InvalidInput(format!(
            "Scenario file not found: {}",
            path.display()
        )));
    }
    Ok(ts_project::load(path)?)
}

/// Save a scenario, choosing JSON for `.json` paths and YAML otherwise.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => ts_project::save_json(path, scenario)?,
        _ => ts_project::save_yaml(path, scenario)?,
    }
    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    ts_project::validate_scenario(scenario)?;
    Ok(())
}

/// Write the reference scenario to `path`. Refuses to overwrite.
pub fn init_scenario(path: &Path) -> AppResult<Scenario> {
    if path.exists() {
        return Err(AppError::ScenarioExists {
            path: path.to_path_buf(),
        });
    }
    let scenario = Scenario::reference();
    save_scenario(path, &scenario)?;
    Ok(scenario)
}
