//! Content-based hashing for run IDs.

use sha2::{Digest, Sha256};
use ts_project::schema::Scenario;

/// Run id from the scenario content and solver version.
///
/// The scenario name is left out so renaming a scenario keeps its cache.
pub fn compute_run_id(scenario: &Scenario, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let mut keyed = scenario.clone();
    keyed.name.clear();
    let scenario_json = serde_json::to_string(&keyed).unwrap_or_default();
    hasher.update(scenario_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
