//! Scenario schema migration.

use crate::ProjectError;
use crate::schema::Scenario;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    while scenario.version < LATEST_VERSION {
        scenario = migrate_one_version(scenario)?;
    }
    Ok(scenario)
}

fn migrate_one_version(scenario: Scenario) -> Result<Scenario, ProjectError> {
    match scenario.version {
        0 => migrate_v0_to_v1(scenario),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files stored zero-intensity placeholder surges; drop them.
fn migrate_v0_to_v1(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    scenario
        .surges
        .retain(|s| !(s.intensity_w == 0.0 && s.duration_s == 0.0));
    scenario.version = 1;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SurgeDef;

    #[test]
    fn migrate_latest_is_noop() {
        let scenario = Scenario::reference();
        let migrated = migrate_to_latest(scenario.clone()).unwrap();
        assert_eq!(migrated, scenario);
    }

    #[test]
    fn migrate_v0_drops_placeholder_surges() {
        let mut scenario = Scenario::reference();
        scenario.version = 0;
        scenario.surges.push(SurgeDef {
            start_s: 0.0,
            duration_s: 0.0,
            intensity_w: 0.0,
        });

        let migrated = migrate_to_latest(scenario).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert_eq!(migrated.surges, Scenario::reference().surges);
    }
}
