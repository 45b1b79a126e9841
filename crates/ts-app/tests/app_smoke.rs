//! Smoke test for the ts-app service layer: scaffold, run, cache, query.

use std::path::PathBuf;
use ts_app::{
    AppError, RunOptions, RunRequest, RunStage, ScenarioOverrides, ensure_run,
    ensure_run_with_progress, get_run_summary, init_scenario, list_runs, load_run,
    load_scenario,
};

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn init_run_and_cache() {
    let dir = fresh_dir("ts_app_smoke_cache");
    let path = dir.join("surge.yaml");

    let scenario = init_scenario(&path).unwrap();
    assert_eq!(load_scenario(&path).unwrap(), scenario);
    assert!(matches!(
        init_scenario(&path),
        Err(AppError::ScenarioExists { .. })
    ));

    let request = RunRequest {
        scenario_path: &path,
        overrides: ScenarioOverrides::default(),
        options: RunOptions::default(),
    };

    let first = ensure_run(&request).unwrap();
    assert!(!first.loaded_from_cache);
    assert_eq!(first.manifest.samples, 301);
    assert_eq!(first.manifest.integrator, "DormandPrince");
    assert!(first.manifest.solver_stats.accepted_steps >= 300);

    let second = ensure_run(&request).unwrap();
    assert!(second.loaded_from_cache);
    assert_eq!(second.run_id, first.run_id);

    let (manifest, records) = load_run(&path, &first.run_id).unwrap();
    assert_eq!(manifest, first.manifest);
    assert_eq!(records.len(), 301);

    let summary = get_run_summary(&records).unwrap();
    assert_eq!(summary.time_range, (0.0, 30.0));
    assert!(summary.peak_electronics_c > 50.0);
    assert!(summary.peak_electronics_time_s > 5.0 && summary.peak_electronics_time_s <= 15.0 + 1e-9);

    let runs = list_runs(&path).unwrap();
    assert_eq!(runs.len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn overrides_change_run_identity() {
    let dir = fresh_dir("ts_app_smoke_overrides");
    let path = dir.join("surge.yaml");
    init_scenario(&path).unwrap();

    let base = ensure_run(&RunRequest {
        scenario_path: &path,
        overrides: ScenarioOverrides::default(),
        options: RunOptions::default(),
    })
    .unwrap();

    let quiet = ensure_run(&RunRequest {
        scenario_path: &path,
        overrides: ScenarioOverrides {
            surge_intensity_w: Some(0.0),
            t_end_s: Some(10.0),
            ..ScenarioOverrides::default()
        },
        options: RunOptions::default(),
    })
    .unwrap();

    assert_ne!(base.run_id, quiet.run_id);
    assert!(!quiet.loaded_from_cache);
    assert_eq!(quiet.manifest.samples, 101);

    let (_, records) = load_run(&path, &quiet.run_id).unwrap();
    assert!(records.iter().all(|r| r.electronics_c <= 25.0));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn progress_reports_every_stage() {
    let dir = fresh_dir("ts_app_smoke_progress");
    let path = dir.join("surge.yaml");
    init_scenario(&path).unwrap();

    let mut stages = Vec::new();
    let mut transient_samples = 0;
    let mut cb = |event: ts_app::RunProgressEvent| {
        if event.transient.is_some() {
            transient_samples += 1;
        }
        stages.push(event.stage);
    };

    ensure_run_with_progress(
        &RunRequest {
            scenario_path: &path,
            overrides: ScenarioOverrides {
                t_end_s: Some(1.0),
                ..ScenarioOverrides::default()
            },
            options: RunOptions {
                use_cache: false,
                ..RunOptions::default()
            },
        },
        Some(&mut cb),
    )
    .unwrap();

    assert_eq!(transient_samples, 10);
    assert_eq!(stages.first(), Some(&RunStage::LoadingScenario));
    assert_eq!(stages.last(), Some(&RunStage::Completed));
    assert!(stages.contains(&RunStage::SavingResults));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_scenario_is_reported() {
    let dir = fresh_dir("ts_app_smoke_missing");
    let err = load_scenario(&dir.join("absent.yaml")).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    let _ = std::fs::remove_dir_all(&dir);
}
