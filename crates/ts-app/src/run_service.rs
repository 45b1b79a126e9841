//! Run execution and caching service.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use ts_project::schema::Scenario;
use ts_results::{RunManifest, RunStore, SolverStatsRecord, TimeseriesRecord};
use ts_sim::{ELECTRONICS, PCM, SimProgress, SimRecord, SolverStats, run_sim_with_progress};

use crate::compile::{compile_scenario, integrator_name};
use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage, TransientProgress};
use crate::scenario_service;

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: "0.1.0".to_string(),
        }
    }
}

/// Command-line style overrides applied on top of a loaded scenario.
#[derive(Debug, Clone, Default)]
pub struct ScenarioOverrides {
    pub dt_s: Option<f64>,
    pub t_end_s: Option<f64>,
    pub surge_intensity_w: Option<f64>,
}

impl ScenarioOverrides {
    pub fn apply(&self, scenario: &mut Scenario) {
        if let Some(dt_s) = self.dt_s {
            scenario.simulation.dt_s = dt_s;
        }
        if let Some(t_end_s) = self.t_end_s {
            scenario.simulation.t_end_s = t_end_s;
        }
        if let Some(intensity_w) = self.surge_intensity_w {
            scenario.set_surge_intensity(intensity_w);
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario_path: &'a Path,
    pub overrides: ScenarioOverrides,
    pub options: RunOptions,
}

/// Wall-clock breakdown of a run.
#[derive(Debug, Clone, Default)]
pub struct RunTiming {
    pub compile_time_s: f64,
    pub simulate_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTiming,
}

/// Samples and solver counters from an in-memory simulation.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub records: Vec<TimeseriesRecord>,
    pub stats: SolverStats,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: &str,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            Some(message.to_string()),
        ));
    }
}

fn to_records(record: &SimRecord<2>) -> Vec<TimeseriesRecord> {
    record
        .t
        .iter()
        .zip(&record.x)
        .map(|(t, x)| TimeseriesRecord {
            time_s: *t,
            electronics_c: x[ELECTRONICS],
            pcm_c: x[PCM],
        })
        .collect()
}

/// Compile and integrate a scenario without touching the run store.
pub fn simulate(
    scenario: &Scenario,
    progress_cb: Option<&mut dyn FnMut(SimProgress)>,
) -> AppResult<SimulationOutput> {
    let compiled = compile_scenario(scenario)?;
    let record = run_sim_with_progress(&compiled.model, &compiled.options, progress_cb)?;

    Ok(SimulationOutput {
        records: to_records(&record),
        stats: record.stats,
    })
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTiming::default();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingScenario,
        started,
        "Loading scenario",
    );
    let mut scenario = scenario_service::load_scenario(request.scenario_path)?;
    request.overrides.apply(&mut scenario);

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        "Checking run cache",
    );
    let run_id = ts_results::compute_run_id(&scenario, &request.options.solver_version);
    let store = RunStore::for_scenario(request.scenario_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            "Loading cached run",
        );
        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();
        info!(run_id = %run_id, scenario = %scenario.name, "loaded cached run");

        emit_progress(
            &mut progress_cb,
            RunStage::Completed,
            started,
            "Loaded cached run",
        );
        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    emit_progress(
        &mut progress_cb,
        RunStage::Compiling,
        started,
        "Compiling scenario",
    );
    let compile_started = Instant::now();
    let compiled = compile_scenario(&scenario)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    info!(
        run_id = %run_id,
        scenario = %scenario.name,
        dt_s = compiled.options.dt,
        t_end_s = compiled.options.t_end,
        integrator = integrator_name(&scenario.simulation.integrator),
        "starting run"
    );
    emit_progress(
        &mut progress_cb,
        RunStage::Simulating,
        started,
        "Integrating",
    );

    let simulate_started = Instant::now();
    let record = {
        let mut forward = |p: SimProgress| {
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(RunProgressEvent {
                    stage: RunStage::Simulating,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    message: None,
                    transient: Some(TransientProgress {
                        sim_time_s: p.sim_time_s,
                        t_end_s: p.t_end_s,
                        fraction_complete: p.fraction_complete,
                        sample: p.sample,
                        accepted_steps: p.stats.accepted_steps,
                        rejected_steps: p.stats.rejected_steps,
                    }),
                });
            }
        };
        run_sim_with_progress(&compiled.model, &compiled.options, Some(&mut forward))?
    };
    timing.simulate_time_s = simulate_started.elapsed().as_secs_f64();

    let records = to_records(&record);

    let manifest = RunManifest {
        run_id: run_id.clone(),
        scenario_name: scenario.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        integrator: integrator_name(&scenario.simulation.integrator).to_string(),
        solver_version: request.options.solver_version.clone(),
        dt_s: scenario.simulation.dt_s,
        t_end_s: scenario.simulation.t_end_s,
        samples: records.len(),
        solver_stats: SolverStatsRecord {
            rhs_calls: record.stats.rhs_calls,
            accepted_steps: record.stats.accepted_steps,
            rejected_steps: record.stats.rejected_steps,
        },
    };

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        "Saving results",
    );
    let save_started = Instant::now();
    store.save_run(&manifest, &records)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    info!(
        run_id = %run_id,
        samples = manifest.samples,
        accepted_steps = record.stats.accepted_steps,
        rejected_steps = record.stats.rejected_steps,
        total_time_s = timing.total_time_s,
        "run completed"
    );
    emit_progress(&mut progress_cb, RunStage::Completed, started, "Run completed");

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

/// List stored runs for a scenario, most recent first.
pub fn list_runs(scenario_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_scenario(scenario_path)?;
    Ok(store.list_runs()?)
}

/// Load a stored run's manifest and timeseries.
pub fn load_run(
    scenario_path: &Path,
    run_id: &str,
) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let store = RunStore::for_scenario(scenario_path)?;
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;
    Ok((manifest, records))
}

/// Run store location for a scenario, for display.
pub fn runs_dir(scenario_path: &Path) -> AppResult<PathBuf> {
    let store = RunStore::for_scenario(scenario_path)?;
    Ok(store.root_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_selected_fields() {
        let mut scenario = Scenario::reference();
        ScenarioOverrides {
            dt_s: Some(0.5),
            t_end_s: None,
            surge_intensity_w: Some(0.0),
        }
        .apply(&mut scenario);
        assert_eq!(scenario.simulation.dt_s, 0.5);
        assert_eq!(scenario.simulation.t_end_s, 30.0);
        assert_eq!(scenario.surges[0].intensity_w, 0.0);
    }

    #[test]
    fn simulate_reference_in_memory() {
        let out = simulate(&Scenario::reference(), None).unwrap();
        assert_eq!(out.records.len(), 301);
        assert!(out.stats.accepted_steps >= 300);
        assert!(out.records[50].electronics_c > out.records[49].electronics_c);
    }
}
