//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub integrator: String,
    pub solver_version: String,
    pub dt_s: f64,
    pub t_end_s: f64,
    pub samples: usize,
    #[serde(default)]
    pub solver_stats: SolverStatsRecord,
}

/// Step counters reported by the integrator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolverStatsRecord {
    pub rhs_calls: usize,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
}

/// One output sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub time_s: f64,
    pub electronics_c: f64,
    pub pcm_c: f64,
}
