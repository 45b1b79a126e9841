//! Simulation runner and result recording.

use crate::dopri::{DormandPrince, SolverStats};
use crate::error::{SimError, SimResult};
use crate::grid::TimeGrid;
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::{StateVector, TransientModel};
use tracing::debug;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Adaptive Dormand–Prince 5(4) with error control (default).
    #[default]
    DormandPrince,
    /// 4th-order Runge-Kutta, `substeps` fixed steps per output interval.
    RK4,
    /// Forward Euler (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Output sampling interval (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Integrator type (default: Dormand–Prince)
    pub integrator: IntegratorType,
    /// Relative tolerance (adaptive only)
    pub rtol: f64,
    /// Absolute tolerance (adaptive only)
    pub atol: f64,
    /// Budget of attempted steps over the whole run (safety limit)
    pub max_steps: usize,
    /// Fixed steps per output interval (fixed-step integrators only)
    pub substeps: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 0.1,
            t_end: 30.0,
            integrator: IntegratorType::default(),
            rtol: 1e-6,
            atol: 1e-8,
            max_steps: 100_000,
            substeps: 10,
        }
    }
}

impl SimOptions {
    fn dormand_prince(&self) -> DormandPrince {
        DormandPrince {
            rtol: self.rtol,
            atol: self.atol,
            max_steps: self.max_steps,
            ..DormandPrince::default()
        }
    }
}

/// Record of simulation results, one entry per output grid point.
#[derive(Clone, Debug)]
pub struct SimRecord<const N: usize> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<StateVector<N>>,
    pub stats: SolverStats,
}

impl<const N: usize> SimRecord<N> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Trajectory of one state component.
    pub fn component(&self, index: usize) -> Vec<f64> {
        self.x.iter().map(|x| x[index]).collect()
    }
}

/// Progress report emitted after each recorded sample.
#[derive(Clone, Debug, Default)]
pub struct SimProgress {
    pub sim_time_s: f64,
    pub t_end_s: f64,
    pub fraction_complete: f64,
    pub sample: usize,
    pub samples: usize,
    pub stats: SolverStats,
}

/// Run a transient simulation, recording the state on the uniform output grid.
///
/// `opts.dt` only sets the output grid. Models with their own time-step
/// parameter, such as [`crate::PackageModel`], do not read it; build options
/// with [`crate::PackageModel::sim_options`] to keep the two equal.
pub fn run_sim<const N: usize, M: TransientModel<N>>(
    model: &M,
    opts: &SimOptions,
) -> SimResult<SimRecord<N>> {
    run_sim_with_progress(model, opts, None)
}

/// Run a transient simulation and stream progress after every sample.
pub fn run_sim_with_progress<const N: usize, M: TransientModel<N>>(
    model: &M,
    opts: &SimOptions,
    mut progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<SimRecord<N>> {
    let grid = TimeGrid::new(opts.dt, opts.t_end)?;
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.substeps == 0 {
        return Err(SimError::InvalidArg {
            what: "substeps must be positive",
        });
    }
    let solver = opts.dormand_prince();
    solver.validate()?;

    let mut x = model.initial_state();
    check_state(&x, 0.0)?;

    let mut stats = SolverStats::default();
    let mut t_record = Vec::with_capacity(grid.len());
    let mut x_record = Vec::with_capacity(grid.len());
    t_record.push(0.0);
    x_record.push(x);

    // Step-size guess carried between output intervals
    let mut h = grid.dt();

    for i in 1..grid.len() {
        let t0 = grid.time_at(i - 1);
        let t1 = grid.time_at(i);

        x = match opts.integrator {
            IntegratorType::DormandPrince => {
                solver.advance(model, t0, &x, t1, &mut h, &mut stats)?
            }
            IntegratorType::RK4 => fixed_interval(&RK4, model, t0, &x, t1, opts, &mut stats)?,
            IntegratorType::ForwardEuler => {
                fixed_interval(&ForwardEuler, model, t0, &x, t1, opts, &mut stats)?
            }
        };
        check_state(&x, t1)?;

        debug!(
            sample = i,
            t = t1,
            accepted = stats.accepted_steps,
            rejected = stats.rejected_steps,
            "recorded sample"
        );

        t_record.push(t1);
        x_record.push(x);

        if let Some(cb) = progress.as_deref_mut() {
            cb(SimProgress {
                sim_time_s: t1,
                t_end_s: grid.t_end(),
                fraction_complete: if grid.t_end() > 0.0 {
                    (t1 / grid.t_end()).min(1.0)
                } else {
                    1.0
                },
                sample: i,
                samples: grid.len(),
                stats,
            });
        }
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
        stats,
    })
}

/// Integrate one output interval with `opts.substeps` equal fixed steps.
fn fixed_interval<I: Integrator, const N: usize, M: TransientModel<N>>(
    integrator: &I,
    model: &M,
    t0: f64,
    x0: &StateVector<N>,
    t1: f64,
    opts: &SimOptions,
    stats: &mut SolverStats,
) -> SimResult<StateVector<N>> {
    let h = (t1 - t0) / opts.substeps as f64;
    let mut x = *x0;
    for k in 0..opts.substeps {
        let t = t0 + k as f64 * h;
        if stats.attempted_steps() >= opts.max_steps {
            return Err(SimError::IntegrationDivergence {
                time_s: t,
                reason: format!("step budget of {} exhausted", opts.max_steps),
            });
        }
        x = integrator.step(model, t, &x, h)?;
        stats.accepted_steps += 1;
        stats.rhs_calls += I::STAGES;
    }
    Ok(x)
}

fn check_state<const N: usize>(x: &StateVector<N>, time_s: f64) -> SimResult<()> {
    if x.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SimError::IntegrationDivergence {
            time_s,
            reason: "state became non-finite".to_string(),
        })
    }
}
