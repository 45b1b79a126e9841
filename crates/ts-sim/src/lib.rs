//! Transient simulation framework for the electronics/PCM package.
//!
//! Provides:
//! - `TransientModel` trait for pure right-hand-side models
//! - Adaptive Dormand–Prince 5(4) integrator with a step budget
//! - Fixed-step RK4 and forward Euler integrators
//! - Uniform output grid and run driver with progress reporting
//! - The two-mass package model (electronics + PCM + finned heat sink)

pub mod dopri;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod model;
pub mod package;
pub mod sim;

// Re-exports for public API
pub use dopri::{DormandPrince, SolverStats};
pub use error::{SimError, SimResult};
pub use grid::TimeGrid;
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::{StateVector, TransientModel};
pub use package::{ELECTRONICS, HeatFlows, PCM, PackageConfig, PackageModel, PackageState};
pub use sim::{IntegratorType, SimOptions, SimProgress, SimRecord, run_sim, run_sim_with_progress};
