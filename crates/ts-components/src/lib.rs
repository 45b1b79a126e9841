//! ts-components: component library for the electronics/PCM/heat-sink package.
//!
//! Provides models for the pieces the package energy balance is built from:
//! - Finned heat-sink geometry (fin efficiency, effective convective area)
//! - Fan-speed controller (electronics temperature to convective coefficient)
//! - Surge schedules (time-bounded injected power)
//! - Phase-change material with latent-heat flux
//! - Lumped material properties
//!
//! All components are immutable after construction and expose pure functions
//! of their inputs, so they can be evaluated at any trial time or state.
//!
//! # Example
//!
//! ```
//! use ts_components::{FanController, HeatSinkGeometry};
//! use ts_core::units::{m, m2, w_per_mk};
//!
//! let sink = HeatSinkGeometry::new(m2(0.01), m(0.005), m(0.001), m(0.002), w_per_mk(200.0))
//!     .unwrap();
//! let fan = FanController::proportional(10.0, 70.0);
//!
//! let h = fan.convective_coefficient(90.0);
//! let area = sink.effective_area(h);
//! assert!(area > 0.01);
//! ```

pub mod common;
pub mod error;
pub mod fan;
pub mod heat_sink;
pub mod materials;
pub mod phase_change;
pub mod surge;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use fan::FanController;
pub use heat_sink::HeatSinkGeometry;
pub use materials::MaterialProperties;
pub use phase_change::PhaseChangeMaterial;
pub use surge::{SurgeProfile, SurgeSchedule};
