//! Error types for simulation operations.

use thiserror::Error;
use ts_components::ComponentError;

/// Errors encountered during transient simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Division singularity at t = {time_s} s: {what}")]
    DivisionSingularity { what: &'static str, time_s: f64 },

    #[error("Integration diverged at t = {time_s} s: {reason}")]
    IntegrationDivergence { time_s: f64, reason: String },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

impl SimError {
    /// Simulation time at which a runtime failure occurred, if any.
    pub fn time_s(&self) -> Option<f64> {
        match self {
            SimError::DivisionSingularity { time_s, .. }
            | SimError::IntegrationDivergence { time_s, .. } => Some(*time_s),
            _ => None,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
