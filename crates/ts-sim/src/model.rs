//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;
use nalgebra::SVector;

/// Fixed-size state vector used by all integrators.
pub type StateVector<const N: usize> = SVector<f64, N>;

/// Trait for transient (dynamic) system models with `N` state variables.
///
/// The right-hand side must be a pure function of `(t, x)` and the model's
/// immutable configuration. Adaptive integrators evaluate trial stages at
/// times and states that never appear in the output, and may revisit or step
/// back in `t` after a rejected step.
pub trait TransientModel<const N: usize> {
    /// Return the initial state at t=0.
    fn initial_state(&self) -> StateVector<N>;

    /// Compute state derivative dxdt = f(t, x).
    fn rhs(&self, t: f64, x: &StateVector<N>) -> SimResult<StateVector<N>>;
}
