//! Adaptive Dormand–Prince 5(4) integrator.
//!
//! An explicit embedded Runge–Kutta pair: the 5th-order solution advances the
//! state, the difference to the embedded 4th-order solution estimates the
//! local error. Step size is adapted to keep the scaled RMS error at or below
//! one. Steps are truncated so that every requested output time is landed on
//! exactly; no interpolation is involved in the reported values.

use crate::error::{SimError, SimResult};
use crate::model::{StateVector, TransientModel};
use tracing::debug;

// Butcher tableau
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights (b2 = b7 = 0)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// b - b* (error weights)
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Step counters accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub rhs_calls: usize,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
}

impl SolverStats {
    pub fn attempted_steps(&self) -> usize {
        self.accepted_steps + self.rejected_steps
    }
}

/// Dormand–Prince 5(4) step control settings.
#[derive(Clone, Debug)]
pub struct DormandPrince {
    /// Relative tolerance on each state component
    pub rtol: f64,
    /// Absolute tolerance on each state component
    pub atol: f64,
    /// Budget of attempted (accepted + rejected) steps for a whole run
    pub max_steps: usize,
    /// Smallest step (s) tried before giving up
    pub min_step: f64,
}

impl Default for DormandPrince {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-8,
            max_steps: 100_000,
            min_step: 1e-12,
        }
    }
}

impl DormandPrince {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.rtol.is_finite() && self.rtol > 0.0) {
            return Err(SimError::InvalidArg {
                what: "rtol must be positive",
            });
        }
        if !(self.atol.is_finite() && self.atol >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "atol must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if !(self.min_step.is_finite() && self.min_step > 0.0) {
            return Err(SimError::InvalidArg {
                what: "min_step must be positive",
            });
        }
        Ok(())
    }

    /// Integrate from `(t0, x0)` to exactly `t1`.
    ///
    /// `h` carries the step-size guess between calls and is updated in place.
    /// `stats` accumulates across calls; the step budget applies to the total.
    pub fn advance<const N: usize, M: TransientModel<N>>(
        &self,
        model: &M,
        t0: f64,
        x0: &StateVector<N>,
        t1: f64,
        h: &mut f64,
        stats: &mut SolverStats,
    ) -> SimResult<StateVector<N>> {
        let mut t = t0;
        let mut x = *x0;
        if !(h.is_finite() && *h > 0.0) {
            *h = t1 - t0;
        }

        while t < t1 {
            if stats.attempted_steps() >= self.max_steps {
                return Err(SimError::IntegrationDivergence {
                    time_s: t,
                    reason: format!("step budget of {} exhausted", self.max_steps),
                });
            }

            let remaining = t1 - t;
            let last = *h >= remaining;
            let h_try = if last { remaining } else { *h };
            if !last && h_try < self.min_step {
                return Err(SimError::IntegrationDivergence {
                    time_s: t,
                    reason: format!(
                        "step size {:.3e} s fell below minimum {:.3e} s",
                        h_try, self.min_step
                    ),
                });
            }

            // The landing step evaluates its end stages at exactly t1.
            let t_end = if last { t1 } else { t + h_try };
            let (y, err_norm) = self.try_step(model, t, &x, h_try, t_end, stats)?;

            if err_norm <= 1.0 {
                stats.accepted_steps += 1;
                let factor = if err_norm == 0.0 {
                    MAX_FACTOR
                } else {
                    (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
                };
                *h = if last {
                    h.max(h_try * factor)
                } else {
                    h_try * factor
                };
                t = t_end;
                x = y;
            } else {
                stats.rejected_steps += 1;
                let factor = if err_norm.is_finite() {
                    (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, 1.0)
                } else {
                    MIN_FACTOR
                };
                *h = h_try * factor;
                debug!(t, h_try, err_norm, "step rejected");
            }
        }

        Ok(x)
    }

    /// One embedded step of size `h` from `(t, x)`; returns the 5th-order
    /// solution and its scaled RMS error.
    fn try_step<const N: usize, M: TransientModel<N>>(
        &self,
        model: &M,
        t: f64,
        x: &StateVector<N>,
        h: f64,
        t_end: f64,
        stats: &mut SolverStats,
    ) -> SimResult<(StateVector<N>, f64)> {
        let k1 = model.rhs(t, x)?;
        let k2 = model.rhs(t + C2 * h, &(x + k1 * (h * A21)))?;
        let k3 = model.rhs(t + C3 * h, &(x + (k1 * A31 + k2 * A32) * h))?;
        let k4 = model.rhs(t + C4 * h, &(x + (k1 * A41 + k2 * A42 + k3 * A43) * h))?;
        let k5 = model.rhs(
            t + C5 * h,
            &(x + (k1 * A51 + k2 * A52 + k3 * A53 + k4 * A54) * h),
        )?;
        let k6 = model.rhs(
            t_end,
            &(x + (k1 * A61 + k2 * A62 + k3 * A63 + k4 * A64 + k5 * A65) * h),
        )?;

        let y = x + (k1 * B1 + k3 * B3 + k4 * B4 + k5 * B5 + k6 * B6) * h;
        let k7 = model.rhs(t_end, &y)?;
        stats.rhs_calls += 7;

        let err = (k1 * E1 + k3 * E3 + k4 * E4 + k5 * E5 + k6 * E6 + k7 * E7) * h;

        let mut sum_sq = 0.0;
        for i in 0..N {
            let scale = self.atol + self.rtol * x[i].abs().max(y[i].abs());
            let e = err[i] / scale;
            sum_sq += e * e;
        }
        let err_norm = if N == 0 {
            0.0
        } else {
            (sum_sq / N as f64).sqrt()
        };
        // NaN compares false against the acceptance bound
        let err_norm = if err_norm.is_nan() {
            f64::INFINITY
        } else {
            err_norm
        };

        Ok((y, err_norm))
    }
}
