//! Uniform output time grid.

use crate::error::{SimError, SimResult};

/// Relative slack when deciding whether `t_end` is a whole number of steps.
const GRID_EPS: f64 = 1e-9;

/// Output times `0, dt, 2·dt, …` up to and including `t_end`.
///
/// When `t_end` is a whole multiple of `dt` (within rounding) the final point
/// is exactly `t_end`; otherwise the grid stops at the last multiple below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    dt: f64,
    t_end: f64,
    intervals: usize,
}

impl TimeGrid {
    pub fn new(dt: f64, t_end: f64) -> SimResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !(t_end.is_finite() && t_end >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        let ratio = t_end / dt;
        if ratio > u32::MAX as f64 {
            return Err(SimError::InvalidArg {
                what: "t_end / dt is too large",
            });
        }
        let intervals = (ratio + GRID_EPS).floor() as usize;
        Ok(Self {
            dt,
            t_end,
            intervals,
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Number of output points (intervals + 1).
    pub fn len(&self) -> usize {
        self.intervals + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Time of output point `i`. Points past the end clamp to the last one.
    pub fn time_at(&self, i: usize) -> f64 {
        let i = i.min(self.intervals);
        let t = i as f64 * self.dt;
        if i == self.intervals && (t - self.t_end).abs() <= GRID_EPS * self.dt.max(self.t_end) {
            self.t_end
        } else {
            t
        }
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(|i| self.time_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_grid_has_301_points() {
        let grid = TimeGrid::new(0.1, 30.0).unwrap();
        assert_eq!(grid.len(), 301);
        assert_eq!(grid.time_at(0), 0.0);
        assert_eq!(grid.time_at(50), 5.0);
        assert_eq!(grid.time_at(300), 30.0);
        let pts: Vec<f64> = grid.points().collect();
        assert_eq!(pts.len(), 301);
        assert!(pts.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn non_multiple_end_stops_below() {
        let grid = TimeGrid::new(0.4, 1.0).unwrap();
        assert_eq!(grid.len(), 3);
        assert!((grid.time_at(2) - 0.8).abs() < 1e-15);
    }

    #[test]
    fn zero_duration_is_single_point() {
        let grid = TimeGrid::new(0.1, 0.0).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.time_at(0), 0.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(TimeGrid::new(0.0, 1.0).is_err());
        assert!(TimeGrid::new(-0.1, 1.0).is_err());
        assert!(TimeGrid::new(0.1, -1.0).is_err());
        assert!(TimeGrid::new(f64::NAN, 1.0).is_err());
        assert!(TimeGrid::new(1e-12, 1e6).is_err());
    }
}
