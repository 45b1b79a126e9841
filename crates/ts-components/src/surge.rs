//! Time-bounded power surges injected into the electronics.

use crate::common::check_non_negative;
use crate::error::ComponentResult;
use ts_core::units::{Power, Time};

/// A single surge window: `intensity` watts over `[start, start + duration)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurgeSchedule {
    start: Time,
    duration: Time,
    intensity: Power,
}

impl SurgeSchedule {
    pub fn new(start: Time, duration: Time, intensity: Power) -> ComponentResult<Self> {
        check_non_negative(start.value, "surge start must be non-negative")?;
        check_non_negative(duration.value, "surge duration must be non-negative")?;
        check_non_negative(intensity.value, "surge intensity must be non-negative")?;
        Ok(Self {
            start,
            duration,
            intensity,
        })
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn duration(&self) -> Time {
        self.duration
    }

    pub fn intensity(&self) -> Power {
        self.intensity
    }

    /// End of the window (exclusive), in seconds.
    pub fn end_s(&self) -> f64 {
        self.start.value + self.duration.value
    }

    /// Injected power (W) at simulation time `t_s`.
    pub fn injected_power(&self, t_s: f64) -> f64 {
        if self.start.value <= t_s && t_s < self.end_s() {
            self.intensity.value
        } else {
            0.0
        }
    }
}

/// Any number of surge windows; overlapping windows add.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurgeProfile {
    windows: Vec<SurgeSchedule>,
}

impl SurgeProfile {
    pub fn new(windows: Vec<SurgeSchedule>) -> Self {
        Self { windows }
    }

    pub fn single(window: SurgeSchedule) -> Self {
        Self {
            windows: vec![window],
        }
    }

    pub fn windows(&self) -> &[SurgeSchedule] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Total injected power (W) at simulation time `t_s`.
    pub fn injected_power(&self, t_s: f64) -> f64 {
        self.windows.iter().map(|w| w.injected_power(t_s)).sum()
    }
}
