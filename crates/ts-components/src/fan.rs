//! Fan-speed controller expressed as an effective convective coefficient.

/// Default temperature span (K) over which the proportional fan doubles its
/// coefficient relative to the reference temperature.
pub const DEFAULT_SPAN_K: f64 = 20.0;

/// Maps electronics temperature to a convective heat-transfer coefficient.
///
/// The proportional law is an affine proxy for fan-speed modulation and is not
/// clamped: below `reference_c - span_k` it yields a negative coefficient.
#[derive(Debug, Clone, PartialEq)]
pub enum FanController {
    /// `h = base · (1 + (T_e − reference) / span)`
    Proportional {
        base_w_m2k: f64,
        reference_c: f64,
        span_k: f64,
    },
    /// Fan pinned at a constant coefficient.
    Fixed { h_w_m2k: f64 },
}

impl FanController {
    /// Proportional controller with the default span.
    pub fn proportional(base_w_m2k: f64, reference_c: f64) -> Self {
        Self::Proportional {
            base_w_m2k,
            reference_c,
            span_k: DEFAULT_SPAN_K,
        }
    }

    pub fn fixed(h_w_m2k: f64) -> Self {
        Self::Fixed { h_w_m2k }
    }

    /// Convective coefficient (W/m²·K) at electronics temperature `t_electronics_c`.
    pub fn convective_coefficient(&self, t_electronics_c: f64) -> f64 {
        match *self {
            Self::Proportional {
                base_w_m2k,
                reference_c,
                span_k,
            } => base_w_m2k * (1.0 + (t_electronics_c - reference_c) / span_k),
            Self::Fixed { h_w_m2k } => h_w_m2k,
        }
    }

    /// Electronics temperature at which the proportional coefficient changes sign.
    pub fn sign_change_temperature(&self) -> Option<f64> {
        match *self {
            Self::Proportional {
                base_w_m2k,
                reference_c,
                span_k,
            } if base_w_m2k != 0.0 => Some(reference_c - span_k),
            _ => None,
        }
    }
}
