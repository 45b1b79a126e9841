//! Finned heat-sink geometry with convective-coefficient dependent fin efficiency.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use ts_core::units::{Area, Length, ThermalConductivity};

/// Straight rectangular fins standing on a flat base.
///
/// The base carries as many fins as fully fit at a pitch of
/// `fin_spacing + fin_thickness`; partial fins are never counted, which keeps
/// the area estimate conservative.
#[derive(Debug, Clone)]
pub struct HeatSinkGeometry {
    base_area: Area,
    fin_height: Length,
    fin_thickness: Length,
    fin_spacing: Length,
    /// Conductivity of the heat-sink (and fin) material
    conductivity: ThermalConductivity,
}

impl HeatSinkGeometry {
    /// Create a heat sink, rejecting geometry that would put a zero or negative
    /// value into a divisor of the fin equations.
    pub fn new(
        base_area: Area,
        fin_height: Length,
        fin_thickness: Length,
        fin_spacing: Length,
        conductivity: ThermalConductivity,
    ) -> ComponentResult<Self> {
        let finite = |v: f64, what| {
            check_finite(v, what).map_err(|_| ComponentError::InvalidGeometry { what })
        };
        finite(base_area.value, "base_area must be finite")?;
        finite(fin_height.value, "fin_height must be finite")?;
        finite(fin_thickness.value, "fin_thickness must be finite")?;
        finite(fin_spacing.value, "fin_spacing must be finite")?;
        finite(conductivity.value, "conductivity must be finite")?;

        if base_area.value < 0.0 {
            return Err(ComponentError::InvalidGeometry {
                what: "base_area must be non-negative",
            });
        }
        if fin_height.value <= 0.0 {
            return Err(ComponentError::InvalidGeometry {
                what: "fin_height must be positive",
            });
        }
        if fin_thickness.value <= 0.0 {
            return Err(ComponentError::InvalidGeometry {
                what: "fin_thickness must be positive",
            });
        }
        if fin_spacing.value + fin_thickness.value <= 0.0 {
            return Err(ComponentError::InvalidGeometry {
                what: "fin_spacing + fin_thickness must be positive",
            });
        }
        if conductivity.value <= 0.0 {
            return Err(ComponentError::InvalidGeometry {
                what: "conductivity must be positive",
            });
        }

        Ok(Self {
            base_area,
            fin_height,
            fin_thickness,
            fin_spacing,
            conductivity,
        })
    }

    pub fn base_area(&self) -> Area {
        self.base_area
    }

    pub fn fin_height(&self) -> Length {
        self.fin_height
    }

    pub fn fin_thickness(&self) -> Length {
        self.fin_thickness
    }

    pub fn fin_spacing(&self) -> Length {
        self.fin_spacing
    }

    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity
    }

    /// Wetted perimeter of a single fin (m).
    pub fn fin_perimeter(&self) -> f64 {
        2.0 * (self.fin_height.value + self.fin_thickness.value)
    }

    /// Number of whole fins that fit on the base.
    pub fn fin_count(&self) -> usize {
        let pitch = self.fin_spacing.value + self.fin_thickness.value;
        (self.base_area.value / pitch).floor() as usize
    }

    /// Fin efficiency for convective coefficient `h_w_m2k` and fin conductivity
    /// `k_fin_w_mk`.
    ///
    /// The fin parameter is built from `|h|`, so a negative coefficient from the
    /// fan controller still yields a finite efficiency. At `theta = 0` the
    /// expression is 0/0 and the efficiency is taken as 1.
    pub fn fin_efficiency(&self, h_w_m2k: f64, k_fin_w_mk: f64) -> f64 {
        let m = (h_w_m2k.abs() * k_fin_w_mk / (self.conductivity.value * self.fin_thickness.value))
            .sqrt();
        let theta = m * self.fin_height.value;
        if theta == 0.0 {
            return 1.0;
        }
        // 1 - exp(-2θ) without cancellation for small θ
        -(-2.0 * theta).exp_m1() / theta
    }

    /// Total effective convective area (m²) at convective coefficient `h_w_m2k`.
    pub fn effective_area(&self, h_w_m2k: f64) -> f64 {
        let eta = self.fin_efficiency(h_w_m2k, self.conductivity.value);
        self.base_area.value + self.fin_count() as f64 * eta * self.fin_perimeter()
    }
}
