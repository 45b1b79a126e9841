//! Two-mass electronics/PCM package model.
//!
//! State `x = [T_e, T_p]` (°C): lumped electronics temperature and lumped PCM
//! temperature. The electronics exchange heat with the PCM by conduction and
//! with ambient by fan-driven convection over the finned heat sink, and
//! receive any scheduled surge power. The PCM absorbs latent heat once it is at
//! or above its melting point.

use crate::error::{SimError, SimResult};
use crate::model::{StateVector, TransientModel};
use crate::sim::SimOptions;
use ts_components::{
    FanController, HeatSinkGeometry, MaterialProperties, PhaseChangeMaterial, SurgeProfile,
    SurgeSchedule,
};
use ts_core::units::{j_per_kg, j_per_kgk, kg, kg_per_m3, m, m2, s, w, w_per_mk};

/// Index of the electronics temperature in the state vector.
pub const ELECTRONICS: usize = 0;
/// Index of the PCM temperature in the state vector.
pub const PCM: usize = 1;

/// Immutable configuration of the package.
#[derive(Clone, Debug)]
pub struct PackageConfig {
    pub electronics: MaterialProperties,
    pub pcm: PhaseChangeMaterial,
    pub heat_sink: HeatSinkGeometry,
    pub fan: FanController,
    pub surges: SurgeProfile,
    pub ambient_c: f64,
    /// Time step (s) that scales the electronics/PCM conduction term; runs
    /// should sample at the same interval (see [`PackageModel::sim_options`])
    pub time_step_s: f64,
    pub initial_electronics_c: f64,
    pub initial_pcm_c: f64,
}

impl PackageConfig {
    /// Copper-like electronics on a paraffin-like PCM, 1000 W surge at 5 s
    /// for 10 s, ambient 25 °C.
    pub fn reference() -> SimResult<Self> {
        let ambient_c = 25.0;
        Ok(Self {
            electronics: MaterialProperties::new(
                j_per_kgk(890.0),
                kg_per_m3(8960.0),
                w_per_mk(400.0),
                kg(0.1),
            )?,
            pcm: PhaseChangeMaterial::new(
                j_per_kgk(2000.0),
                kg_per_m3(800.0),
                j_per_kg(200_000.0),
                70.0,
            )?,
            heat_sink: HeatSinkGeometry::new(
                m2(0.01),
                m(0.005),
                m(0.001),
                m(0.002),
                w_per_mk(200.0),
            )?,
            fan: FanController::proportional(10.0, 70.0),
            surges: SurgeProfile::single(SurgeSchedule::new(s(5.0), s(10.0), w(1000.0))?),
            ambient_c,
            time_step_s: 0.1,
            initial_electronics_c: ambient_c,
            initial_pcm_c: ambient_c,
        })
    }
}

/// Named view of the two-component state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackageState {
    pub electronics_c: f64,
    pub pcm_c: f64,
}

impl PackageState {
    pub fn from_vector(x: &StateVector<2>) -> Self {
        Self {
            electronics_c: x[ELECTRONICS],
            pcm_c: x[PCM],
        }
    }

    pub fn to_vector(self) -> StateVector<2> {
        StateVector::<2>::new(self.electronics_c, self.pcm_c)
    }
}

/// Instantaneous heat-flow terms at one `(t, state)` point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatFlows {
    /// Injected surge power (W)
    pub surge_w: f64,
    /// Convective coefficient from the fan controller (W/m²·K)
    pub h_w_m2k: f64,
    /// Effective heat-sink area (m²)
    pub effective_area_m2: f64,
    /// Electronics/PCM conduction term (W)
    pub conduction_w: f64,
    /// Convection term to ambient (W)
    pub convection_w: f64,
    /// PCM latent-heat flux (W)
    pub fusion_w: f64,
}

/// The package energy balance as a transient model.
#[derive(Clone, Debug)]
pub struct PackageModel {
    config: PackageConfig,
}

impl PackageModel {
    /// Validate `config` and build the model.
    pub fn new(config: PackageConfig) -> SimResult<Self> {
        if !config.ambient_c.is_finite() {
            return Err(SimError::InvalidArg {
                what: "ambient temperature must be finite",
            });
        }
        if !(config.time_step_s.is_finite() && config.time_step_s > 0.0) {
            return Err(SimError::InvalidArg {
                what: "time step must be positive",
            });
        }
        if !config.initial_electronics_c.is_finite() || !config.initial_pcm_c.is_finite() {
            return Err(SimError::InvalidArg {
                what: "initial temperatures must be finite",
            });
        }
        if config.initial_pcm_c == 0.0 {
            return Err(SimError::InvalidArg {
                what: "initial PCM temperature must be non-zero",
            });
        }
        if let FanController::Proportional { span_k, .. } = config.fan {
            if !(span_k.is_finite() && span_k != 0.0) {
                return Err(SimError::NonPhysical {
                    what: "fan span must be finite and non-zero",
                });
            }
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Default run options sampled at the conduction time step.
    pub fn sim_options(&self) -> SimOptions {
        SimOptions {
            dt: self.config.time_step_s,
            ..SimOptions::default()
        }
    }

    /// Convective coefficient at the initial state.
    pub fn initial_coefficient(&self) -> f64 {
        self.config
            .fan
            .convective_coefficient(self.config.initial_electronics_c)
    }

    /// Break the energy balance at `(t, x)` into its heat-flow terms.
    pub fn heat_flows(&self, t: f64, x: &StateVector<2>) -> HeatFlows {
        let cfg = &self.config;
        let t_e = x[ELECTRONICS];
        let t_p = x[PCM];

        let surge_w = cfg.surges.injected_power(t);
        let h = cfg.fan.convective_coefficient(t_e);
        let area = cfg.heat_sink.effective_area(h);

        let k_e = cfg.electronics.conductivity().value;
        let m_e = cfg.electronics.mass().value;
        let conduction_w = -k_e * area * (t_e - t_p) / m_e * cfg.time_step_s;
        let convection_w = h * area * (t_e - cfg.ambient_c);
        let fusion_w = cfg.pcm.fusion_flux(t_p);

        HeatFlows {
            surge_w,
            h_w_m2k: h,
            effective_area_m2: area,
            conduction_w,
            convection_w,
            fusion_w,
        }
    }

    /// `[dT_e/dt, dT_p/dt]` at `(t, x)`.
    ///
    /// Fails with [`SimError::DivisionSingularity`] when the PCM temperature is
    /// exactly zero, since it divides the PCM rate.
    pub fn derivative(&self, t: f64, x: &StateVector<2>) -> SimResult<StateVector<2>> {
        let t_p = x[PCM];
        if t_p == 0.0 {
            return Err(SimError::DivisionSingularity {
                what: "PCM temperature is zero",
                time_s: t,
            });
        }

        let q = self.heat_flows(t, x);
        let c_e = self.config.electronics.heat_capacity_j_per_k();
        let cp_p = self.config.pcm.specific_heat().value;

        let dte = (q.conduction_w + q.convection_w + q.surge_w) / c_e;
        let dtp = (q.conduction_w - q.fusion_w) / (cp_p * t_p);
        Ok(StateVector::<2>::new(dte, dtp))
    }
}

impl TransientModel<2> for PackageModel {
    fn initial_state(&self) -> StateVector<2> {
        PackageState {
            electronics_c: self.config.initial_electronics_c,
            pcm_c: self.config.initial_pcm_c,
        }
        .to_vector()
    }

    fn rhs(&self, t: f64, x: &StateVector<2>) -> SimResult<StateVector<2>> {
        self.derivative(t, x)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn derivative_is_finite_and_repeatable(
            t in -5.0_f64..40.0,
            t_e in -40.0_f64..200.0,
            t_p in 1.0_f64..200.0,
        ) {
            let model = PackageModel::new(PackageConfig::reference().unwrap()).unwrap();
            let x = StateVector::<2>::new(t_e, t_p);
            let a = model.derivative(t, &x).unwrap();
            let b = model.derivative(t, &x).unwrap();
            prop_assert!(a.iter().all(|v| v.is_finite()));
            prop_assert_eq!(a, b);
        }
    }
}
