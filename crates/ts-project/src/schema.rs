//! Scenario schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub electronics: ElectronicsDef,
    pub pcm: PcmDef,
    pub heat_sink: HeatSinkDef,
    pub fan: FanDef,
    #[serde(default)]
    pub surges: Vec<SurgeDef>,
    pub ambient_c: f64,
    #[serde(default)]
    pub initial: InitialDef,
    pub simulation: SimulationDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElectronicsDef {
    pub specific_heat_j_per_kgk: f64,
    pub density_kg_per_m3: f64,
    pub conductivity_w_per_mk: f64,
    pub mass_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PcmDef {
    pub specific_heat_j_per_kgk: f64,
    pub density_kg_per_m3: f64,
    pub latent_heat_j_per_kg: f64,
    pub melting_point_c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatSinkDef {
    pub base_area_m2: f64,
    pub fin_height_m: f64,
    pub fin_thickness_m: f64,
    pub fin_spacing_m: f64,
    pub conductivity_w_per_mk: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum FanDef {
    /// `h = base · (1 + (T_e − reference) / span)`; the reference defaults to
    /// the PCM melting point.
    Proportional {
        base_w_m2k: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference_c: Option<f64>,
        #[serde(default = "default_fan_span")]
        span_c: f64,
    },
    Fixed {
        h_w_m2k: f64,
    },
}

fn default_fan_span() -> f64 {
    20.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurgeDef {
    pub start_s: f64,
    pub duration_s: f64,
    pub intensity_w: f64,
}

/// Initial temperatures; missing values start at ambient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InitialDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electronics_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcm_c: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    pub dt_s: f64,
    pub t_end_s: f64,
    #[serde(default)]
    pub integrator: IntegratorDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum IntegratorDef {
    DormandPrince {
        #[serde(default = "default_rtol")]
        rtol: f64,
        #[serde(default = "default_atol")]
        atol: f64,
        #[serde(default = "default_max_steps")]
        max_steps: usize,
    },
    Rk4 {
        #[serde(default = "default_substeps")]
        substeps: usize,
    },
    ForwardEuler {
        #[serde(default = "default_substeps")]
        substeps: usize,
    },
}

impl Default for IntegratorDef {
    fn default() -> Self {
        Self::DormandPrince {
            rtol: default_rtol(),
            atol: default_atol(),
            max_steps: default_max_steps(),
        }
    }
}

fn default_rtol() -> f64 {
    1e-6
}

fn default_atol() -> f64 {
    1e-8
}

fn default_max_steps() -> usize {
    100_000
}

fn default_substeps() -> usize {
    10
}

impl Scenario {
    /// Electronics package with a paraffin PCM buffer and a 1000 W surge at
    /// 5 s for 10 s, sampled every 0.1 s for 30 s.
    pub fn reference() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: "Reference surge".to_string(),
            electronics: ElectronicsDef {
                specific_heat_j_per_kgk: 890.0,
                density_kg_per_m3: 8960.0,
                conductivity_w_per_mk: 400.0,
                mass_kg: 0.1,
            },
            pcm: PcmDef {
                specific_heat_j_per_kgk: 2000.0,
                density_kg_per_m3: 800.0,
                latent_heat_j_per_kg: 200_000.0,
                melting_point_c: 70.0,
            },
            heat_sink: HeatSinkDef {
                base_area_m2: 0.01,
                fin_height_m: 0.005,
                fin_thickness_m: 0.001,
                fin_spacing_m: 0.002,
                conductivity_w_per_mk: 200.0,
            },
            fan: FanDef::Proportional {
                base_w_m2k: 10.0,
                reference_c: None,
                span_c: default_fan_span(),
            },
            surges: vec![SurgeDef {
                start_s: 5.0,
                duration_s: 10.0,
                intensity_w: 1000.0,
            }],
            ambient_c: 25.0,
            initial: InitialDef::default(),
            simulation: SimulationDef {
                dt_s: 0.1,
                t_end_s: 30.0,
                integrator: IntegratorDef::default(),
            },
        }
    }

    pub fn initial_electronics_c(&self) -> f64 {
        self.initial.electronics_c.unwrap_or(self.ambient_c)
    }

    pub fn initial_pcm_c(&self) -> f64 {
        self.initial.pcm_c.unwrap_or(self.ambient_c)
    }

    /// Set every surge window's intensity to `intensity_w`.
    pub fn set_surge_intensity(&mut self, intensity_w: f64) {
        for surge in &mut self.surges {
            surge.intensity_w = intensity_w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_temperatures_default_to_ambient() {
        let mut scenario = Scenario::reference();
        assert_eq!(scenario.initial_electronics_c(), 25.0);
        assert_eq!(scenario.initial_pcm_c(), 25.0);
        scenario.initial.pcm_c = Some(30.0);
        assert_eq!(scenario.initial_pcm_c(), 30.0);
    }

    #[test]
    fn surge_override_applies_to_all_windows() {
        let mut scenario = Scenario::reference();
        scenario.surges.push(SurgeDef {
            start_s: 20.0,
            duration_s: 1.0,
            intensity_w: 50.0,
        });
        scenario.set_surge_intensity(0.0);
        assert!(scenario.surges.iter().all(|s| s.intensity_w == 0.0));
    }

    #[test]
    fn integrator_defaults_from_tag_only() {
        let def: IntegratorDef = serde_yaml::from_str("type: Rk4").unwrap();
        assert_eq!(def, IntegratorDef::Rk4 { substeps: 10 });
        let def: IntegratorDef = serde_yaml::from_str("type: DormandPrince\nrtol: 1.0e-4").unwrap();
        assert_eq!(
            def,
            IntegratorDef::DormandPrince {
                rtol: 1e-4,
                atol: 1e-8,
                max_steps: 100_000,
            }
        );
    }
}
