//! Phase-change material reservoir and its latent-heat flux.

use crate::common::{check_finite, check_positive};
use crate::error::ComponentResult;
use ts_core::units::{Density, SpecificEnergy, SpecificHeat};

/// PCM constants.
///
/// Latent heat is released continuously once the PCM is at or above its
/// melting point, proportional to the instantaneous PCM temperature. This is a
/// proxy for enthalpy absorption during melting rather than an isothermal
/// plateau.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseChangeMaterial {
    specific_heat: SpecificHeat,
    density: Density,
    latent_heat: SpecificEnergy,
    melting_point_c: f64,
}

impl PhaseChangeMaterial {
    pub fn new(
        specific_heat: SpecificHeat,
        density: Density,
        latent_heat: SpecificEnergy,
        melting_point_c: f64,
    ) -> ComponentResult<Self> {
        check_positive(specific_heat.value, "PCM specific heat must be positive")?;
        check_positive(density.value, "PCM density must be positive")?;
        check_finite(latent_heat.value, "PCM latent heat must be finite")?;
        check_finite(melting_point_c, "PCM melting point must be finite")?;
        Ok(Self {
            specific_heat,
            density,
            latent_heat,
            melting_point_c,
        })
    }

    pub fn specific_heat(&self) -> SpecificHeat {
        self.specific_heat
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn latent_heat(&self) -> SpecificEnergy {
        self.latent_heat
    }

    pub fn melting_point_c(&self) -> f64 {
        self.melting_point_c
    }

    pub fn is_melting(&self, t_pcm_c: f64) -> bool {
        t_pcm_c >= self.melting_point_c
    }

    /// Latent-heat flux (W) at PCM temperature `t_pcm_c`.
    pub fn fusion_flux(&self, t_pcm_c: f64) -> f64 {
        if self.is_melting(t_pcm_c) {
            self.latent_heat.value * t_pcm_c / self.specific_heat.value
        } else {
            0.0
        }
    }
}
