//! Lumped material properties.

use crate::common::check_positive;
use crate::error::ComponentResult;
use ts_core::units::{Density, Mass, SpecificHeat, ThermalConductivity};

/// Properties of a lumped thermal mass (one uniform temperature).
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProperties {
    specific_heat: SpecificHeat,
    density: Density,
    conductivity: ThermalConductivity,
    mass: Mass,
}

impl MaterialProperties {
    pub fn new(
        specific_heat: SpecificHeat,
        density: Density,
        conductivity: ThermalConductivity,
        mass: Mass,
    ) -> ComponentResult<Self> {
        check_positive(specific_heat.value, "specific heat must be positive")?;
        check_positive(density.value, "density must be positive")?;
        check_positive(conductivity.value, "conductivity must be positive")?;
        check_positive(mass.value, "mass must be positive")?;
        Ok(Self {
            specific_heat,
            density,
            conductivity,
            mass,
        })
    }

    pub fn specific_heat(&self) -> SpecificHeat {
        self.specific_heat
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Lumped heat capacity cp·m (J/K).
    pub fn heat_capacity_j_per_k(&self) -> f64 {
        self.specific_heat.value * self.mass.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ts_core::units::{j_per_kgk, kg, kg_per_m3, w_per_mk};

    #[test]
    fn derived_quantities() {
        let copper =
            MaterialProperties::new(j_per_kgk(890.0), kg_per_m3(8960.0), w_per_mk(400.0), kg(0.1))
                .unwrap();
        assert!((copper.heat_capacity_j_per_k() - 89.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_mass() {
        let res =
            MaterialProperties::new(j_per_kgk(890.0), kg_per_m3(8960.0), w_per_mk(400.0), kg(0.0));
        assert!(res.is_err());
    }
}
