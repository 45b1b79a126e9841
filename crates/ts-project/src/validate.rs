//! Scenario validation logic.
//!
//! Everything the model would reject at build time or trip over at run time
//! is checked here, before any integration starts.

use crate::schema::{FanDef, IntegratorDef, Scenario};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative"))
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    if scenario.name.trim().is_empty() {
        return Err(invalid("name", &scenario.name, "must not be empty"));
    }

    let e = &scenario.electronics;
    positive("electronics.specific_heat_j_per_kgk", e.specific_heat_j_per_kgk)?;
    positive("electronics.density_kg_per_m3", e.density_kg_per_m3)?;
    positive("electronics.conductivity_w_per_mk", e.conductivity_w_per_mk)?;
    positive("electronics.mass_kg", e.mass_kg)?;

    let p = &scenario.pcm;
    positive("pcm.specific_heat_j_per_kgk", p.specific_heat_j_per_kgk)?;
    positive("pcm.density_kg_per_m3", p.density_kg_per_m3)?;
    finite("pcm.latent_heat_j_per_kg", p.latent_heat_j_per_kg)?;
    finite("pcm.melting_point_c", p.melting_point_c)?;

    let hs = &scenario.heat_sink;
    non_negative("heat_sink.base_area_m2", hs.base_area_m2)?;
    positive("heat_sink.fin_height_m", hs.fin_height_m)?;
    positive("heat_sink.fin_thickness_m", hs.fin_thickness_m)?;
    finite("heat_sink.fin_spacing_m", hs.fin_spacing_m)?;
    if hs.fin_spacing_m + hs.fin_thickness_m <= 0.0 {
        return Err(invalid(
            "heat_sink.fin_spacing_m",
            hs.fin_spacing_m,
            "fin_spacing + fin_thickness must be positive",
        ));
    }
    positive("heat_sink.conductivity_w_per_mk", hs.conductivity_w_per_mk)?;

    match scenario.fan {
        FanDef::Proportional {
            base_w_m2k,
            reference_c,
            span_c,
        } => {
            finite("fan.base_w_m2k", base_w_m2k)?;
            if let Some(reference_c) = reference_c {
                finite("fan.reference_c", reference_c)?;
            }
            finite("fan.span_c", span_c)?;
            if span_c == 0.0 {
                return Err(invalid("fan.span_c", span_c, "must be non-zero"));
            }
        }
        FanDef::Fixed { h_w_m2k } => finite("fan.h_w_m2k", h_w_m2k)?,
    }

    for (i, surge) in scenario.surges.iter().enumerate() {
        non_negative(&format!("surges[{i}].start_s"), surge.start_s)?;
        non_negative(&format!("surges[{i}].duration_s"), surge.duration_s)?;
        non_negative(&format!("surges[{i}].intensity_w"), surge.intensity_w)?;
    }

    finite("ambient_c", scenario.ambient_c)?;
    finite("initial.electronics_c", scenario.initial_electronics_c())?;
    let t_p0 = scenario.initial_pcm_c();
    finite("initial.pcm_c", t_p0)?;
    if t_p0 == 0.0 {
        return Err(invalid(
            "initial.pcm_c",
            t_p0,
            "PCM temperature divides the PCM rate and must be non-zero",
        ));
    }

    let sim = &scenario.simulation;
    positive("simulation.dt_s", sim.dt_s)?;
    non_negative("simulation.t_end_s", sim.t_end_s)?;
    match sim.integrator {
        IntegratorDef::DormandPrince {
            rtol,
            atol,
            max_steps,
        } => {
            positive("simulation.integrator.rtol", rtol)?;
            non_negative("simulation.integrator.atol", atol)?;
            if max_steps == 0 {
                return Err(invalid(
                    "simulation.integrator.max_steps",
                    max_steps,
                    "must be positive",
                ));
            }
        }
        IntegratorDef::Rk4 { substeps } | IntegratorDef::ForwardEuler { substeps } => {
            if substeps == 0 {
                return Err(invalid(
                    "simulation.integrator.substeps",
                    substeps,
                    "must be positive",
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SurgeDef;

    fn field_of(err: ValidationError) -> String {
        match err {
            ValidationError::InvalidValue { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reference_is_valid() {
        validate_scenario(&Scenario::reference()).unwrap();
    }

    #[test]
    fn rejects_zero_fin_thickness() {
        let mut s = Scenario::reference();
        s.heat_sink.fin_thickness_m = 0.0;
        assert_eq!(
            field_of(validate_scenario(&s).unwrap_err()),
            "heat_sink.fin_thickness_m"
        );
    }

    #[test]
    fn rejects_non_positive_pitch() {
        let mut s = Scenario::reference();
        s.heat_sink.fin_spacing_m = -0.001;
        assert_eq!(
            field_of(validate_scenario(&s).unwrap_err()),
            "heat_sink.fin_spacing_m"
        );
    }

    #[test]
    fn rejects_negative_surge() {
        let mut s = Scenario::reference();
        s.surges.push(SurgeDef {
            start_s: -1.0,
            duration_s: 1.0,
            intensity_w: 10.0,
        });
        assert_eq!(
            field_of(validate_scenario(&s).unwrap_err()),
            "surges[1].start_s"
        );
    }

    #[test]
    fn rejects_zero_initial_pcm_temperature() {
        let mut s = Scenario::reference();
        s.ambient_c = 0.0;
        assert_eq!(field_of(validate_scenario(&s).unwrap_err()), "initial.pcm_c");
        s.initial.pcm_c = Some(5.0);
        validate_scenario(&s).unwrap();
    }

    #[test]
    fn rejects_bad_simulation_settings() {
        let mut s = Scenario::reference();
        s.simulation.dt_s = 0.0;
        assert_eq!(field_of(validate_scenario(&s).unwrap_err()), "simulation.dt_s");

        let mut s = Scenario::reference();
        s.simulation.integrator = IntegratorDef::Rk4 { substeps: 0 };
        assert_eq!(
            field_of(validate_scenario(&s).unwrap_err()),
            "simulation.integrator.substeps"
        );
    }

    #[test]
    fn rejects_future_version() {
        let mut s = Scenario::reference();
        s.version = crate::migrate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
