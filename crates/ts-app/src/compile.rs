//! Scenario to package-model compilation.

use tracing::warn;
use ts_components::{
    FanController, HeatSinkGeometry, MaterialProperties, PhaseChangeMaterial, SurgeProfile,
    SurgeSchedule,
};
use ts_core::units::{j_per_kg, j_per_kgk, kg, kg_per_m3, m, m2, s, w, w_per_mk};
use ts_project::schema::{FanDef, IntegratorDef, Scenario};
use ts_sim::{IntegratorType, PackageConfig, PackageModel, SimOptions};

use crate::error::AppResult;

/// A validated scenario ready to integrate.
#[derive(Debug, Clone)]
pub struct CompiledScenario {
    pub model: PackageModel,
    pub options: SimOptions,
}

pub fn compile_scenario(scenario: &Scenario) -> AppResult<CompiledScenario> {
    ts_project::validate_scenario(scenario)?;

    let e = &scenario.electronics;
    let electronics = MaterialProperties::new(
        j_per_kgk(e.specific_heat_j_per_kgk),
        kg_per_m3(e.density_kg_per_m3),
        w_per_mk(e.conductivity_w_per_mk),
        kg(e.mass_kg),
    )?;

    let p = &scenario.pcm;
    let pcm = PhaseChangeMaterial::new(
        j_per_kgk(p.specific_heat_j_per_kgk),
        kg_per_m3(p.density_kg_per_m3),
        j_per_kg(p.latent_heat_j_per_kg),
        p.melting_point_c,
    )?;

    let hs = &scenario.heat_sink;
    let heat_sink = HeatSinkGeometry::new(
        m2(hs.base_area_m2),
        m(hs.fin_height_m),
        m(hs.fin_thickness_m),
        m(hs.fin_spacing_m),
        w_per_mk(hs.conductivity_w_per_mk),
    )?;

    let fan = match scenario.fan {
        FanDef::Proportional {
            base_w_m2k,
            reference_c,
            span_c,
        } => FanController::Proportional {
            base_w_m2k,
            reference_c: reference_c.unwrap_or(p.melting_point_c),
            span_k: span_c,
        },
        FanDef::Fixed { h_w_m2k } => FanController::fixed(h_w_m2k),
    };

    let windows = scenario
        .surges
        .iter()
        .map(|surge| {
            SurgeSchedule::new(
                s(surge.start_s),
                s(surge.duration_s),
                w(surge.intensity_w),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sim = &scenario.simulation;
    let config = PackageConfig {
        electronics,
        pcm,
        heat_sink,
        fan,
        surges: SurgeProfile::new(windows),
        ambient_c: scenario.ambient_c,
        time_step_s: sim.dt_s,
        initial_electronics_c: scenario.initial_electronics_c(),
        initial_pcm_c: scenario.initial_pcm_c(),
    };
    let model = PackageModel::new(config)?;

    let h0 = model.initial_coefficient();
    if h0 < 0.0 {
        warn!(
            h_w_m2k = h0,
            t_electronics_c = scenario.initial_electronics_c(),
            sign_change_c = ?model.config().fan.sign_change_temperature(),
            "fan controller yields a negative convective coefficient at the initial state"
        );
    }

    let options = sim_options(&model, scenario);
    Ok(CompiledScenario { model, options })
}

fn sim_options(model: &PackageModel, scenario: &Scenario) -> SimOptions {
    let sim = &scenario.simulation;
    let base = SimOptions {
        t_end: sim.t_end_s,
        ..model.sim_options()
    };
    match sim.integrator {
        IntegratorDef::DormandPrince {
            rtol,
            atol,
            max_steps,
        } => SimOptions {
            integrator: IntegratorType::DormandPrince,
            rtol,
            atol,
            max_steps,
            ..base
        },
        IntegratorDef::Rk4 { substeps } => SimOptions {
            integrator: IntegratorType::RK4,
            substeps,
            ..base
        },
        IntegratorDef::ForwardEuler { substeps } => SimOptions {
            integrator: IntegratorType::ForwardEuler,
            substeps,
            ..base
        },
    }
}

/// Name of the integrator as recorded in run manifests.
pub fn integrator_name(def: &IntegratorDef) -> &'static str {
    match def {
        IntegratorDef::DormandPrince { .. } => "DormandPrince",
        IntegratorDef::Rk4 { .. } => "Rk4",
        IntegratorDef::ForwardEuler { .. } => "ForwardEuler",
    }
}
