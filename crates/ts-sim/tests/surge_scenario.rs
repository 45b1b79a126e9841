//! Integration test: electronics/PCM package under a 1000 W surge.
//!
//! Reference package at ambient 25 °C, surge from t = 5 s for 10 s,
//! sampled every 0.1 s to 30 s.
//!
//! Checks:
//! - output grid shape
//! - temperature rise right at surge onset
//! - no heating above ambient without a surge
//! - bit-identical reruns
//! - relaxation toward a shared temperature with convection switched off
//! - failure modes when the PCM temperature collapses to zero

use ts_components::{FanController, PhaseChangeMaterial, SurgeProfile, SurgeSchedule};
use ts_core::units::{j_per_kg, j_per_kgk, kg_per_m3, s, w};
use ts_sim::{
    ELECTRONICS, IntegratorType, PCM, PackageConfig, PackageModel, SimError, SimOptions, run_sim,
};

fn reference_opts() -> SimOptions {
    SimOptions {
        dt: 0.1,
        t_end: 30.0,
        ..SimOptions::default()
    }
}

fn reference_model() -> PackageModel {
    PackageModel::new(PackageConfig::reference().unwrap()).unwrap()
}

#[test]
fn reference_run_has_301_samples() {
    let rec = run_sim(&reference_model(), &reference_opts()).unwrap();
    assert_eq!(rec.len(), 301);
    assert_eq!(rec.t[0], 0.0);
    assert_eq!(rec.t[300], 30.0);
    for (i, t) in rec.t.iter().enumerate() {
        assert!((t - i as f64 * 0.1).abs() < 1e-9);
    }
    assert!(rec.stats.accepted_steps >= 300);
}

#[test]
fn electronics_heat_up_at_surge_onset() {
    let rec = run_sim(&reference_model(), &reference_opts()).unwrap();
    let te = rec.component(ELECTRONICS);
    assert_eq!(rec.t[50], 5.0);
    assert!(te[50] > te[49], "T_e(5.0) = {} <= T_e(4.9) = {}", te[50], te[49]);
    // Well into the surge the electronics are clearly hotter than ambient
    assert!(te[100] > 40.0);
    // After the surge they cool back down
    assert!(te[300] < te[150]);
}

#[test]
fn no_surge_never_exceeds_ambient() {
    let mut cfg = PackageConfig::reference().unwrap();
    cfg.surges = SurgeProfile::single(SurgeSchedule::new(s(5.0), s(10.0), w(0.0)).unwrap());
    let model = PackageModel::new(cfg).unwrap();
    let rec = run_sim(&model, &reference_opts()).unwrap();
    assert_eq!(rec.len(), 301);
    for te in rec.component(ELECTRONICS) {
        assert!(te <= 25.0, "electronics rose to {te}");
    }
}

#[test]
fn reruns_are_identical() {
    let model = reference_model();
    let a = run_sim(&model, &reference_opts()).unwrap();
    let b = run_sim(&model, &reference_opts()).unwrap();
    assert_eq!(a.t, b.t);
    assert_eq!(a.x, b.x);
    assert_eq!(a.stats, b.stats);
}

#[test]
fn relaxes_toward_shared_temperature_without_convection() {
    let mut cfg = PackageConfig::reference().unwrap();
    cfg.fan = FanController::fixed(0.0);
    cfg.surges = SurgeProfile::default();
    cfg.initial_electronics_c = 60.0;
    cfg.initial_pcm_c = 25.0;
    let model = PackageModel::new(cfg).unwrap();
    let rec = run_sim(&model, &reference_opts()).unwrap();

    let te = rec.component(ELECTRONICS);
    let tp = rec.component(PCM);
    let gaps: Vec<f64> = te.iter().zip(&tp).map(|(e, p)| e - p).collect();

    assert!(te.windows(2).all(|w| w[1] <= w[0]));
    assert!(gaps.iter().all(|g| *g >= 0.0));
    assert!(gaps.windows(2).all(|w| w[1] <= w[0]));
    assert!(gaps[300] < 0.5);
    assert!((te[300] - 25.0).abs() < 1.0);
}

#[test]
fn fixed_step_rk4_tracks_adaptive_solution() {
    let model = reference_model();
    let adaptive = run_sim(&model, &reference_opts()).unwrap();
    let rk4 = run_sim(
        &model,
        &SimOptions {
            integrator: IntegratorType::RK4,
            substeps: 20,
            ..reference_opts()
        },
    )
    .unwrap();
    assert_eq!(rk4.len(), adaptive.len());
    let peak = |v: Vec<f64>| v.into_iter().fold(f64::MIN, f64::max);
    let a = peak(adaptive.component(ELECTRONICS));
    let b = peak(rk4.component(ELECTRONICS));
    assert!((a - b).abs() < 0.5, "adaptive peak {a}, rk4 peak {b}");
}

#[test]
fn pcm_driven_toward_zero_diverges() {
    // PCM starts just above zero and is driven into it by conduction to
    // hotter electronics; the step size collapses before it gets there.
    let mut cfg = PackageConfig::reference().unwrap();
    cfg.fan = FanController::fixed(0.0);
    cfg.surges = SurgeProfile::default();
    cfg.initial_electronics_c = 60.0;
    cfg.initial_pcm_c = 1e-3;
    let model = PackageModel::new(cfg).unwrap();
    let err = run_sim(&model, &reference_opts()).unwrap_err();
    match err {
        SimError::IntegrationDivergence { time_s, .. } => {
            assert!((0.0..1.0).contains(&time_s));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn pcm_reaching_zero_reports_singularity_time() {
    // Melting PCM level with the electronics: dT_p = -(L / cp_p^2) = -0.5 K/s,
    // so one 0.25 s Euler step lands exactly on T_p = 0.
    let mut cfg = PackageConfig::reference().unwrap();
    cfg.pcm = PhaseChangeMaterial::new(
        j_per_kgk(2000.0),
        kg_per_m3(800.0),
        j_per_kg(2.0e6),
        0.125,
    )
    .unwrap();
    cfg.fan = FanController::fixed(0.0);
    cfg.surges = SurgeProfile::default();
    cfg.time_step_s = 0.25;
    cfg.initial_electronics_c = 0.125;
    cfg.initial_pcm_c = 0.125;
    let model = PackageModel::new(cfg).unwrap();
    let opts = SimOptions {
        t_end: 1.0,
        integrator: IntegratorType::ForwardEuler,
        substeps: 1,
        ..model.sim_options()
    };

    match run_sim(&model, &opts).unwrap_err() {
        SimError::DivisionSingularity { time_s, .. } => assert_eq!(time_s, 0.25),
        other => panic!("unexpected error: {other:?}"),
    }
}
