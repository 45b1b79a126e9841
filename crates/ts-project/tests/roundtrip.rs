use ts_project::schema::*;
use ts_project::{
    ProjectError, from_yaml_str, load, load_json, load_yaml, save_json, save_yaml,
    validate_scenario,
};

#[test]
fn roundtrip_yaml_reference() {
    let scenario = Scenario::reference();
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("ts_project_roundtrip_reference.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_with_fixed_fan_and_rk4() {
    let mut scenario = Scenario::reference();
    scenario.name = "Fixed fan".to_string();
    scenario.fan = FanDef::Fixed { h_w_m2k: 15.0 };
    scenario.initial = InitialDef {
        electronics_c: Some(60.0),
        pcm_c: Some(25.0),
    };
    scenario.simulation.integrator = IntegratorDef::Rk4 { substeps: 4 };

    let path = std::env::temp_dir().join("ts_project_roundtrip_fixed.json");
    save_json(&path, &scenario).unwrap();
    assert_eq!(load_json(&path).unwrap(), scenario);
    assert_eq!(load(&path).unwrap(), scenario);
}

#[test]
fn minimal_yaml_fills_defaults() {
    let yaml = r#"
version: 1
name: Minimal
electronics:
  specific_heat_j_per_kgk: 890.0
  density_kg_per_m3: 8960.0
  conductivity_w_per_mk: 400.0
  mass_kg: 0.1
pcm:
  specific_heat_j_per_kgk: 2000.0
  density_kg_per_m3: 800.0
  latent_heat_j_per_kg: 200000.0
  melting_point_c: 70.0
heat_sink:
  base_area_m2: 0.01
  fin_height_m: 0.005
  fin_thickness_m: 0.001
  fin_spacing_m: 0.002
  conductivity_w_per_mk: 200.0
fan:
  type: Proportional
  base_w_m2k: 10.0
ambient_c: 25.0
simulation:
  dt_s: 0.1
  t_end_s: 30.0
"#;
    let scenario = from_yaml_str(yaml).unwrap();
    assert!(scenario.surges.is_empty());
    assert_eq!(scenario.initial, InitialDef::default());
    assert_eq!(scenario.simulation.integrator, IntegratorDef::default());
    match scenario.fan {
        FanDef::Proportional {
            reference_c,
            span_c,
            ..
        } => {
            assert_eq!(reference_c, None);
            assert_eq!(span_c, 20.0);
        }
        other => panic!("unexpected fan: {other:?}"),
    }
}

#[test]
fn invalid_scenario_is_not_saved() {
    let mut scenario = Scenario::reference();
    scenario.heat_sink.fin_height_m = 0.0;
    let path = std::env::temp_dir().join("ts_project_invalid.yaml");
    let _ = std::fs::remove_file(&path);

    let err = save_yaml(&path, &scenario).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
    assert!(!path.exists());
}

#[test]
fn malformed_yaml_reports_parse_error() {
    let err = from_yaml_str("version: [not a number").unwrap_err();
    assert!(matches!(err, ProjectError::Yaml(_)));
}
