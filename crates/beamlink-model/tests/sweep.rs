mod common;

use std::io::Write;

use beamlink_host::{HostModule, HostResult, HostValue};
use beamlink_model::{load_params, trace_n, Beamline, SweepError};
use serde_json::json;

use common::{float, module, sample_beamline};

/// Opening width of the slit and energy of the source, as the tracer would see them
fn observe(module: &HostModule, beamline: &HostValue) -> HostResult<(f64, f64, f64)> {
    let snapshot = Beamline::from_host(module, beamline)?;
    let slit = snapshot.element("Slit").map(|e| (e.scalar("openingWidth"), e.position().z));
    let energy = snapshot.source("Matrix Source").map(|s| s.scalar("energy"));
    match (slit, energy) {
        (Some((width, z)), Some(energy)) => Ok((width, z, energy)),
        _ => Err("sample beamline is incomplete".into()),
    }
}

fn slit_width(module: &HostModule, beamline: &HostValue) -> f64 {
    let slit = module
        .call_method(beamline, "item", &[HostValue::from("Slit")])
        .unwrap();
    float(module.get_attr(&slit, "openingWidth").unwrap())
}

#[test]
fn test_each_set_applied_then_restored() {
    let module = module();
    let beamline = sample_beamline().into_host();

    let params = json!({
        "Slit": {"openingWidth": [3.0, 4.0]},
        "Matrix Source": {"energy": [200.0, 300.0]}
    });
    let results = trace_n(&module, &beamline, &params, observe).unwrap();

    let observed: Vec<_> = results.iter().map(|(_, seen)| *seen).collect();
    assert_eq!(observed, vec![(3.0, 12000.0, 200.0), (4.0, 12000.0, 300.0)]);
    assert_eq!(results[0].0, json!({"Slit": {"openingWidth": 3.0}, "Matrix Source": {"energy": 200.0}}));

    assert_eq!(slit_width(&module, &beamline), 2.0);
    let source = module
        .call_method(&beamline, "item", &[HostValue::from("Matrix Source")])
        .unwrap();
    assert_eq!(float(module.get_attr(&source, "energy").unwrap()), 100.0);
}

#[test]
fn test_nested_parameters_written_through_proxies() {
    let module = module();
    let beamline = sample_beamline().into_host();

    let params = json!([{"Slit.position.z": 500}, {"Slit.position.z": 600.5}]);
    let results = trace_n(&module, &beamline, &params, observe).unwrap();

    assert_eq!(results[0].1 .1, 500.0);
    assert_eq!(results[1].1 .1, 600.5);

    let snapshot = Beamline::from_host(&module, &beamline).unwrap();
    assert_eq!(snapshot.element("Slit").unwrap().position().z, 12000.0);
}

#[test]
fn test_restored_after_failed_trace() {
    let module = module();
    let beamline = sample_beamline().into_host();

    let params = json!({"Slit": {"openingWidth": 9.0}});
    let err = trace_n(&module, &beamline, &params, |_, _| -> HostResult<()> {
        Err("detector offline".into())
    })
    .unwrap_err();

    assert!(matches!(err, SweepError::Host(_)));
    assert_eq!(slit_width(&module, &beamline), 2.0);
}

#[test]
fn test_unknown_item_and_attribute() {
    let module = module();
    let beamline = sample_beamline().into_host();

    let err = trace_n(&module, &beamline, &json!({"M2": {"radius": 1.0}}), observe).unwrap_err();
    assert_eq!(err.to_string(), "No element or source with name 'M2' found in beamline.");

    let err = trace_n(&module, &beamline, &json!({"Slit": {"openingWidht": 1.0}}), observe).unwrap_err();
    assert!(err.to_string().contains("did you mean 'openingWidth'"));
    assert_eq!(slit_width(&module, &beamline), 2.0);
}

#[test]
fn test_trace_per_set() {
    let module = module();
    let beamline = sample_beamline().into_host();

    let params = json!({"Matrix Source": {"numberOfRays": [1, 2, 3]}});
    let results = trace_n(&module, &beamline, &params, |module, beamline| {
        let rays = module.call_method(beamline, "trace", &[])?;
        module.get_attr(&rays, "count")
    })
    .unwrap();

    let counts: Vec<_> = results.iter().map(|(_, count)| count.as_int().unwrap()).collect();
    assert_eq!(counts, vec![4, 8, 12]);
}

#[test]
fn test_load_json_params() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"Slit.openingWidth": [1.0, 2.0]}}"#).unwrap();

    let params = load_params(file.path()).unwrap();
    assert_eq!(params, json!({"Slit.openingWidth": [1.0, 2.0]}));
}

#[test]
fn test_load_toml_params() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[Slit]\nopeningWidth = [1.0, 2.0]\nopeningHeight = [0.5, 0.5]").unwrap();

    let params = load_params(file.path()).unwrap();
    let sets = beamlink_model::normalize(&params).unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[1], json!({"Slit": {"openingWidth": 2.0, "openingHeight": 0.5}}));
}

#[test]
fn test_load_unknown_extension() {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    assert!(matches!(
        load_params(file.path()),
        Err(SweepError::UnsupportedFormat(_))
    ));
}
