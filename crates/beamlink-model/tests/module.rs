mod common;

use std::path::PathBuf;
use std::rc::Rc;

use beamlink_host::{HostError, HostValue};
use beamlink_model::{
    init_module, Beamline, ConfigError, Cutout, EventType, Material, ModelError, ModuleConfig, Rect,
    Surface,
};

use common::{float, module, module_with, sample_beamline, BrokenTracer, StraightTracer};

mod init {
    use super::*;

    #[test]
    fn test_reachable_types_declared() {
        let module = module();
        for name in [
            "DesignElement",
            "Source",
            "dvec4",
            "Rad",
            "SlopeError",
            "Rect",
            "Trapezoid",
            "Cutout",
            "Quadric",
            "Toroid",
            "Surface",
            "Rays",
            "Beamline",
        ] {
            assert!(module.has_type(name), "missing host type {}", name);
        }
        assert!(!module.has_type("dmat4"));
        assert!(module.has_conversion("Rect", "Cutout"));
        assert!(module.has_conversion("Quadric", "Surface"));
    }

    #[test]
    fn test_module_name_and_doc() {
        let config = ModuleConfig::from_toml("name = \"apparatus\"\ndoc = \"test beamline\"").unwrap();
        let module = init_module(&config, Rc::new(StraightTracer::default())).unwrap();
        assert_eq!(module.name(), "apparatus");
        assert_eq!(module.doc(), Some("test beamline"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ModuleConfig {
            name: "9lives".to_string(),
            ..ModuleConfig::default()
        };
        let err = init_module(&config, Rc::new(StraightTracer::default())).unwrap_err();
        assert!(matches!(err, ModelError::Config(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_enum_members_exported() {
        let module = module();
        let mirror = module.attr("PLANE_MIRROR").unwrap();
        assert_eq!(mirror.as_enum().unwrap().enum_name, "ElementType");

        let gold = module.attr("Au").unwrap();
        assert_eq!(gold.as_enum().unwrap().value, 79);

        assert!(module.enum_decl("EventType").is_some());
        assert_eq!(module.attr("HIT_ELEMENT").unwrap().as_enum().unwrap().value, 2);
        assert_eq!(module.attr("EV").unwrap().as_enum().unwrap().enum_name, "EnergySpreadUnit");
    }

    #[test]
    fn test_get_module_path() {
        let config = ModuleConfig {
            data_dir: Some(PathBuf::from("/opt/beamlink/data")),
            ..ModuleConfig::default()
        };
        let expected = config.data_dir().display().to_string();
        let module = init_module(&config, Rc::new(StraightTracer::default())).unwrap();

        let path = module.call("get_module_path", &[]).unwrap();
        assert_eq!(path.as_str(), Some(expected.as_str()));
        assert!(module.call("get_module_path", &[HostValue::Int(1)]).is_err());
    }
}

mod items {
    use super::*;

    #[test]
    fn test_item_by_name() {
        let module = module();
        let beamline = sample_beamline().into_host();

        let slit = module.call_method(&beamline, "item", &[HostValue::from("Slit")]).unwrap();
        assert_eq!(slit.type_name(), "DesignElement");
        assert_eq!(float(module.get_attr(&slit, "openingWidth").unwrap()), 2.0);

        let source = module
            .call_method(&beamline, "item", &[HostValue::from("Matrix Source")])
            .unwrap();
        assert_eq!(source.type_name(), "Source");
    }

    #[test]
    fn test_missing_item() {
        let module = module();
        let beamline = sample_beamline().into_host();

        let err = module
            .call_method(&beamline, "item", &[HostValue::from("M2")])
            .unwrap_err();
        assert_eq!(err.to_string(), "No element or source with name 'M2' found in beamline.");
        assert!(matches!(
            err.downcast_native::<ModelError>(),
            Some(ModelError::ItemNotFound(name)) if name == "M2"
        ));
    }

    #[test]
    fn test_item_requires_a_name() {
        let module = module();
        let beamline = sample_beamline().into_host();
        assert!(matches!(
            module.call_method(&beamline, "item", &[]),
            Err(HostError::ArgumentError(_))
        ));
    }

    #[test]
    fn test_elements_share_storage() {
        let module = module();
        let beamline = sample_beamline().into_host();

        let elements = module.get_attr(&beamline, "elements").unwrap();
        let elements = elements.as_list().unwrap();
        assert_eq!(elements.len(), 3);
        module
            .set_attr(&elements[1], "openingWidth", HostValue::Float(3.0))
            .unwrap();

        let slit = module.call_method(&beamline, "item", &[HostValue::from("Slit")]).unwrap();
        assert_eq!(float(module.get_attr(&slit, "openingWidth").unwrap()), 3.0);
    }
}

mod nested_writes {
    use super::*;

    #[test]
    fn test_position_through_item() {
        let module = module();
        let beamline = sample_beamline().into_host();
        let slit = module.call_method(&beamline, "item", &[HostValue::from("Slit")]).unwrap();

        module.set_path(&slit, "position.z", HostValue::Float(500.0)).unwrap();
        module.set_path(&slit, "position.w", HostValue::Float(0.0)).unwrap();

        let snapshot = Beamline::from_host(&module, &beamline).unwrap();
        let position = snapshot.element("Slit").unwrap().position();
        assert_eq!(position.z, 500.0);
        assert_eq!(position.w, 1.0);
    }

    #[test]
    fn test_cutout_alternative() {
        let module = module();
        let beamline = sample_beamline().into_host();
        let slit = module.call_method(&beamline, "item", &[HostValue::from("Slit")]).unwrap();

        let rect = module.construct("Rect").unwrap();
        module.set_attr(&rect, "width", HostValue::Float(30.0)).unwrap();
        module.set_attr(&rect, "length", HostValue::Float(5.0)).unwrap();
        module.set_attr(&slit, "cutout", rect).unwrap();

        module.set_path(&slit, "cutout.width", HostValue::Float(40.0)).unwrap();

        let snapshot = Beamline::from_host(&module, &beamline).unwrap();
        assert_eq!(
            snapshot.element("Slit").unwrap().cutout(),
            Cutout::Rect(Rect {
                width: 40.0,
                length: 5.0
            })
        );
    }

    #[test]
    fn test_surface_alternative() {
        let module = module();
        let beamline = sample_beamline().into_host();
        let mirror = module.call_method(&beamline, "item", &[HostValue::from("M1")]).unwrap();

        let quadric = module.construct("Quadric").unwrap();
        module.set_attr(&mirror, "expertsOptics", quadric).unwrap();
        module
            .set_path(&mirror, "expertsOptics.a11", HostValue::Float(2.0))
            .unwrap();

        let snapshot = Beamline::from_host(&module, &beamline).unwrap();
        match snapshot.element("M1").unwrap().surface() {
            Surface::Quadric(quadric) => {
                assert_eq!(quadric.a11, 2.0);
                assert_eq!(quadric.icurv, 1);
            }
            other => panic!("expected a quadric, got {:?}", other),
        }
    }

    #[test]
    fn test_angle_and_slope_error() {
        let module = module();
        let beamline = sample_beamline().into_host();
        let mirror = module.call_method(&beamline, "item", &[HostValue::from("M1")]).unwrap();

        module
            .set_path(&mirror, "grazingIncAngle.rad", HostValue::Float(0.02))
            .unwrap();
        module
            .set_path(&mirror, "slopeError.thermalDistortionAmp", HostValue::Float(0.5))
            .unwrap();

        assert_eq!(float(module.get_path(&mirror, "grazingIncAngle.rad").unwrap()), 0.02);
        let snapshot = Beamline::from_host(&module, &beamline).unwrap();
        assert_eq!(
            snapshot.element("M1").unwrap().slope_error().thermal_distortion_amp,
            0.5
        );
    }

    #[test]
    fn test_enum_field_by_member_and_value() {
        let module = module();
        let beamline = sample_beamline().into_host();
        let mirror = module.call_method(&beamline, "item", &[HostValue::from("M1")]).unwrap();

        module
            .set_attr(&mirror, "material", module.attr("Au").unwrap())
            .unwrap();
        let snapshot = Beamline::from_host(&module, &beamline).unwrap();
        assert_eq!(snapshot.element("M1").unwrap().material(), Material::Au);

        module.set_attr(&mirror, "material", HostValue::Int(-1)).unwrap();
        let material = module.get_attr(&mirror, "material").unwrap();
        assert_eq!(material.as_enum().unwrap().name, "VACUUM");

        assert!(module.set_attr(&mirror, "material", HostValue::Int(1000)).is_err());
    }

    #[test]
    fn test_orientation_replaced_whole() {
        let module = module();
        let beamline = sample_beamline().into_host();
        let mirror = module.call_method(&beamline, "item", &[HostValue::from("M1")]).unwrap();

        let orientation = module.get_attr(&mirror, "orientation").unwrap();
        let columns = orientation.as_list().unwrap();
        assert_eq!(columns.len(), 4);
        assert_eq!(float(columns[0].as_list().unwrap()[0].clone()), 1.0);

        let flipped = HostValue::List(
            (0..4)
                .map(|col| {
                    HostValue::List(
                        (0..4)
                            .map(|row| HostValue::Float(if col == row { -1.0 } else { 0.0 }))
                            .collect(),
                    )
                })
                .collect(),
        );
        module.set_attr(&mirror, "orientation", flipped).unwrap();

        let snapshot = Beamline::from_host(&module, &beamline).unwrap();
        assert_eq!(snapshot.element("M1").unwrap().orientation().get(2, 2), -1.0);
        assert!(module
            .set_attr(&mirror, "orientation", HostValue::List(vec![]))
            .is_err());
    }
}

mod trace {
    use super::*;

    #[test]
    fn test_trace_returns_rays() {
        let tracer = Rc::new(StraightTracer::default());
        let module = module_with(tracer.clone());
        let beamline = sample_beamline().into_host();

        let rays = module.call_method(&beamline, "trace", &[]).unwrap();
        assert_eq!(rays.type_name(), "Rays");
        assert_eq!(tracer.calls.get(), 1);

        // 4 rays, each emitted and then hitting 3 elements
        assert_eq!(module.get_attr(&rays, "count").unwrap().as_int(), Some(16));

        let energy = module.get_attr(&rays, "energy").unwrap();
        let energy = energy.as_array().unwrap();
        assert_eq!(energy.len(), 16);
        assert!(energy.as_slice::<f64>().unwrap().iter().all(|&e| e == 100.0));

        let events = module.get_attr(&rays, "event_type").unwrap();
        let events = events.as_array().unwrap().as_slice::<i32>().unwrap().to_vec();
        assert_eq!(events[0], EventType::Emitted as i32);
        assert_eq!(events[1], EventType::HitElement as i32);
    }

    #[test]
    fn test_trace_sees_host_writes() {
        let module = module();
        let beamline = sample_beamline().into_host();
        let source = module
            .call_method(&beamline, "item", &[HostValue::from("Matrix Source")])
            .unwrap();

        module.set_attr(&source, "numberOfRays", HostValue::Int(2)).unwrap();
        module.set_attr(&source, "energy", HostValue::Float(250.0)).unwrap();

        let rays = module.call_method(&beamline, "trace", &[]).unwrap();
        assert_eq!(module.get_attr(&rays, "count").unwrap().as_int(), Some(8));
        let energy = module.get_attr(&rays, "energy").unwrap();
        assert_eq!(energy.as_array().unwrap().as_slice::<f64>().unwrap()[0], 250.0);
    }

    #[test]
    fn test_columns_shared_between_reads() {
        let module = module();
        let beamline = sample_beamline().into_host();
        let rays = module.call_method(&beamline, "trace", &[]).unwrap();

        let first = module.get_attr(&rays, "position_z").unwrap();
        let second = module.get_attr(&rays, "position_z").unwrap();
        assert!(first.as_array().unwrap().ptr_eq(second.as_array().unwrap()));
    }

    #[test]
    fn test_tracer_failure_reported() {
        let module = module_with(Rc::new(BrokenTracer));
        let beamline = sample_beamline().into_host();

        let err = module.call_method(&beamline, "trace", &[]).unwrap_err();
        assert_eq!(err.to_string(), "trace failed: no sources");
        assert!(module
            .call_method(&beamline, "trace", &[HostValue::Int(1)])
            .is_err());
    }
}
