#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use beamlink_host::{HostModule, HostValue};
use beamlink_model::{
    init_module, Beamline, DesignElement, DesignSource, ElementType, EventType, ModelError, ModuleConfig,
    RayBatch, RayEvent, Tracer,
};

/// Sends every ray of every source straight through each element in turn
#[derive(Default)]
pub struct StraightTracer {
    pub calls: Cell<usize>,
}

impl Tracer for StraightTracer {
    fn trace(&self, beamline: &Beamline) -> Result<RayBatch, ModelError> {
        self.calls.set(self.calls.get() + 1);
        let mut batch = RayBatch::default();
        for (source_id, source) in beamline.sources.iter().enumerate() {
            let origin = source.position();
            for ray_id in 0..source.ray_count() {
                batch.push(RayEvent {
                    position: [origin.x, origin.y, origin.z],
                    direction: [0.0, 0.0, 1.0],
                    energy: source.scalar("energy"),
                    event_type: EventType::Emitted,
                    last_element_id: -1,
                    source_id: source_id as i32,
                    ray_id: ray_id as i32,
                    ..RayEvent::default()
                });
                for (element_id, element) in beamline.elements.iter().enumerate() {
                    let hit = element.position();
                    batch.push(RayEvent {
                        position: [hit.x, hit.y, hit.z],
                        direction: [0.0, 0.0, 1.0],
                        energy: source.scalar("energy"),
                        path_length: hit.z - origin.z,
                        event_type: EventType::HitElement,
                        last_element_id: element_id as i32,
                        source_id: source_id as i32,
                        ray_id: ray_id as i32,
                        path_event_id: element_id as i32 + 1,
                        ..RayEvent::default()
                    });
                }
            }
        }
        Ok(batch)
    }
}

/// Always fails
pub struct BrokenTracer;

impl Tracer for BrokenTracer {
    fn trace(&self, _beamline: &Beamline) -> Result<RayBatch, ModelError> {
        Err(ModelError::Trace("no sources".to_string()))
    }
}

pub fn module() -> HostModule {
    init_module(&ModuleConfig::default(), Rc::new(StraightTracer::default())).unwrap()
}

pub fn module_with(tracer: Rc<dyn Tracer>) -> HostModule {
    init_module(&ModuleConfig::default(), tracer).unwrap()
}

/// Matrix source, a mirror, a slit and an image plane
pub fn sample_beamline() -> Beamline {
    let mut mirror = DesignElement::new("M1", ElementType::PlaneMirror).with_scalar("totalWidth", 50.0);
    mirror.set_position(beamlink_model::DVec4::point(0.0, 0.0, 10000.0));

    let mut slit = DesignElement::new("Slit", ElementType::Slit)
        .with_scalar("openingWidth", 2.0)
        .with_scalar("openingHeight", 1.0);
    slit.set_position(beamlink_model::DVec4::point(0.0, 0.0, 12000.0));

    let mut image_plane = DesignElement::new("ImagePlane", ElementType::ImagePlane);
    image_plane.set_position(beamlink_model::DVec4::point(0.0, 0.0, 13000.0));

    Beamline::new()
        .with_source(
            DesignSource::new("Matrix Source", ElementType::MatrixSource)
                .with_scalar("numberOfRays", 4.0)
                .with_scalar("energy", 100.0),
        )
        .with_element(mirror)
        .with_element(slit)
        .with_element(image_plane)
}

pub fn float(value: HostValue) -> f64 {
    value.as_float().unwrap()
}
