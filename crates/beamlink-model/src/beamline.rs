//! Beamlines and the `Beamline` host type
//!
//! On the host side a beamline holds its elements and sources as plain host
//! objects. `elements`, `sources` and `item(name)` hand out those same
//! objects, so `beamline.item("Slit").position.z = 5` edits the beamline in
//! place. `trace()` snapshots the current state and hands it to a [`Tracer`].

use std::rc::Rc;

use beamlink_host::{HostError, HostModule, HostObject, HostResult, HostType, HostValue, Property};
use beamlink_reflect::{binder, Reflect};

use crate::element::DesignElement;
use crate::error::ModelError;
use crate::rays::{RayBatch, Rays};
use crate::source::DesignSource;

/// Ray tracing engine; supplied by the embedding application
pub trait Tracer {
    /// Trace every source of `beamline` through its elements
    fn trace(&self, beamline: &Beamline) -> Result<RayBatch, ModelError>;
}

/// Ordered elements and sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Beamline {
    pub elements: Vec<DesignElement>,
    pub sources: Vec<DesignSource>,
}

impl Beamline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, element: DesignElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_source(mut self, source: DesignSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn element(&self, name: &str) -> Option<&DesignElement> {
        self.elements.iter().find(|element| element.name() == name)
    }

    pub fn source(&self, name: &str) -> Option<&DesignSource> {
        self.sources.iter().find(|source| source.name() == name)
    }

    /// Hand the beamline to the host; every element and source becomes a
    /// host-resident object owned by the beamline
    pub fn into_host(self) -> HostValue {
        let shared = SharedBeamline {
            elements: self.elements.into_iter().map(binder::resident).collect(),
            sources: self.sources.into_iter().map(binder::resident).collect(),
        };
        HostValue::Object(HostObject::new("Beamline", shared))
    }

    /// Snapshot a host beamline
    pub fn from_host(module: &HostModule, value: &HostValue) -> HostResult<Self> {
        let shared = value.expect_object("Beamline")?.downcast_ref::<SharedBeamline>()?;
        shared.snapshot(module)
    }
}

/// Host-side storage of a beamline
struct SharedBeamline {
    elements: Vec<HostObject>,
    sources: Vec<HostObject>,
}

impl SharedBeamline {
    fn item(&self, name: &str) -> HostResult<HostObject> {
        for element in &self.elements {
            if element.resident_cell::<DesignElement>()?.borrow().name() == name {
                return Ok(element.clone());
            }
        }
        for source in &self.sources {
            if source.resident_cell::<DesignSource>()?.borrow().name() == name {
                return Ok(source.clone());
            }
        }
        Err(ModelError::ItemNotFound(name.to_string()).into())
    }

    fn snapshot(&self, module: &HostModule) -> HostResult<Beamline> {
        let elements = self
            .elements
            .iter()
            .map(|obj| DesignElement::from_host(module, HostValue::Object(obj.clone())))
            .collect::<HostResult<Vec<_>>>()?;
        let sources = self
            .sources
            .iter()
            .map(|obj| DesignSource::from_host(module, HostValue::Object(obj.clone())))
            .collect::<HostResult<Vec<_>>>()?;
        Ok(Beamline { elements, sources })
    }
}

fn object_list(objects: &[HostObject]) -> HostValue {
    HostValue::List(objects.iter().cloned().map(HostValue::Object).collect())
}

/// Host type `Beamline`
pub fn beamline_type(tracer: Rc<dyn Tracer>) -> HostType {
    HostType::new("Beamline")
        .doc("Optical elements and light sources in beam order")
        .property(Property::new(
            "elements",
            Rc::new(|_, obj| Ok(object_list(&obj.downcast_ref::<SharedBeamline>()?.elements))),
        ))
        .property(Property::new(
            "sources",
            Rc::new(|_, obj| Ok(object_list(&obj.downcast_ref::<SharedBeamline>()?.sources))),
        ))
        .method(
            "item",
            Rc::new(|_, obj, args| {
                let name = match args {
                    [HostValue::Str(name)] => name,
                    _ => return Err(HostError::from("item() takes one name")),
                };
                let found = obj.downcast_ref::<SharedBeamline>()?.item(name)?;
                Ok(HostValue::Object(found))
            }),
        )
        .method(
            "trace",
            Rc::new(move |module, obj, args| {
                if !args.is_empty() {
                    return Err(HostError::from("trace() takes no arguments"));
                }
                let beamline = obj.downcast_ref::<SharedBeamline>()?.snapshot(module)?;
                tracing::debug!(
                    elements = beamline.elements.len(),
                    sources = beamline.sources.len(),
                    "tracing beamline"
                );
                let batch = tracer.trace(&beamline)?;
                Ok(Rays::from_batch(batch)?.into_host())
            }),
        )
}
