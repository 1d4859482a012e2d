//! Shared fixture types for the integration tests

#![allow(dead_code)]

use beamlink_reflect::{Enumeration, FieldSpec, Structure, Variant};

#[derive(Debug, Clone, Default, PartialEq, Structure)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Structure)]
pub struct Plane {}

#[derive(Debug, Clone, Default, PartialEq, Structure)]
pub struct Quadric {
    pub icurv: i32,
    pub a11: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Structure)]
pub struct Toroid {
    #[reflect(rename = "longRadius", default = 10000.0)]
    pub long_radius: f64,
    #[reflect(rename = "shortRadius", default = 1000.0)]
    pub short_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Variant)]
pub enum Surface {
    Plane(Plane),
    Quadric(Quadric),
    Toroid(Toroid),
}

impl Default for Surface {
    fn default() -> Self {
        Surface::Plane(Plane {})
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Enumeration)]
pub enum Finish {
    Matte = 0,
    Polished = 1,
    #[reflect(rename = "MIRROR")]
    FrontSurfaceMirror = 5,
}

#[derive(Debug, Clone, Default, PartialEq, Structure)]
pub struct Mount {
    pub offset: Vec3,
    pub tilt: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Structure)]
#[reflect(name = "Element")]
pub struct Mirror {
    pub name: String,
    pub position: Vec3,
    pub mount: Mount,
    pub surface: Surface,
    pub finish: Finish,
    #[reflect(skip)]
    pub cache_key: u64,
}

impl Default for Finish {
    fn default() -> Self {
        Finish::Matte
    }
}

/// Structure with private state, exposed through getter/setter properties
#[derive(Debug, Clone, PartialEq)]
pub struct Aperture {
    diameter_mm: f64,
    center: Vec3,
}

impl Default for Aperture {
    fn default() -> Self {
        Self {
            diameter_mm: 25.4,
            center: Vec3::default(),
        }
    }
}

impl Aperture {
    pub fn diameter(&self) -> f64 {
        self.diameter_mm
    }

    pub fn set_diameter(&mut self, diameter: f64) {
        self.diameter_mm = diameter.max(0.0);
    }

    pub fn center(&self) -> Vec3 {
        self.center.clone()
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

impl beamlink_reflect::Reflect for Aperture {
    const CATEGORY: beamlink_reflect::Category = beamlink_reflect::Category::Structure;

    fn type_name() -> &'static str {
        "Aperture"
    }

    fn to_host(&self) -> beamlink_reflect::HostValue {
        beamlink_reflect::binder::object_to_host(self)
    }

    fn from_host(
        module: &beamlink_reflect::HostModule,
        value: beamlink_reflect::HostValue,
    ) -> beamlink_reflect::HostResult<Self> {
        beamlink_reflect::binder::object_from_host(module, value)
    }

    fn register(module: &mut beamlink_reflect::HostModule) -> Result<(), beamlink_reflect::ReflectError> {
        beamlink_reflect::register_structure::<Self>(module)
    }

    fn expose(target: beamlink_reflect::Ref<Self>) -> beamlink_reflect::HostResult<beamlink_reflect::HostValue> {
        beamlink_reflect::binder::expose_structure(target)
    }
}

impl Structure for Aperture {
    fn fields() -> Vec<FieldSpec<Self>> {
        vec![
            FieldSpec::property("diameter", Aperture::diameter, Aperture::set_diameter),
            FieldSpec::property("center", Aperture::center, Aperture::set_center),
        ]
    }
}
