//! Design elements: mirrors, gratings, slits and image planes

use beamlink_reflect::{FieldSpec, Structure};

use crate::cutout::Cutout;
use crate::design::{reflect_structure, scalar_properties, Scalars};
use crate::enums::{ElementType, Material};
use crate::math::{DMat4, DVec4, Rad};
use crate::surface::Surface;

/// Figure errors of an optical surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
pub struct SlopeError {
    pub sag: f64,
    pub mer: f64,
    #[reflect(rename = "thermalDistortionAmp")]
    pub thermal_distortion_amp: f64,
    #[reflect(rename = "thermalDistortionSigmaX")]
    pub thermal_distortion_sigma_x: f64,
    #[reflect(rename = "thermalDistortionSigmaZ")]
    pub thermal_distortion_sigma_z: f64,
    #[reflect(rename = "cylindricalBowingAmp")]
    pub cylindrical_bowing_amp: f64,
    #[reflect(rename = "cylindricalBowingRadius")]
    pub cylindrical_bowing_radius: f64,
}

/// One optical element of a beamline, as designed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignElement {
    name: String,
    element_type: ElementType,
    position: DVec4,
    orientation: DMat4,
    slope_error: SlopeError,
    azimuthal_angle: Rad,
    grazing_inc_angle: Rad,
    deviation_angle: Rad,
    material: Material,
    cutout: Cutout,
    experts_optics: Surface,
    scalars: Scalars,
}

impl DesignElement {
    pub fn new(name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            element_type,
            ..Self::default()
        }
    }

    pub fn with_scalar(mut self, key: &'static str, value: f64) -> Self {
        self.scalars.set(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn set_element_type(&mut self, element_type: ElementType) {
        self.element_type = element_type;
    }

    pub fn position(&self) -> DVec4 {
        self.position
    }

    /// The position is a point, so `w` is forced to 1
    pub fn set_position(&mut self, position: DVec4) {
        self.position = DVec4 { w: 1.0, ..position };
    }

    pub fn orientation(&self) -> DMat4 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: DMat4) {
        self.orientation = orientation;
    }

    pub fn slope_error(&self) -> SlopeError {
        self.slope_error
    }

    pub fn set_slope_error(&mut self, slope_error: SlopeError) {
        self.slope_error = slope_error;
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn cutout(&self) -> Cutout {
        self.cutout
    }

    pub fn set_cutout(&mut self, cutout: Cutout) {
        self.cutout = cutout;
    }

    pub fn surface(&self) -> Surface {
        self.experts_optics
    }

    pub fn set_surface(&mut self, surface: Surface) {
        self.experts_optics = surface;
    }

    pub fn scalar(&self, key: &str) -> f64 {
        self.scalars.get(key)
    }

    pub fn set_scalar(&mut self, key: &'static str, value: f64) {
        self.scalars.set(key, value);
    }
}

reflect_structure!(DesignElement, "DesignElement");

impl Structure for DesignElement {
    fn fields() -> Vec<FieldSpec<Self>> {
        let mut fields = vec![
            FieldSpec::property("name", |e: &Self| e.name.clone(), |e: &mut Self, v: String| e.set_name(v)),
            FieldSpec::property("type", |e: &Self| e.element_type, Self::set_element_type),
            FieldSpec::property("position", |e: &Self| e.position, Self::set_position),
            FieldSpec::property("orientation", |e: &Self| e.orientation, Self::set_orientation),
            FieldSpec::property("slopeError", |e: &Self| e.slope_error, Self::set_slope_error),
            FieldSpec::property(
                "azimuthalAngle",
                |e: &Self| e.azimuthal_angle,
                |e: &mut Self, v: Rad| e.azimuthal_angle = v,
            ),
            FieldSpec::property("material", |e: &Self| e.material, Self::set_material),
            FieldSpec::property("cutout", |e: &Self| e.cutout, Self::set_cutout),
            FieldSpec::property("expertsOptics", |e: &Self| e.experts_optics, Self::set_surface),
            FieldSpec::property(
                "grazingIncAngle",
                |e: &Self| e.grazing_inc_angle,
                |e: &mut Self, v: Rad| e.grazing_inc_angle = v,
            ),
            FieldSpec::property(
                "deviationAngle",
                |e: &Self| e.deviation_angle,
                |e: &mut Self, v: Rad| e.deviation_angle = v,
            ),
        ];
        fields.extend(scalar_properties![
            "distancePreceding",
            "totalHeight",
            "totalWidth",
            "totalLength",
            "openingWidth",
            "openingHeight",
            "entranceArmLength",
            "exitArmLength",
            "radius",
            "lineDensity",
            "shortRadius",
            "longRadius",
            "designEnergy",
            "orderOfDiffraction",
            "thicknessSubstrate",
            "roughnessSubstrate",
        ]);
        fields
    }
}
