//! Light sources

use beamlink_reflect::{FieldSpec, Structure};

use crate::design::{reflect_structure, scalar_properties, Scalars};
use crate::enums::{
    ElectronEnergyOrientation, ElementType, EnergyDistributionType, EnergySpreadUnit, SourceDist,
    SpreadType,
};
use crate::math::{DMat4, DVec4, Rad};

/// One light source of a beamline, as designed; exposed to the host as `Source`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignSource {
    name: String,
    source_type: ElementType,
    width_dist: SourceDist,
    height_dist: SourceDist,
    hor_dist: SourceDist,
    ver_dist: SourceDist,
    hor_divergence: Rad,
    ver_divergence: Rad,
    energy_spread_type: SpreadType,
    energy_distribution_type: EnergyDistributionType,
    energy_spread_unit: EnergySpreadUnit,
    electron_energy_orientation: ElectronEnergyOrientation,
    position: DVec4,
    orientation: DMat4,
    max_opening_angle: Rad,
    min_opening_angle: Rad,
    delta_opening_angle: Rad,
    scalars: Scalars,
}

impl DesignSource {
    pub fn new(name: impl Into<String>, source_type: ElementType) -> Self {
        Self {
            name: name.into(),
            source_type,
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

    pub fn source_type(&self) -> ElementType {
        self.source_type
    }

    pub fn position(&self) -> DVec4 {
        self.position
    }

    pub fn orientation(&self) -> DMat4 {
        self.orientation
    }

    pub fn energy_spread_type(&self) -> SpreadType {
        self.energy_spread_type
    }

    pub fn scalar(&self, key: &str) -> f64 {
        self.scalars.get(key)
    }

    pub fn set_scalar(&mut self, key: &'static str, value: f64) {
        self.scalars.set(key, value);
    }

    /// Rays to emit; `numberOfRays` rounded and clamped at zero
    pub fn ray_count(&self) -> usize {
        self.scalars.get("numberOfRays").round().max(0.0) as usize
    }
}

reflect_structure!(DesignSource, "Source");

impl Structure for DesignSource {
    fn fields() -> Vec<FieldSpec<Self>> {
        let mut fields = vec![
            FieldSpec::property("name", |s: &Self| s.name.clone(), |s: &mut Self, v: String| s.name = v),
            FieldSpec::property("type", |s: &Self| s.source_type, |s: &mut Self, v| s.source_type = v),
            FieldSpec::property("widthDist", |s: &Self| s.width_dist, |s: &mut Self, v| s.width_dist = v),
            FieldSpec::property("heightDist", |s: &Self| s.height_dist, |s: &mut Self, v| s.height_dist = v),
            FieldSpec::property("horDist", |s: &Self| s.hor_dist, |s: &mut Self, v| s.hor_dist = v),
            FieldSpec::property("verDist", |s: &Self| s.ver_dist, |s: &mut Self, v| s.ver_dist = v),
            FieldSpec::property("horDivergence", |s: &Self| s.hor_divergence, |s: &mut Self, v| s.hor_divergence = v),
            FieldSpec::property("verDivergence", |s: &Self| s.ver_divergence, |s: &mut Self, v| s.ver_divergence = v),
            FieldSpec::property(
                "energySpreadType",
                |s: &Self| s.energy_spread_type,
                |s: &mut Self, v| s.energy_spread_type = v,
            ),
            FieldSpec::property(
                "energyDistributionType",
                |s: &Self| s.energy_distribution_type,
                |s: &mut Self, v| s.energy_distribution_type = v,
            ),
            FieldSpec::property(
                "energySpreadUnit",
                |s: &Self| s.energy_spread_unit,
                |s: &mut Self, v| s.energy_spread_unit = v,
            ),
            FieldSpec::property(
                "electronEnergyOrientation",
                |s: &Self| s.electron_energy_orientation,
                |s: &mut Self, v| s.electron_energy_orientation = v,
            ),
            FieldSpec::property("position", |s: &Self| s.position, |s: &mut Self, v: DVec4| {
                s.position = DVec4 { w: 1.0, ..v }
            }),
            FieldSpec::property("orientation", |s: &Self| s.orientation, |s: &mut Self, v| s.orientation = v),
            FieldSpec::property(
                "maxOpeningAngle",
                |s: &Self| s.max_opening_angle,
                |s: &mut Self, v| s.max_opening_angle = v,
            ),
            FieldSpec::property(
                "minOpeningAngle",
                |s: &Self| s.min_opening_angle,
                |s: &mut Self, v| s.min_opening_angle = v,
            ),
            FieldSpec::property(
                "deltaOpeningAngle",
                |s: &Self| s.delta_opening_angle,
                |s: &mut Self, v| s.delta_opening_angle = v,
            ),
        ];
        fields.extend(scalar_properties![
            "verEBeamDivergence",
            "sourceDepth",
            "sourceHeight",
            "sourceWidth",
            "bendingRadius",
            "energySpread",
            "electronEnergy",
            "numberOfSeparateEnergies",
            "energy",
            "photonFlux",
            "numberOfRays",
            "numOfCircles",
            "sigmaType",
            "undulatorLength",
            "electronSigmaX",
            "electronSigmaXs",
            "electronSigmaY",
            "electronSigmaYs",
        ]);
        fields
    }
}
