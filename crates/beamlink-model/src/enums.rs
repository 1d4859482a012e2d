//! Enumerations exported by the apparatus module
//!
//! Host member names follow the upper-case convention of the module
//! (`ElementType.PLANE_MIRROR`); chemical elements keep their symbols.

use beamlink_host::HostModule;
use beamlink_reflect::{register_enum, Enumeration, ReflectError};

/// Surface or bulk material; elements use their atomic number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
pub enum Material {
    Reflective = -2,
    #[default]
    Vacuum = -1,
    H = 1,
    #[reflect(rename = "He")]
    He = 2,
    C = 6,
    N = 7,
    O = 8,
    #[reflect(rename = "Al")]
    Al = 13,
    #[reflect(rename = "Si")]
    Si = 14,
    #[reflect(rename = "Cr")]
    Cr = 24,
    #[reflect(rename = "Ni")]
    Ni = 28,
    #[reflect(rename = "Cu")]
    Cu = 29,
    #[reflect(rename = "Mo")]
    Mo = 42,
    #[reflect(rename = "Rh")]
    Rh = 45,
    #[reflect(rename = "Pd")]
    Pd = 46,
    W = 74,
    #[reflect(rename = "Pt")]
    Pt = 78,
    #[reflect(rename = "Au")]
    Au = 79,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
pub enum ElementType {
    #[default]
    Undefined,
    ImagePlane,
    ConeMirror,
    Crystal,
    #[reflect(rename = "CYLINDRICAL_MIRROR")]
    CylinderMirror,
    EllipsoidMirror,
    ExpertsMirror,
    Foil,
    ParaboloidMirror,
    PlaneGrating,
    PlaneMirror,
    ReflectionZoneplate,
    Slit,
    SphereGrating,
    Sphere,
    SphereMirror,
    ToroidMirror,
    ToroidGrating,
    PointSource,
    MatrixSource,
    DipoleSource,
    PixelSource,
    CircleSource,
    SimpleUndulatorSource,
    RayListSource,
}

impl ElementType {
    pub fn is_source(self) -> bool {
        matches!(
            self,
            ElementType::PointSource
                | ElementType::MatrixSource
                | ElementType::DipoleSource
                | ElementType::PixelSource
                | ElementType::CircleSource
                | ElementType::SimpleUndulatorSource
                | ElementType::RayListSource
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
pub enum SourceDist {
    #[default]
    Uniform,
    Gaussian,
    Thirds,
    Circle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
pub enum SpreadType {
    #[default]
    HardEdge,
    SoftEdge,
    SeparateEnergies,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
pub enum EnergyDistributionType {
    File,
    #[default]
    Values,
    Total,
    Param,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
pub enum EnergySpreadUnit {
    #[default]
    #[reflect(rename = "EV")]
    ElectronVolt,
    Percent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
pub enum ElectronEnergyOrientation {
    #[default]
    #[reflect(rename = "Clockwise")]
    Clockwise,
    #[reflect(rename = "Counterclockwise")]
    Counterclockwise,
}

/// What happened to a ray at one recorded event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
pub enum EventType {
    #[default]
    Uninitialized = 0,
    Emitted = 1,
    HitElement = 2,
    FatalError = 3,
    Absorbed = 4,
    BeyondHorizon = 5,
    TooManyEvents = 6,
}

/// Declare every enumeration and export its members into the module namespace
pub fn register_enums(module: &mut HostModule) -> Result<(), ReflectError> {
    register_enum::<Material>(module)?;
    register_enum::<SourceDist>(module)?;
    register_enum::<SpreadType>(module)?;
    register_enum::<EnergyDistributionType>(module)?;
    register_enum::<EnergySpreadUnit>(module)?;
    register_enum::<ElectronEnergyOrientation>(module)?;
    register_enum::<ElementType>(module)?;
    register_enum::<EventType>(module)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_names() {
        assert_eq!(ElementType::PlaneMirror.member_name(), "PLANE_MIRROR");
        assert_eq!(ElementType::CylinderMirror.member_name(), "CYLINDRICAL_MIRROR");
        assert_eq!(Material::Au.member_name(), "Au");
        assert_eq!(Material::Vacuum.member_name(), "VACUUM");
        assert_eq!(EnergySpreadUnit::ElectronVolt.member_name(), "EV");
        assert_eq!(SpreadType::SeparateEnergies.member_name(), "SEPARATE_ENERGIES");
    }

    #[test]
    fn test_discriminants() {
        assert_eq!(Material::Reflective.discriminant(), -2);
        assert_eq!(Material::Au.discriminant(), 79);
        assert_eq!(ElementType::Slit.discriminant(), 12);
        assert_eq!(EventType::TooManyEvents.discriminant(), 6);
    }

    #[test]
    fn test_sources_classified() {
        assert!(ElementType::MatrixSource.is_source());
        assert!(!ElementType::Slit.is_source());
    }
}
