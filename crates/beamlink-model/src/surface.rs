//! Optical surface shapes

use beamlink_reflect::{Structure, Variant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
pub struct Plane {}

/// General second-order surface
#[derive(Debug, Clone, Copy, PartialEq, Structure)]
pub struct Quadric {
    pub icurv: i32,
    pub a11: f64,
    pub a12: f64,
    pub a13: f64,
    pub a14: f64,
    pub a22: f64,
    pub a23: f64,
    pub a24: f64,
    pub a33: f64,
    pub a34: f64,
    pub a44: f64,
}

impl Default for Quadric {
    fn default() -> Self {
        Self {
            icurv: 1,
            a11: 0.0,
            a12: 0.0,
            a13: 0.0,
            a14: 0.0,
            a22: 0.0,
            a23: 0.0,
            a24: 0.0,
            a33: 0.0,
            a34: 0.0,
            a44: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
pub struct Toroid {
    #[reflect(rename = "longRadius")]
    pub long_radius: f64,
    #[reflect(rename = "shortRadius")]
    pub short_radius: f64,
    /// 0 convex, 1 concave
    #[reflect(rename = "toroidType")]
    pub toroid_type: i32,
}

/// Third-order surface used by expert mirrors
#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
pub struct Cubic {
    pub a11: f64,
    pub a12: f64,
    pub a13: f64,
    pub a14: f64,
    pub a22: f64,
    pub a23: f64,
    pub a24: f64,
    pub a33: f64,
    pub a34: f64,
    pub a44: f64,
    pub b12: f64,
    pub b13: f64,
    pub b21: f64,
    pub b23: f64,
    pub b31: f64,
    pub b32: f64,
    pub psi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Variant)]
pub enum Surface {
    Plane(Plane),
    Quadric(Quadric),
    Toroid(Toroid),
    Cubic(Cubic),
}

impl Default for Surface {
    fn default() -> Self {
        Surface::Plane(Plane {})
    }
}
