//! Cutouts: the outline of an element's usable area

use beamlink_reflect::{Structure, Variant};

/// No outline; every ray hits
#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
pub struct Unlimited {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
pub struct Rect {
    pub width: f64,
    pub length: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
pub struct Elliptical {
    pub diameter_x: f64,
    pub diameter_z: f64,
}

/// `width_a` at the near edge, `width_b` at the far edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
pub struct Trapezoid {
    #[reflect(rename = "widthA")]
    pub width_a: f64,
    #[reflect(rename = "widthB")]
    pub width_b: f64,
    pub length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Variant)]
pub enum Cutout {
    Unlimited(Unlimited),
    Rect(Rect),
    Elliptical(Elliptical),
    Trapezoid(Trapezoid),
}

impl Default for Cutout {
    fn default() -> Self {
        Cutout::Unlimited(Unlimited {})
    }
}

impl Cutout {
    /// Width and length of the bounding box; `None` when unlimited
    pub fn extent(&self) -> Option<(f64, f64)> {
        match self {
            Cutout::Unlimited(_) => None,
            Cutout::Rect(rect) => Some((rect.width, rect.length)),
            Cutout::Elliptical(ellipse) => Some((ellipse.diameter_x, ellipse.diameter_z)),
            Cutout::Trapezoid(trapezoid) => Some((trapezoid.width_a.max(trapezoid.width_b), trapezoid.length)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent() {
        assert_eq!(Cutout::default().extent(), None);
        let trapezoid = Cutout::Trapezoid(Trapezoid {
            width_a: 2.0,
            width_b: 5.0,
            length: 10.0,
        });
        assert_eq!(trapezoid.extent(), Some((5.0, 10.0)));
    }
}
