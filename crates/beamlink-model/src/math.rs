//! Vectors, matrices and angles used throughout the apparatus model

use beamlink_host::{HostError, HostModule, HostResult, HostValue};
use beamlink_reflect::{Category, Reflect, Structure};

/// Three-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
#[reflect(name = "dvec3")]
pub struct DVec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl DVec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Homogeneous position; `w` is 1 for points
#[derive(Debug, Clone, Copy, PartialEq, Structure)]
#[reflect(name = "dvec4")]
pub struct DVec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl DVec4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Point at `(x, y, z)`
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.0)
    }
}

impl Default for DVec4 {
    fn default() -> Self {
        Self::point(0.0, 0.0, 0.0)
    }
}

/// 4x4 matrix, stored as four columns
///
/// Crosses the host boundary as a whole: reads return a list of four column
/// lists and writes replace every entry at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DMat4 {
    pub columns: [[f64; 4]; 4],
}

impl DMat4 {
    pub const IDENTITY: DMat4 = DMat4 {
        columns: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_columns(columns: [[f64; 4]; 4]) -> Self {
        Self { columns }
    }

    /// Entry at `row` of `column`
    pub fn get(&self, column: usize, row: usize) -> f64 {
        self.columns[column][row]
    }
}

impl Default for DMat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Reflect for DMat4 {
    const CATEGORY: Category = Category::Primitive;

    fn type_name() -> &'static str {
        "dmat4"
    }

    fn to_host(&self) -> HostValue {
        HostValue::List(
            self.columns
                .iter()
                .map(|column| HostValue::List(column.iter().copied().map(HostValue::Float).collect()))
                .collect(),
        )
    }

    fn from_host(_module: &HostModule, value: HostValue) -> HostResult<Self> {
        let columns = value
            .as_list()
            .ok_or_else(|| HostError::mismatch("dmat4", value.type_name()))?;
        if columns.len() != 4 {
            return Err(HostError::ArgumentError(format!(
                "dmat4 needs 4 columns, got {}",
                columns.len()
            )));
        }

        let mut matrix = DMat4::IDENTITY;
        for (target, column) in matrix.columns.iter_mut().zip(columns) {
            let entries = column
                .as_list()
                .filter(|entries| entries.len() == 4)
                .ok_or_else(|| HostError::ArgumentError("each dmat4 column needs 4 numbers".to_string()))?;
            for (slot, entry) in target.iter_mut().zip(entries) {
                *slot = entry
                    .as_float()
                    .ok_or_else(|| HostError::mismatch("float", entry.type_name()))?;
            }
        }
        Ok(matrix)
    }
}

/// Angle in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, Structure)]
#[reflect(name = "Rad")]
pub struct Rad {
    pub rad: f64,
}

impl Rad {
    pub const fn new(rad: f64) -> Self {
        Self { rad }
    }

    pub fn from_degrees(deg: f64) -> Self {
        Self::new(deg.to_radians())
    }

    pub fn to_degrees(self) -> f64 {
        self.rad.to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dmat4_host_shape() {
        let host = Reflect::to_host(&DMat4::IDENTITY);
        let columns = host.as_list().unwrap();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[2].as_list().unwrap()[2], HostValue::Float(1.0));
        assert_eq!(columns[2].as_list().unwrap()[3], HostValue::Float(0.0));
    }

    #[test]
    fn test_dmat4_from_host() {
        let module = HostModule::new("test");
        let mut columns = DMat4::IDENTITY.columns;
        columns[3] = [1.0, 2.0, 3.0, 1.0];
        let host = Reflect::to_host(&DMat4::from_columns(columns));

        let matrix = <DMat4 as Reflect>::from_host(&module, host).unwrap();
        assert_eq!(matrix.get(3, 1), 2.0);
    }

    #[test]
    fn test_dmat4_rejects_bad_shapes() {
        let module = HostModule::new("test");
        let short = HostValue::List(vec![HostValue::List(vec![HostValue::Float(1.0)])]);
        assert!(<DMat4 as Reflect>::from_host(&module, short).is_err());
        assert!(<DMat4 as Reflect>::from_host(&module, HostValue::Float(1.0)).is_err());
    }

    #[test]
    fn test_rad_degrees() {
        let angle = Rad::from_degrees(180.0);
        assert!((angle.rad - std::f64::consts::PI).abs() < 1e-12);
        assert!((angle.to_degrees() - 180.0).abs() < 1e-12);
    }
}
