//! Conversions between host values and native primitives
//!
//! `FromHost` is strict about kinds (a string is never a number) but follows
//! host arithmetic for widths: an int is accepted where a float is expected,
//! and integers are range-checked when narrowed.

use crate::buffer::{ArrayBuffer, Element};
use crate::error::{HostError, HostResult};
use crate::value::HostValue;

/// Extract a native value from a host value
pub trait FromHost: Sized {
    /// Convert, failing with a type mismatch or range error
    fn from_host(value: HostValue) -> HostResult<Self>;
}

/// Produce a host value from a native value
pub trait ToHost {
    /// Convert (always succeeds; a copy is made)
    fn to_host(&self) -> HostValue;
}

impl FromHost for HostValue {
    fn from_host(value: HostValue) -> HostResult<Self> {
        Ok(value)
    }
}

impl ToHost for HostValue {
    fn to_host(&self) -> HostValue {
        self.clone()
    }
}

impl FromHost for bool {
    fn from_host(value: HostValue) -> HostResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| HostError::mismatch("bool", value.type_name()))
    }
}

impl ToHost for bool {
    fn to_host(&self) -> HostValue {
        HostValue::Bool(*self)
    }
}

impl FromHost for i64 {
    fn from_host(value: HostValue) -> HostResult<Self> {
        match &value {
            HostValue::Int(i) => Ok(*i),
            HostValue::Enum(member) => Ok(member.value),
            _ => Err(HostError::mismatch("int", value.type_name())),
        }
    }
}

impl ToHost for i64 {
    fn to_host(&self) -> HostValue {
        HostValue::Int(*self)
    }
}

macro_rules! narrow_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromHost for $ty {
            fn from_host(value: HostValue) -> HostResult<Self> {
                let wide = i64::from_host(value)?;
                <$ty>::try_from(wide).map_err(|_| HostError::OutOfRange {
                    target: stringify!($ty).to_string(),
                    value: wide.to_string(),
                })
            }
        }

        impl ToHost for $ty {
            fn to_host(&self) -> HostValue {
                HostValue::Int(i64::from(*self))
            }
        }
    )*};
}

narrow_int!(i8, i16, i32, u8, u16, u32);

impl FromHost for u64 {
    fn from_host(value: HostValue) -> HostResult<Self> {
        let wide = i64::from_host(value)?;
        u64::try_from(wide).map_err(|_| HostError::OutOfRange {
            target: "u64".to_string(),
            value: wide.to_string(),
        })
    }
}

impl ToHost for u64 {
    fn to_host(&self) -> HostValue {
        // Values past i64::MAX are clamped; the host has no unsigned integers
        HostValue::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl FromHost for f64 {
    fn from_host(value: HostValue) -> HostResult<Self> {
        value
            .as_float()
            .ok_or_else(|| HostError::mismatch("float", value.type_name()))
    }
}

impl ToHost for f64 {
    fn to_host(&self) -> HostValue {
        HostValue::Float(*self)
    }
}

impl FromHost for f32 {
    fn from_host(value: HostValue) -> HostResult<Self> {
        f64::from_host(value).map(|f| f as f32)
    }
}

impl ToHost for f32 {
    fn to_host(&self) -> HostValue {
        HostValue::Float(f64::from(*self))
    }
}

impl FromHost for String {
    fn from_host(value: HostValue) -> HostResult<Self> {
        match value {
            HostValue::Str(s) => Ok(s),
            other => Err(HostError::mismatch("str", other.type_name())),
        }
    }
}

impl ToHost for String {
    fn to_host(&self) -> HostValue {
        HostValue::Str(self.clone())
    }
}

impl<T: FromHost> FromHost for Vec<T> {
    fn from_host(value: HostValue) -> HostResult<Self> {
        match value {
            HostValue::List(items) => items.into_iter().map(T::from_host).collect(),
            other => Err(HostError::mismatch("list", other.type_name())),
        }
    }
}

impl<T: ToHost> ToHost for Vec<T> {
    fn to_host(&self) -> HostValue {
        HostValue::List(self.iter().map(ToHost::to_host).collect())
    }
}

impl<T: FromHost> FromHost for Option<T> {
    fn from_host(value: HostValue) -> HostResult<Self> {
        match value {
            HostValue::None => Ok(None),
            other => T::from_host(other).map(Some),
        }
    }
}

impl<T: ToHost> ToHost for Option<T> {
    fn to_host(&self) -> HostValue {
        match self {
            Some(v) => v.to_host(),
            None => HostValue::None,
        }
    }
}

/// Copy the contents of a host array buffer into a native vector
pub fn array_to_vec<T: Element>(value: &HostValue) -> HostResult<Vec<T>> {
    let buffer: &ArrayBuffer = value
        .as_array()
        .ok_or_else(|| HostError::mismatch("Array", value.type_name()))?;
    Ok(buffer.as_slice::<T>()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnumMember;

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(f64::from_host(HostValue::Int(3)).unwrap(), 3.0);
        assert!(i64::from_host(HostValue::Float(3.0)).is_err());
    }

    #[test]
    fn test_narrowing_is_range_checked() {
        assert_eq!(i32::from_host(HostValue::Int(-5)).unwrap(), -5);
        let err = u32::from_host(HostValue::Int(-1)).unwrap_err();
        assert_eq!(err.to_string(), "Value -1 is out of range for u32");
    }

    #[test]
    fn test_enum_members_read_as_integers() {
        let member = EnumMember::new("Material", "REFLECTIVE", -2);
        assert_eq!(i32::from_host(HostValue::Enum(member)).unwrap(), -2);
    }

    #[test]
    fn test_kind_mismatch_names_both_types() {
        let err = String::from_host(HostValue::Bool(true)).unwrap_err();
        assert_eq!(err.to_string(), "Type mismatch: expected str, got bool");
    }

    #[test]
    fn test_lists_and_options() {
        let list = HostValue::List(vec![HostValue::Int(1), HostValue::Float(2.5)]);
        assert_eq!(Vec::<f64>::from_host(list).unwrap(), vec![1.0, 2.5]);
        assert_eq!(Option::<bool>::from_host(HostValue::None).unwrap(), None);
        assert_eq!(Some(2.0f64).to_host(), HostValue::Float(2.0));
    }
}
