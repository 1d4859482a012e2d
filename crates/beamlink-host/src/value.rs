//! HostValue: the dynamically-typed value every host operation traffics in
//!
//! Primitives are held inline and copied on every read. Objects are shared
//! handles (see [`HostObject`]); cloning a `HostValue::Object` clones the
//! handle, never the payload.

use std::fmt;

use crate::buffer::ArrayBuffer;
use crate::error::{HostError, HostResult};
use crate::object::HostObject;

/// A member of a host-declared enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Enumeration name (e.g. "Material")
    pub enum_name: String,
    /// Member name (e.g. "VACUUM")
    pub name: String,
    /// Underlying integer value
    pub value: i64,
}

impl EnumMember {
    /// Create a new member
    pub fn new(enum_name: impl Into<String>, name: impl Into<String>, value: i64) -> Self {
        Self {
            enum_name: enum_name.into(),
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_name, self.name)
    }
}

/// Runtime value in the host environment
#[derive(Clone, Default)]
pub enum HostValue {
    /// Absence of a value
    #[default]
    None,
    /// Boolean
    Bool(bool),
    /// Integer (all integer widths widen to i64)
    Int(i64),
    /// Float (all float widths widen to f64)
    Float(f64),
    /// Text
    Str(String),
    /// Enumeration member
    Enum(EnumMember),
    /// Heterogeneous list
    List(Vec<HostValue>),
    /// Numeric array sharing a native buffer
    Array(ArrayBuffer),
    /// Object handle (plain value or proxy)
    Object(HostObject),
}

impl HostValue {
    // ========== Safe Accessors (never panic) ==========

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            HostValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float, widening integers the way host arithmetic does
    pub fn as_float(&self) -> Option<f64> {
        match self {
            HostValue::Float(f) => Some(*f),
            HostValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as enumeration member
    pub fn as_enum(&self) -> Option<&EnumMember> {
        match self {
            HostValue::Enum(m) => Some(m),
            _ => None,
        }
    }

    /// Get as list
    pub fn as_list(&self) -> Option<&[HostValue]> {
        match self {
            HostValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get as numeric array
    pub fn as_array(&self) -> Option<&ArrayBuffer> {
        match self {
            HostValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as object handle
    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            HostValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as object handle, or a type mismatch naming `expected`
    pub fn expect_object(&self, expected: &str) -> HostResult<&HostObject> {
        self.as_object()
            .ok_or_else(|| HostError::mismatch(expected, self.type_name()))
    }

    /// Check for `None`
    pub fn is_none(&self) -> bool {
        matches!(self, HostValue::None)
    }

    /// Host type name, as host code would see it
    pub fn type_name(&self) -> String {
        match self {
            HostValue::None => "NoneType".to_string(),
            HostValue::Bool(_) => "bool".to_string(),
            HostValue::Int(_) => "int".to_string(),
            HostValue::Float(_) => "float".to_string(),
            HostValue::Str(_) => "str".to_string(),
            HostValue::Enum(m) => m.enum_name.clone(),
            HostValue::List(_) => "list".to_string(),
            HostValue::Array(a) => a.type_name(),
            HostValue::Object(o) => o.type_name().to_string(),
        }
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::None, HostValue::None) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Int(a), HostValue::Int(b)) => a == b,
            (HostValue::Float(a), HostValue::Float(b)) => a == b,
            (HostValue::Int(a), HostValue::Float(b)) | (HostValue::Float(b), HostValue::Int(a)) => {
                (*a as f64) == *b
            }
            (HostValue::Str(a), HostValue::Str(b)) => a == b,
            (HostValue::Enum(a), HostValue::Enum(b)) => a == b,
            (HostValue::List(a), HostValue::List(b)) => a == b,
            (HostValue::Array(a), HostValue::Array(b)) => a.ptr_eq(b),
            // Object identity, not structural equality
            (HostValue::Object(a), HostValue::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::None => write!(f, "None"),
            HostValue::Bool(b) => write!(f, "{}", b),
            HostValue::Int(i) => write!(f, "{}", i),
            HostValue::Float(x) => write!(f, "{:?}", x),
            HostValue::Str(s) => write!(f, "{:?}", s),
            HostValue::Enum(m) => write!(f, "{}", m),
            HostValue::List(items) => f.debug_list().entries(items).finish(),
            HostValue::Array(a) => write!(f, "<{} len={}>", a.type_name(), a.len()),
            HostValue::Object(o) => write!(f, "<{} object>", o.type_name()),
        }
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<i64> for HostValue {
    fn from(i: i64) -> Self {
        HostValue::Int(i)
    }
}

impl From<i32> for HostValue {
    fn from(i: i32) -> Self {
        HostValue::Int(i as i64)
    }
}

impl From<f64> for HostValue {
    fn from(f: f64) -> Self {
        HostValue::Float(f)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::Str(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::Str(s)
    }
}

impl From<HostObject> for HostValue {
    fn from(o: HostObject) -> Self {
        HostValue::Object(o)
    }
}

impl From<ArrayBuffer> for HostValue {
    fn from(a: ArrayBuffer) -> Self {
        HostValue::Array(a)
    }
}

impl From<EnumMember> for HostValue {
    fn from(m: EnumMember) -> Self {
        HostValue::Enum(m)
    }
}
