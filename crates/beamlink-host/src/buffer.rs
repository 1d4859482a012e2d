//! Numeric array buffers handed to the host without copying
//!
//! An `ArrayBuffer` takes ownership of a `Vec<T>` once and from then on only
//! hands out shared views. Cloning a buffer clones an `Arc`, never the data.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{HostError, HostResult};

/// Element type of an array buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 64-bit float
    F64,
    /// 32-bit signed integer
    I32,
    /// Pair of 64-bit floats (real, imaginary)
    Complex128,
}

impl DType {
    /// Host-visible element name
    pub fn name(&self) -> &'static str {
        match self {
            DType::F64 => "double",
            DType::I32 => "int",
            DType::Complex128 => "complex[double]",
        }
    }

    /// Size of one element in bytes
    pub fn itemsize(&self) -> usize {
        match self {
            DType::F64 => 8,
            DType::I32 => 4,
            DType::Complex128 => 16,
        }
    }
}

/// Complex number with the memory layout of `std::complex<double>`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex64 {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex64 {
    /// Create from parts
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Magnitude
    pub fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }
}

/// Marker for types that may live in an `ArrayBuffer`
pub trait Element: Copy + Send + Sync + 'static {
    /// Element type tag
    const DTYPE: DType;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;
}

impl Element for Complex64 {
    const DTYPE: DType = DType::Complex128;
}

/// Shared, immutable numeric column
#[derive(Clone)]
pub struct ArrayBuffer {
    dtype: DType,
    len: usize,
    data: Arc<dyn Any + Send + Sync>,
}

impl ArrayBuffer {
    /// Take ownership of `data`; the vector's allocation is reused as-is
    pub fn new<T: Element>(data: Vec<T>) -> Self {
        Self::from_arc(Arc::new(data))
    }

    /// Share an existing column
    pub fn from_arc<T: Element>(data: Arc<Vec<T>>) -> Self {
        Self {
            dtype: T::DTYPE,
            len: data.len(),
            data,
        }
    }

    /// Element type
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check for an empty buffer
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the data in bytes
    pub fn nbytes(&self) -> usize {
        self.len * self.dtype.itemsize()
    }

    /// Host type name, e.g. `Array[double]`
    pub fn type_name(&self) -> String {
        format!("Array[{}]", self.dtype.name())
    }

    /// Typed view of the data
    pub fn as_slice<T: Element>(&self) -> HostResult<&[T]> {
        self.data
            .downcast_ref::<Vec<T>>()
            .map(|v| v.as_slice())
            .ok_or_else(|| HostError::mismatch(
                format!("Array[{}]", T::DTYPE.name()),
                self.type_name(),
            ))
    }

    /// Identity comparison (same underlying allocation)
    pub fn ptr_eq(&self, other: &ArrayBuffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for ArrayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBuffer")
            .field("dtype", &self.dtype)
            .field("len", &self.len)
            .finish()
    }
}
