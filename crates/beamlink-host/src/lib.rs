//! Beamlink host: a small dynamically-typed object environment
//!
//! Native types are projected into a [`HostModule`] as named [`HostType`]s
//! whose properties, methods and conversions are plain closures. Host code
//! (scripts, tests, parameter sweeps) then manipulates [`HostValue`]s through
//! the module: attribute reads and writes, dotted paths, method calls,
//! construction, implicit conversion and copying.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use beamlink_host::{HostModule, HostObject, HostType, HostValue, Property};
//!
//! let mut module = HostModule::new("demo");
//! module.add_type(
//!     HostType::new("Counter")
//!         .constructor(Rc::new(|| Ok(HostObject::resident("Counter", 0i64))))
//!         .property(Property::new("value", Rc::new(|_, obj| {
//!             Ok(HostValue::Int(*obj.resident_cell::<i64>()?.borrow()))
//!         }))),
//! )?;
//! let counter = module.construct("Counter")?;
//! assert_eq!(module.get_attr(&counter, "value")?, HostValue::Int(0));
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod convert;
pub mod error;
pub mod module;
pub mod object;
pub mod suggest;
pub mod types;
pub mod value;

pub use buffer::{ArrayBuffer, Complex64, DType, Element};
pub use convert::{array_to_vec, FromHost, ToHost};
pub use error::{HostError, HostResult};
pub use module::HostModule;
pub use object::HostObject;
pub use types::{
    Constructor, Converter, Copier, EnumDecl, Function, Getter, HostType, Method, Property, Setter,
};
pub use value::{EnumMember, HostValue};
