//! Beamlink reflect: expose value types to a dynamic host
//!
//! Value-typed structures and variants have no reference identity, yet host
//! code expects `element.surface.a11 = 2.0` to change the element. This crate
//! bridges the gap:
//!
//! - [`descriptor`]: the [`Reflect`] / [`Structure`] / [`Variant`] protocol
//! - [`proxy`]: [`Ref<T>`], a get/set pair that reaches a value through a path
//!   from a host-resident root
//! - [`binder`]: per-field host properties that hand out copies or proxies
//!   depending on the member's category
//! - [`registrar`]: [`register_type`], which declares a type and all of its
//!   dependencies exactly once per module
//!
//! # Example
//!
//! ```ignore
//! use beamlink_reflect::{register_type, HostModule, Structure};
//!
//! #[derive(Clone, Default, Structure)]
//! struct Vec3 { x: f64, y: f64, z: f64 }
//!
//! #[derive(Clone, Default, Structure)]
//! struct Mirror { position: Vec3 }
//!
//! let mut module = HostModule::new("optics");
//! register_type::<Mirror>(&mut module)?;
//!
//! let mirror = module.construct("Mirror")?;
//! module.set_path(&mirror, "position.z", 10.0.into())?;
//! ```

#![warn(missing_docs)]

extern crate self as beamlink_reflect;

pub mod binder;
pub mod descriptor;
pub mod enumeration;
pub mod error;
mod primitive;
pub mod proxy;
pub mod registrar;

pub use beamlink_host;
pub use beamlink_host::{HostError, HostModule, HostObject, HostResult, HostValue};

pub use descriptor::{
    Alternative, AlternativeSpec, AlternativeVisitor, Category, FieldKind, FieldSpec, MemberInfo,
    Reflect, Structure, Variant,
};
pub use enumeration::{enum_from_host, enum_to_host, register_enum, Enumeration};
pub use error::{reflect_error, ReflectError};
pub use proxy::Ref;
pub use registrar::{
    is_registered, register_structure, register_type, register_variant, registration_state,
    RegistrationState,
};

pub use beamlink_derive::{Enumeration, Structure, Variant};
