//! Shared plumbing for design objects (elements and sources)
//!
//! Design objects keep their typed members as fields and every plain numeric
//! parameter in a [`Scalars`] table keyed by its host name. Both are exposed
//! to the host as properties; scalars read as 0 until set.

use rustc_hash::FxHashMap;

/// Numeric design parameters keyed by host name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scalars(FxHashMap<&'static str, f64>);

impl Scalars {
    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: &'static str, value: f64) {
        self.0.insert(key, value);
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

/// `Reflect` for a hand-written `Structure` whose fields are properties
macro_rules! reflect_structure {
    ($ty:ty, $name:literal) => {
        impl ::beamlink_reflect::Reflect for $ty {
            const CATEGORY: ::beamlink_reflect::Category = ::beamlink_reflect::Category::Structure;

            fn type_name() -> &'static str {
                $name
            }

            fn to_host(&self) -> ::beamlink_host::HostValue {
                ::beamlink_reflect::binder::object_to_host(self)
            }

            fn from_host(
                module: &::beamlink_host::HostModule,
                value: ::beamlink_host::HostValue,
            ) -> ::beamlink_host::HostResult<Self> {
                ::beamlink_reflect::binder::object_from_host(module, value)
            }

            fn register(
                module: &mut ::beamlink_host::HostModule,
            ) -> Result<(), ::beamlink_reflect::ReflectError> {
                ::beamlink_reflect::register_structure::<Self>(module)
            }

            fn expose(
                target: ::beamlink_reflect::Ref<Self>,
            ) -> ::beamlink_host::HostResult<::beamlink_host::HostValue> {
                ::beamlink_reflect::binder::expose_structure(target)
            }
        }
    };
}

/// Property specs for scalar parameters, read and written through `scalars`
macro_rules! scalar_properties {
    ($($key:literal),* $(,)?) => {
        [$(
            ::beamlink_reflect::FieldSpec::property(
                $key,
                |owner: &Self| owner.scalars.get($key),
                |owner: &mut Self, value: f64| owner.scalars.set($key, value),
            )
        ),*]
    };
}

pub(crate) use reflect_structure;
pub(crate) use scalar_properties;
