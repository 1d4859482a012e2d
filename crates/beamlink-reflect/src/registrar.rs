//! Registrar: recursive, idempotent registration of reflected types
//!
//! `register_type::<T>` walks `T`'s fields (or alternatives) depth-first,
//! registering every dependency before `T` itself, and then declares:
//!
//! - the plain host type `T` (zero-argument construction, copy, properties)
//! - the proxy host type `Ref[T]` with the same properties
//! - the implicit conversion `Ref[T]` to `T`
//! - for variants, an implicit conversion from every alternative to `T`
//!
//! Each type is declared at most once per module. The registry that tracks
//! this lives in the module itself, so separate modules are independent.

use std::any::TypeId;
use std::rc::Rc;

use beamlink_host::{HostModule, HostType};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::binder::{self, proxy_type_name};
use crate::descriptor::{FieldSpec, Reflect, Structure, Variant};
use crate::error::ReflectError;

/// Registration progress of one type within one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    /// Never requested, or rolled back after a failure
    Unregistered,
    /// Dependencies are being registered
    Registering,
    /// Fully declared
    Registered,
}

#[derive(Default)]
struct Registry {
    states: FxHashMap<TypeId, RegistrationState>,
    /// host name -> (type id, native type name) of the type that claimed it
    owners: FxHashMap<&'static str, (TypeId, &'static str)>,
    in_progress: Vec<&'static str>,
}

enum Begin {
    Fresh,
    AlreadyRegistered,
}

impl Registry {
    fn state(&self, id: TypeId) -> RegistrationState {
        self.states
            .get(&id)
            .copied()
            .unwrap_or(RegistrationState::Unregistered)
    }

    fn begin(
        &mut self,
        id: TypeId,
        name: &'static str,
        native_name: &'static str,
    ) -> Result<Begin, ReflectError> {
        match self.state(id) {
            RegistrationState::Registered => return Ok(Begin::AlreadyRegistered),
            RegistrationState::Registering => {
                let mut path: Vec<String> = self
                    .in_progress
                    .iter()
                    .skip_while(|pending| **pending != name)
                    .map(|pending| pending.to_string())
                    .collect();
                path.push(name.to_string());
                return Err(ReflectError::Cycle { path });
            }
            RegistrationState::Unregistered => {}
        }

        if let Some(&(owner, owner_name)) = self.owners.get(name) {
            if owner != id {
                return Err(ReflectError::DuplicateName {
                    name: name.to_string(),
                    first: owner_name.to_string(),
                    second: native_name.to_string(),
                });
            }
        }

        self.owners.insert(name, (id, native_name));
        self.states.insert(id, RegistrationState::Registering);
        self.in_progress.push(name);
        Ok(Begin::Fresh)
    }

    fn finish(&mut self, id: TypeId, name: &'static str, succeeded: bool) {
        self.in_progress.pop();
        if succeeded {
            self.states.insert(id, RegistrationState::Registered);
        } else {
            self.states.remove(&id);
            self.owners.remove(name);
        }
    }
}

/// Register `T` and everything reachable from it with `module`
///
/// Repeated calls are no-ops. Primitives declare nothing.
#[tracing::instrument(level = "debug", skip_all, fields(type_name = T::type_name()))]
pub fn register_type<T: Reflect>(module: &mut HostModule) -> Result<(), ReflectError> {
    T::register(module)
}

/// Registration progress of `T` in `module`
pub fn registration_state<T: Reflect>(module: &HostModule) -> RegistrationState {
    module
        .extension::<Registry>()
        .map(|registry| registry.state(TypeId::of::<T>()))
        .unwrap_or(RegistrationState::Unregistered)
}

/// Whether `T` is fully registered in `module`
pub fn is_registered<T: Reflect>(module: &HostModule) -> bool {
    registration_state::<T>(module) == RegistrationState::Registered
}

/// Run `install` for `T` exactly once per module
///
/// On failure every host type `install` declared is withdrawn and `T`
/// returns to `Unregistered`; dependencies that completed stay registered.
pub(crate) fn guarded<T: Reflect>(
    module: &mut HostModule,
    install: impl FnOnce(&mut HostModule, &mut Vec<String>) -> Result<(), ReflectError>,
) -> Result<(), ReflectError> {
    let id = TypeId::of::<T>();
    let name = T::type_name();
    let native_name = std::any::type_name::<T>();

    let begin = module.with_extension::<Registry, _>(|registry| registry.begin(id, name, native_name))?;
    if let Begin::AlreadyRegistered = begin {
        return Ok(());
    }

    let mut declared = Vec::new();
    let result = install(module, &mut declared);

    if result.is_err() {
        for type_name in &declared {
            module.remove_type(type_name);
        }
    }
    let succeeded = result.is_ok();
    module.with_extension::<Registry, _>(|registry| registry.finish(id, name, succeeded));

    match &result {
        Ok(()) => tracing::debug!(type_name = name, declared = ?declared, "registered"),
        Err(err) => tracing::debug!(type_name = name, error = %err, "registration rolled back"),
    }
    result
}

fn declare(module: &mut HostModule, declared: &mut Vec<String>, ty: HostType) -> Result<(), ReflectError> {
    let name = ty.name().to_string();
    module.add_type(ty)?;
    declared.push(name);
    Ok(())
}

fn check_unique_fields<S: Reflect>(fields: &[FieldSpec<S>]) -> Result<(), ReflectError> {
    let mut seen = FxHashSet::default();
    for field in fields {
        if !seen.insert(field.name()) {
            return Err(ReflectError::DuplicateField {
                type_name: S::type_name().to_string(),
                field: field.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Register a structure (see module docs)
pub fn register_structure<T: Structure>(module: &mut HostModule) -> Result<(), ReflectError> {
    guarded::<T>(module, |module, declared| {
        let fields = T::fields();
        check_unique_fields(&fields)?;

        for field in &fields {
            field.member().register(module)?;
        }

        let name = T::type_name();
        let proxy_name = proxy_type_name(name);

        let defaults = fields.clone();
        let mut plain = HostType::new(name)
            .constructor(Rc::new(move || {
                let mut value = T::default();
                for field in &defaults {
                    field.apply_default(&mut value);
                }
                Ok(binder::resident(value))
            }))
            .copier(Rc::new(binder::copy_resident::<T>));
        binder::bind_fields(&mut plain, &fields, binder::root_ref::<T>);

        let mut proxy = HostType::new(proxy_name.as_str()).copier(Rc::new(binder::copy_proxy::<T>));
        binder::bind_fields(&mut proxy, &fields, binder::proxy_ref::<T>);

        declare(module, declared, plain)?;
        declare(module, declared, proxy)?;
        module.add_conversion(&proxy_name, name, Rc::new(binder::convert_proxy::<T>))?;
        Ok(())
    })
}

/// Register a variant (see module docs)
pub fn register_variant<V: Variant>(module: &mut HostModule) -> Result<(), ReflectError> {
    guarded::<V>(module, |module, declared| {
        let name = V::type_name();
        let proxy_name = proxy_type_name(name);

        let plain = HostType::new(name)
            .constructor(Rc::new(|| Ok(binder::resident(V::default()))))
            .copier(Rc::new(binder::copy_resident::<V>));
        let proxy = HostType::new(proxy_name.as_str()).copier(Rc::new(binder::copy_proxy::<V>));

        declare(module, declared, plain)?;
        declare(module, declared, proxy)?;
        module.add_conversion(&proxy_name, name, Rc::new(binder::convert_proxy::<V>))?;

        for alternative in V::alternatives() {
            alternative.member().register(module)?;
            module.add_conversion(
                alternative.member().type_name(),
                name,
                Rc::new(move |module, value| {
                    alternative
                        .into_variant(module, value.clone())
                        .map(|variant| variant.to_host())
                }),
            )?;
        }
        Ok(())
    })
}
