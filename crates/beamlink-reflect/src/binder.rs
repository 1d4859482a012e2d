//! Binder: installs host properties for structure members
//!
//! Every field binding is parameterized over how the enclosing value is
//! reached from the receiver object (`Enclosing<S>`). Plain objects hold the
//! value itself (`RefCell<S>`); proxy objects hold a [`Ref<S>`]. The same
//! field specs are bound twice, once per receiver kind.
//!
//! What the host receives on a read depends on the member's category:
//!
//! | category  | read                                   | write                        |
//! |-----------|----------------------------------------|------------------------------|
//! | Primitive | a copy                                 | a copy                       |
//! | Structure | `Ref[Member]` over the field           | plain value or anything convertible |
//! | Variant   | `Ref[Alt]` over the active alternative | whole variant, alternative or proxy |

use std::cell::RefCell;
use std::rc::Rc;

use beamlink_host::{HostError, HostModule, HostObject, HostResult, HostType, HostValue, Property};

use crate::descriptor::{Alternative, AlternativeVisitor, FieldSpec, Reflect, Variant};
use crate::error::ReflectError;
use crate::proxy::Ref;

/// How a binding reaches the enclosing value from its receiver object
pub type Enclosing<S> = fn(&HostObject) -> HostResult<Ref<S>>;

/// Host name of the proxy type paired with `name`
pub fn proxy_type_name(name: &str) -> String {
    format!("Ref[{}]", name)
}

// ============================================================================
// Plain and proxy objects
// ============================================================================

/// Wrap a value as a plain, host-resident object
pub fn resident<T: Reflect>(value: T) -> HostObject {
    HostObject::resident(T::type_name(), value)
}

/// Plain host copy of a structure or variant
pub fn object_to_host<T: Reflect>(value: &T) -> HostValue {
    HostValue::Object(resident(value.clone()))
}

/// Read a structure or variant out of a host value
///
/// Plain objects and proxies of `T` are read directly; anything else goes
/// through the module's implicit conversions.
pub fn object_from_host<T: Reflect>(module: &HostModule, value: HostValue) -> HostResult<T> {
    if let Some(read) = value.as_object().and_then(read_object::<T>) {
        return read;
    }
    let converted = module.convert(&value, T::type_name())?;
    let obj = converted.expect_object(T::type_name())?;
    read_object::<T>(obj).unwrap_or_else(|| Err(HostError::mismatch(T::type_name(), obj.type_name())))
}

fn read_object<T: Reflect>(obj: &HostObject) -> Option<HostResult<T>> {
    if obj.is::<RefCell<T>>() {
        return Some(
            obj.downcast_ref::<RefCell<T>>()
                .and_then(|cell| borrow_clone(cell)),
        );
    }
    if obj.is::<Ref<T>>() {
        return Some(obj.downcast_ref::<Ref<T>>().and_then(Ref::get));
    }
    None
}

fn borrow_clone<T: Reflect>(cell: &RefCell<T>) -> HostResult<T> {
    cell.try_borrow()
        .map(|value| value.clone())
        .map_err(|_| ReflectError::Borrowed(T::type_name().to_string()).into())
}

/// Enclosing value of a plain object: the object's own storage
pub fn root_ref<S: Reflect>(obj: &HostObject) -> HostResult<Ref<S>> {
    Ok(Ref::over_cell(obj.resident_cell::<S>()?))
}

/// Enclosing value of a proxy object: whatever the proxy points at
pub fn proxy_ref<S: Reflect>(obj: &HostObject) -> HostResult<Ref<S>> {
    obj.downcast_ref::<Ref<S>>().cloned()
}

/// Copy a plain object
pub fn copy_resident<T: Reflect>(obj: &HostObject) -> HostResult<HostObject> {
    let value = borrow_clone(obj.downcast_ref::<RefCell<T>>()?)?;
    Ok(resident(value))
}

/// Copy the value behind a proxy into a detached plain object
pub fn copy_proxy<T: Reflect>(obj: &HostObject) -> HostResult<HostObject> {
    Ok(resident(proxy_ref::<T>(obj)?.get()?))
}

/// Implicit `Ref[T]` to `T` conversion
pub fn convert_proxy<T: Reflect>(_module: &HostModule, value: &HostValue) -> HostResult<HostValue> {
    let target = proxy_ref::<T>(value.expect_object(&proxy_type_name(T::type_name()))?)?;
    Ok(target.get()?.to_host())
}

// ============================================================================
// Exposure through proxies
// ============================================================================

/// Hand out a structure behind a proxy as a `Ref[T]` object
pub fn expose_structure<T: Reflect>(target: Ref<T>) -> HostResult<HostValue> {
    Ok(HostValue::Object(HostObject::new(
        proxy_type_name(T::type_name()),
        target,
    )))
}

/// Hand out a variant behind a proxy as a proxy over its active alternative
pub fn expose_variant<V: Variant>(target: Ref<V>) -> HostResult<HostValue> {
    let current = target.get()?;
    current.visit(ExposeActive { parent: target })
}

struct ExposeActive<V> {
    parent: Ref<V>,
}

impl<V: Variant> AlternativeVisitor<V> for ExposeActive<V> {
    type Output = HostResult<HostValue>;

    fn visit<A: Alternative<V>>(self, _active: &A) -> Self::Output {
        let alternative = self.parent.try_project(
            |variant: &V| {
                <A as Alternative<V>>::extract(variant)
                    .cloned()
                    .ok_or_else(|| stale::<V, A>(variant))
            },
            |variant: &mut V, value: A| {
                if <A as Alternative<V>>::extract(variant).is_none() {
                    return Err(stale::<V, A>(variant));
                }
                *variant = <A as Alternative<V>>::wrap(value);
                Ok(())
            },
        );
        A::expose(alternative)
    }
}

fn stale<V: Variant, A: Reflect>(current: &V) -> HostError {
    ReflectError::StaleAlternative {
        variant: V::type_name().to_string(),
        expected: A::type_name().to_string(),
        active: current.active_name().to_string(),
    }
    .into()
}

// ============================================================================
// Field binding
// ============================================================================

/// Install a host property for `field` on `ty`
pub fn bind_field<S: Reflect>(ty: &mut HostType, field: &FieldSpec<S>, enclosing: Enclosing<S>) {
    let reader = field.clone();
    let writer = field.clone();

    let mut property = Property::read_write(
        field.name(),
        Rc::new(move |_, obj| reader.read(&enclosing(obj)?)),
        Rc::new(move |module, obj, value| writer.write(module, &enclosing(obj)?, value)),
    )
    .with_value_type(field.member().type_name());

    if let Some(default) = field.default_value() {
        property = property.with_default(default);
    }
    ty.add_property(property);
}

/// Install host properties for every field, in order
pub fn bind_fields<S: Reflect>(ty: &mut HostType, fields: &[FieldSpec<S>], enclosing: Enclosing<S>) {
    for field in fields {
        bind_field(ty, field, enclosing);
    }
}
