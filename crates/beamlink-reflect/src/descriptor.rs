//! Descriptor protocol
//!
//! Every type that can appear as a field of an exposed type implements
//! [`Reflect`], which fixes its [`Category`] at compile time:
//!
//! - **Primitive**: arithmetic types, text, enumerations and custom leaf types.
//!   The host always receives a copy.
//! - **Structure**: an ordered list of [`FieldSpec`]s (see [`Structure`]).
//! - **Variant**: a closed set of alternative types with visitor dispatch to
//!   the active one (see [`Variant`]).
//!
//! Structures and variants are normally declared with the derives in
//! `beamlink-derive`; hand-written impls follow the same shape.

use std::fmt;
use std::rc::Rc;

use beamlink_host::{HostModule, HostResult, HostValue};

use crate::error::ReflectError;
use crate::proxy::Ref;

/// Type category, decided statically per type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Copied by value across the host boundary
    Primitive,
    /// Product type exposed field by field
    Structure,
    /// Sum type exposed through its active alternative
    Variant,
}

/// A type that can cross the host boundary
pub trait Reflect: Clone + 'static {
    /// Category of the type
    const CATEGORY: Category;

    /// Name in the host namespace
    fn type_name() -> &'static str;

    /// Plain host copy of the value
    fn to_host(&self) -> HostValue;

    /// Read a native value out of a host value, applying implicit conversions
    fn from_host(module: &HostModule, value: HostValue) -> HostResult<Self>;

    /// Declare this type and everything it depends on; primitives declare nothing
    fn register(_module: &mut HostModule) -> Result<(), ReflectError> {
        Ok(())
    }

    /// Host view of the value behind a proxy
    ///
    /// Primitives hand out a copy. Structures and variants override this to
    /// hand out a proxy object so that writes reach the root.
    fn expose(target: Ref<Self>) -> HostResult<HostValue> {
        target.get().map(|value| value.to_host())
    }
}

/// A type described by an ordered list of fields and properties
pub trait Structure: Reflect + Default {
    /// Field specs in declaration order
    fn fields() -> Vec<FieldSpec<Self>>;
}

/// A type holding exactly one of a fixed set of alternatives
pub trait Variant: Reflect + Default {
    /// Dispatch `visitor` on the active alternative
    fn visit<R: AlternativeVisitor<Self>>(&self, visitor: R) -> R::Output;

    /// Alternative specs in declaration order
    fn alternatives() -> Vec<AlternativeSpec<Self>>;

    /// Host name of the active alternative
    fn active_name(&self) -> &'static str {
        self.visit(ActiveName)
    }
}

/// One alternative type `Self` of variant `V`
pub trait Alternative<V>: Reflect {
    /// Borrow the alternative if it is the active one
    fn extract(variant: &V) -> Option<&Self>;

    /// Make this value the active alternative
    fn wrap(self) -> V;
}

/// Callback invoked with the active alternative of a variant
pub trait AlternativeVisitor<V> {
    /// Result of the visit
    type Output;

    /// Called with the concrete active alternative
    fn visit<A: Alternative<V>>(self, active: &A) -> Self::Output;
}

struct ActiveName;

impl<V> AlternativeVisitor<V> for ActiveName {
    type Output = &'static str;

    fn visit<A: Alternative<V>>(self, _active: &A) -> &'static str {
        A::type_name()
    }
}

// ============================================================================
// Member info
// ============================================================================

/// Static facts about a member type, erased from its Rust type
#[derive(Clone, Copy)]
pub struct MemberInfo {
    type_name: fn() -> &'static str,
    category: Category,
    register: fn(&mut HostModule) -> Result<(), ReflectError>,
}

impl MemberInfo {
    /// Facts about `M`
    pub fn of<M: Reflect>() -> Self {
        Self {
            type_name: M::type_name,
            category: M::CATEGORY,
            register: M::register,
        }
    }

    /// Host name of the member type
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Category of the member type
    pub fn category(&self) -> Category {
        self.category
    }

    /// Register the member type with `module`
    pub fn register(&self, module: &mut HostModule) -> Result<(), ReflectError> {
        (self.register)(module)
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("type_name", &self.type_name())
            .field("category", &self.category)
            .finish()
    }
}

// ============================================================================
// FieldSpec
// ============================================================================

/// How a structure member is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Stored member, copied in and out
    Field,
    /// Getter/setter pair over internal state
    Property,
}

/// Type-erased access to one member of `S` through a proxy over `S`
pub(crate) trait FieldAccess<S> {
    fn read(&self, parent: &Ref<S>) -> HostResult<HostValue>;
    fn write(&self, module: &HostModule, parent: &Ref<S>, value: HostValue) -> HostResult<()>;
    fn default_value(&self) -> Option<HostValue>;
    fn apply_default(&self, target: &mut S);
}

struct Accessor<S, M> {
    get: fn(&S) -> M,
    set: fn(&mut S, M),
    default: Option<M>,
}

impl<S: 'static, M: Reflect> FieldAccess<S> for Accessor<S, M> {
    fn read(&self, parent: &Ref<S>) -> HostResult<HostValue> {
        match M::CATEGORY {
            Category::Primitive => parent.get().map(|owner| (self.get)(&owner).to_host()),
            Category::Structure | Category::Variant => M::expose(parent.project(self.get, self.set)),
        }
    }

    fn write(&self, module: &HostModule, parent: &Ref<S>, value: HostValue) -> HostResult<()> {
        let member = M::from_host(module, value)?;
        let set = self.set;
        parent.update(move |owner| set(owner, member))
    }

    fn default_value(&self) -> Option<HostValue> {
        self.default.as_ref().map(M::to_host)
    }

    fn apply_default(&self, target: &mut S) {
        if let Some(default) = &self.default {
            (self.set)(target, default.clone());
        }
    }
}

/// One accessible member of structure `S`
pub struct FieldSpec<S> {
    name: &'static str,
    kind: FieldKind,
    member: MemberInfo,
    access: Rc<dyn FieldAccess<S>>,
}

impl<S> Clone for FieldSpec<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            member: self.member,
            access: Rc::clone(&self.access),
        }
    }
}

impl<S: 'static> FieldSpec<S> {
    /// Stored member accessed by copy
    pub fn field<M: Reflect>(name: &'static str, get: fn(&S) -> M, set: fn(&mut S, M)) -> Self {
        Self::build(name, FieldKind::Field, get, set, None)
    }

    /// Stored member with a value applied on zero-argument construction
    pub fn field_with_default<M: Reflect>(
        name: &'static str,
        get: fn(&S) -> M,
        set: fn(&mut S, M),
        default: M,
    ) -> Self {
        Self::build(name, FieldKind::Field, get, set, Some(default))
    }

    /// Member exposed through a pure getter and a replacing setter
    pub fn property<M: Reflect>(name: &'static str, get: fn(&S) -> M, set: fn(&mut S, M)) -> Self {
        Self::build(name, FieldKind::Property, get, set, None)
    }

    fn build<M: Reflect>(
        name: &'static str,
        kind: FieldKind,
        get: fn(&S) -> M,
        set: fn(&mut S, M),
        default: Option<M>,
    ) -> Self {
        Self {
            name,
            kind,
            member: MemberInfo::of::<M>(),
            access: Rc::new(Accessor { get, set, default }),
        }
    }

    /// Member name as seen by the host
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field or property
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Facts about the member type
    pub fn member(&self) -> &MemberInfo {
        &self.member
    }

    /// Declared default as a host value
    pub fn default_value(&self) -> Option<HostValue> {
        self.access.default_value()
    }

    /// Overwrite the member with its declared default, if any
    pub fn apply_default(&self, target: &mut S) {
        self.access.apply_default(target)
    }

    pub(crate) fn read(&self, parent: &Ref<S>) -> HostResult<HostValue> {
        self.access.read(parent)
    }

    pub(crate) fn write(&self, module: &HostModule, parent: &Ref<S>, value: HostValue) -> HostResult<()> {
        tracing::trace!(field = self.name, "proxy write");
        self.access.write(module, parent, value)
    }
}

impl<S> fmt::Debug for FieldSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("member", &self.member)
            .finish()
    }
}

// ============================================================================
// AlternativeSpec
// ============================================================================

/// One alternative of variant `V`
pub struct AlternativeSpec<V> {
    member: MemberInfo,
    into_variant: fn(&HostModule, HostValue) -> HostResult<V>,
}

impl<V> Clone for AlternativeSpec<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for AlternativeSpec<V> {}

impl<V: Variant> AlternativeSpec<V> {
    /// Spec for alternative `A`
    pub fn of<A: Alternative<V>>() -> Self {
        Self {
            member: MemberInfo::of::<A>(),
            into_variant: |module, value| A::from_host(module, value).map(<A as Alternative<V>>::wrap),
        }
    }

    /// Facts about the alternative type
    pub fn member(&self) -> &MemberInfo {
        &self.member
    }

    /// Read a host value of the alternative type and wrap it into `V`
    pub fn into_variant(&self, module: &HostModule, value: HostValue) -> HostResult<V> {
        (self.into_variant)(module, value)
    }
}

impl<V> fmt::Debug for AlternativeSpec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AlternativeSpec").field(&self.member).finish()
    }
}
