//! Enumerations
//!
//! Enumerations are primitives: fields of enum type are copied in and out and
//! the registration walk skips them. They can still be declared to the host
//! explicitly with [`register_enum`], which also exports every member as a
//! module attribute.

use beamlink_host::{EnumDecl, EnumMember, HostError, HostModule, HostResult, HostValue};

use crate::descriptor::Reflect;
use crate::error::ReflectError;
use crate::registrar::guarded;

/// A fieldless enum with named, integer-valued members
pub trait Enumeration: Reflect + Copy + PartialEq {
    /// Host member names and values, in declaration order
    fn members() -> &'static [(&'static str, Self)];

    /// Integer value of a member
    fn discriminant(self) -> i64;

    /// Host name of a member
    fn member_name(self) -> &'static str {
        Self::members()
            .iter()
            .find(|(_, member)| *member == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }
}

/// Host value of an enum member
pub fn enum_to_host<E: Enumeration>(value: &E) -> HostValue {
    HostValue::Enum(EnumMember::new(
        E::type_name(),
        value.member_name(),
        value.discriminant(),
    ))
}

/// Read an enum member from a host enum member or a raw integer
pub fn enum_from_host<E: Enumeration>(value: HostValue) -> HostResult<E> {
    let found = match &value {
        HostValue::Enum(member) if member.enum_name == E::type_name() => E::members()
            .iter()
            .find(|(name, _)| *name == member.name)
            .ok_or_else(|| HostError::UnknownEnumMember {
                enum_name: member.enum_name.clone(),
                member: member.name.clone(),
            })?,
        HostValue::Int(raw) => E::members()
            .iter()
            .find(|(_, member)| member.discriminant() == *raw)
            .ok_or_else(|| HostError::OutOfRange {
                target: E::type_name().to_string(),
                value: raw.to_string(),
            })?,
        other => return Err(HostError::mismatch(E::type_name(), other.type_name())),
    };
    Ok(found.1)
}

/// Declare `E` to the host and export its members as module attributes
///
/// Idempotent per module, like [`register_type`](crate::register_type).
pub fn register_enum<E: Enumeration>(module: &mut HostModule) -> Result<(), ReflectError> {
    guarded::<E>(module, |module, _declared| {
        let decl = E::members()
            .iter()
            .fold(EnumDecl::new(E::type_name()), |decl, (name, member)| {
                decl.member(*name, member.discriminant())
            });
        module.add_enum(decl)?;

        for (name, member) in E::members() {
            module.set_attr_value(*name, enum_to_host(member));
        }
        Ok(())
    })
}
