//! HostModule: the binding namespace
//!
//! A module owns every declared host type, enumeration, module attribute and
//! function. It is also the dispatcher host code goes through for attribute
//! access, method calls, construction and conversion.

use std::any::{Any, TypeId};
use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::{HostError, HostResult};
use crate::suggest::closest_match;
use crate::types::{Converter, EnumDecl, Function, HostType};
use crate::value::{EnumMember, HostValue};

/// A named collection of host types, enums, attributes and functions
pub struct HostModule {
    name: String,
    doc: Option<String>,
    types: FxHashMap<String, HostType>,
    type_order: Vec<String>,
    enums: FxHashMap<String, EnumDecl>,
    attributes: FxHashMap<String, HostValue>,
    functions: FxHashMap<String, Function>,
    extensions: FxHashMap<TypeId, Box<dyn Any>>,
}

impl HostModule {
    /// Create an empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            types: FxHashMap::default(),
            type_order: Vec::new(),
            enums: FxHashMap::default(),
            attributes: FxHashMap::default(),
            functions: FxHashMap::default(),
            extensions: FxHashMap::default(),
        }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module doc string
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Set the module doc string
    pub fn set_doc(&mut self, doc: impl Into<String>) {
        self.doc = Some(doc.into());
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// Declare a host type; names are unique within a module
    pub fn add_type(&mut self, ty: HostType) -> HostResult<()> {
        let name = ty.name().to_string();
        if self.types.contains_key(&name) || self.enums.contains_key(&name) {
            return Err(HostError::DuplicateType(name));
        }
        tracing::trace!(module = %self.name, type_name = %name, "declared host type");
        self.type_order.push(name.clone());
        self.types.insert(name, ty);
        Ok(())
    }

    /// Look up a declared type
    pub fn host_type(&self, name: &str) -> HostResult<&HostType> {
        self.types
            .get(name)
            .ok_or_else(|| HostError::UnknownType(name.to_string()))
    }

    /// Look up a declared type for further declaration
    pub fn host_type_mut(&mut self, name: &str) -> HostResult<&mut HostType> {
        self.types
            .get_mut(name)
            .ok_or_else(|| HostError::UnknownType(name.to_string()))
    }

    /// Whether a type with this name is declared
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Declared type names, in declaration order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.type_order.iter().map(String::as_str)
    }

    /// Withdraw a declared type
    pub fn remove_type(&mut self, name: &str) -> Option<HostType> {
        let ty = self.types.remove(name)?;
        self.type_order.retain(|n| n != name);
        Some(ty)
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Declare an implicit conversion from `from` into the declared type `to`
    pub fn add_conversion(&mut self, from: &str, to: &str, converter: Converter) -> HostResult<()> {
        self.host_type_mut(to)?
            .set_conversion(from.to_string(), converter);
        Ok(())
    }

    /// Whether an implicit conversion from `from` to `to` is declared
    pub fn has_conversion(&self, from: &str, to: &str) -> bool {
        self.types
            .get(to)
            .is_some_and(|ty| ty.conversion_from(from).is_some())
    }

    /// Implicitly convert `value` to the type named `target`
    ///
    /// A value already of the target type passes through unchanged. Otherwise
    /// a declared conversion is applied, chaining at most two of them
    /// (e.g. `Ref[Plane]` to `Plane` to `Surface`).
    pub fn convert(&self, value: &HostValue, target: &str) -> HostResult<HostValue> {
        let from = value.type_name();
        if from == target {
            return Ok(value.clone());
        }

        let no_conversion = || HostError::NoConversion {
            from: from.clone(),
            to: target.to_string(),
        };
        let target_ty = self.types.get(target).ok_or_else(no_conversion)?;

        if let Some(direct) = target_ty.conversion_from(&from) {
            tracing::trace!(%from, to = %target, "implicit conversion");
            return direct(self, value);
        }

        for (middle, second) in target_ty.conversions() {
            let Some(first) = self
                .types
                .get(middle)
                .and_then(|ty| ty.conversion_from(&from))
            else {
                continue;
            };
            tracing::trace!(%from, via = %middle, to = %target, "implicit conversion");
            let intermediate = first(self, value)?;
            return second(self, &intermediate);
        }

        Err(no_conversion())
    }

    /// Construct a declared type with zero arguments
    pub fn construct(&self, type_name: &str) -> HostResult<HostValue> {
        let obj = self.host_type(type_name)?.instantiate()?;
        Ok(HostValue::Object(obj))
    }

    /// Explicit construction from another value, e.g. `Surface(plane)`
    ///
    /// A value already of the requested type is copied rather than aliased.
    pub fn construct_from(&self, type_name: &str, value: &HostValue) -> HostResult<HostValue> {
        if value.type_name() == type_name {
            return self.deep_copy(value);
        }
        self.convert(value, type_name)
    }

    /// Copy a value; objects go through their type's copier
    pub fn deep_copy(&self, value: &HostValue) -> HostResult<HostValue> {
        match value {
            HostValue::Object(obj) => {
                let copy = self.host_type(obj.type_name())?.copy(obj)?;
                Ok(HostValue::Object(copy))
            }
            HostValue::List(items) => items
                .iter()
                .map(|item| self.deep_copy(item))
                .collect::<HostResult<Vec<_>>>()
                .map(HostValue::List),
            other => Ok(other.clone()),
        }
    }

    // ========================================================================
    // Attribute access
    // ========================================================================

    /// Read `value.attr`
    pub fn get_attr(&self, value: &HostValue, attr: &str) -> HostResult<HostValue> {
        if let HostValue::Enum(member) = value {
            return match attr {
                "name" => Ok(HostValue::Str(member.name.clone())),
                "value" => Ok(HostValue::Int(member.value)),
                _ => Err(HostError::AttributeNotFound {
                    type_name: member.enum_name.clone(),
                    attr: attr.to_string(),
                    suggestion: closest_match(attr, ["name", "value"]),
                }),
            };
        }

        let obj = value
            .as_object()
            .ok_or_else(|| HostError::NotAnObject(value.type_name()))?;
        let ty = self.host_type(obj.type_name())?;
        match ty.find_property(attr) {
            Some(property) => property.get(self, obj),
            None => Err(HostError::AttributeNotFound {
                type_name: ty.name().to_string(),
                attr: attr.to_string(),
                suggestion: closest_match(attr, ty.attribute_names()),
            }),
        }
    }

    /// Write `value.attr = new_value`
    pub fn set_attr(&self, value: &HostValue, attr: &str, new_value: HostValue) -> HostResult<()> {
        let obj = value
            .as_object()
            .ok_or_else(|| HostError::NotAnObject(value.type_name()))?;
        let ty = self.host_type(obj.type_name())?;
        match ty.find_property(attr) {
            Some(property) => property.set(self, obj, new_value),
            None => Err(HostError::AttributeNotFound {
                type_name: ty.name().to_string(),
                attr: attr.to_string(),
                suggestion: closest_match(attr, ty.attribute_names()),
            }),
        }
    }

    /// Read a dotted path, e.g. `surface.a11`
    pub fn get_path(&self, root: &HostValue, path: &str) -> HostResult<HostValue> {
        path.split('.')
            .try_fold(root.clone(), |current, attr| self.get_attr(&current, attr))
    }

    /// Write a dotted path; every intermediate step goes through `get_attr`,
    /// so nested value types are updated through their proxies
    pub fn set_path(&self, root: &HostValue, path: &str, new_value: HostValue) -> HostResult<()> {
        let (parent, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (self.get_path(root, parent)?, leaf),
            None => (root.clone(), path),
        };
        self.set_attr(&parent, leaf, new_value)
    }

    /// Call `value.method(args...)`
    pub fn call_method(&self, value: &HostValue, method: &str, args: &[HostValue]) -> HostResult<HostValue> {
        let obj = value
            .as_object()
            .ok_or_else(|| HostError::NotAnObject(value.type_name()))?;
        let ty = self.host_type(obj.type_name())?;
        let body = ty.find_method(method).ok_or_else(|| HostError::MethodNotFound {
            type_name: ty.name().to_string(),
            method: method.to_string(),
        })?;
        body(self, obj, args)
    }

    // ========================================================================
    // Enumerations
    // ========================================================================

    /// Declare an enumeration
    pub fn add_enum(&mut self, decl: EnumDecl) -> HostResult<()> {
        let name = decl.name().to_string();
        if self.enums.contains_key(&name) || self.types.contains_key(&name) {
            return Err(HostError::DuplicateType(name));
        }
        tracing::trace!(module = %self.name, enum_name = %name, "declared host enum");
        self.enums.insert(name, decl);
        Ok(())
    }

    /// Look up a declared enumeration
    pub fn enum_decl(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.get(name)
    }

    /// Resolve `Enum.MEMBER`
    pub fn enum_value(&self, enum_name: &str, member: &str) -> HostResult<HostValue> {
        let decl = self
            .enums
            .get(enum_name)
            .ok_or_else(|| HostError::UnknownType(enum_name.to_string()))?;
        let value = decl
            .value_of(member)
            .ok_or_else(|| HostError::UnknownEnumMember {
                enum_name: enum_name.to_string(),
                member: member.to_string(),
            })?;
        Ok(HostValue::Enum(EnumMember::new(enum_name, member, value)))
    }

    // ========================================================================
    // Module attributes and functions
    // ========================================================================

    /// Bind a module-level attribute
    pub fn set_attr_value(&mut self, name: impl Into<String>, value: HostValue) {
        self.attributes.insert(name.into(), value);
    }

    /// Read a module-level attribute
    pub fn attr(&self, name: &str) -> HostResult<HostValue> {
        self.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::UnknownAttribute {
                module: self.name.clone(),
                attr: name.to_string(),
            })
    }

    /// Define a module-level function
    pub fn def(&mut self, name: impl Into<String>, function: Function) {
        self.functions.insert(name.into(), function);
    }

    /// Call a module-level function
    pub fn call(&self, name: &str, args: &[HostValue]) -> HostResult<HostValue> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| HostError::FunctionNotFound(name.to_string()))?;
        function(self, args)
    }

    /// Whether a module-level function is defined
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    // ========================================================================
    // Extensions
    // ========================================================================

    /// Borrow per-module state attached by a binding layer
    pub fn extension<T: 'static>(&self) -> Option<&T> {
        self.extensions
            .get(&TypeId::of::<T>())
            .and_then(|ext| ext.downcast_ref::<T>())
    }

    /// Run `f` on per-module state of type `T`, creating it on first use
    pub fn with_extension<T: Default + 'static, R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let key = TypeId::of::<T>();
        let mut ext: Box<T> = self
            .extensions
            .remove(&key)
            .and_then(|ext| ext.downcast::<T>().ok())
            .unwrap_or_default();
        let out = f(&mut ext);
        self.extensions.insert(key, ext);
        out
    }
}

impl fmt::Debug for HostModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostModule")
            .field("name", &self.name)
            .field("types", &self.type_order)
            .field("enums", &self.enums.keys().collect::<Vec<_>>())
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
