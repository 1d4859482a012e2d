//! Host type declarations
//!
//! A [`HostType`] is the host-side description of one exposed type: how to
//! construct it, how to copy it, which properties and methods it carries and
//! which implicit conversions lead into it.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::{HostError, HostResult};
use crate::module::HostModule;
use crate::object::HostObject;
use crate::value::HostValue;

/// Property read accessor
pub type Getter = Rc<dyn Fn(&HostModule, &HostObject) -> HostResult<HostValue>>;

/// Property write accessor
pub type Setter = Rc<dyn Fn(&HostModule, &HostObject, HostValue) -> HostResult<()>>;

/// Bound method body; receives the receiver object and positional arguments
pub type Method = Rc<dyn Fn(&HostModule, &HostObject, &[HostValue]) -> HostResult<HostValue>>;

/// Zero-argument constructor
pub type Constructor = Rc<dyn Fn() -> HostResult<HostObject>>;

/// Deep copy of an object of this type
pub type Copier = Rc<dyn Fn(&HostObject) -> HostResult<HostObject>>;

/// Conversion of a value of some source type into the owning type
pub type Converter = Rc<dyn Fn(&HostModule, &HostValue) -> HostResult<HostValue>>;

/// Module-level function
pub type Function = Rc<dyn Fn(&HostModule, &[HostValue]) -> HostResult<HostValue>>;

// ============================================================================
// Property
// ============================================================================

/// A named attribute backed by native get/set functions
#[derive(Clone)]
pub struct Property {
    name: String,
    value_type: Option<String>,
    getter: Getter,
    setter: Option<Setter>,
    default: Option<HostValue>,
}

impl Property {
    /// Create a read-only property
    pub fn new(name: impl Into<String>, getter: Getter) -> Self {
        Self {
            name: name.into(),
            value_type: None,
            getter,
            setter: None,
            default: None,
        }
    }

    /// Create a read-write property
    pub fn read_write(name: impl Into<String>, getter: Getter, setter: Setter) -> Self {
        Self::new(name, getter).with_setter(setter)
    }

    /// Attach a setter
    pub fn with_setter(mut self, setter: Setter) -> Self {
        self.setter = Some(setter);
        self
    }

    /// Record the host type name of the property's value
    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    /// Record the value a freshly constructed object starts with
    pub fn with_default(mut self, default: HostValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host type name of the value, if declared
    pub fn value_type(&self) -> Option<&str> {
        self.value_type.as_deref()
    }

    /// Declared default, if any
    pub fn default(&self) -> Option<&HostValue> {
        self.default.as_ref()
    }

    /// Whether the property accepts writes
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the property from `obj`
    pub fn get(&self, module: &HostModule, obj: &HostObject) -> HostResult<HostValue> {
        (self.getter)(module, obj)
    }

    /// Write the property on `obj`
    pub fn set(&self, module: &HostModule, obj: &HostObject, value: HostValue) -> HostResult<()> {
        match &self.setter {
            Some(setter) => setter(module, obj, value),
            None => Err(HostError::ReadOnly {
                type_name: obj.type_name().to_string(),
                attr: self.name.clone(),
            }),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("writable", &self.is_writable())
            .field("default", &self.default)
            .finish()
    }
}

// ============================================================================
// HostType
// ============================================================================

/// Host-side declaration of an exposed type
///
/// Properties keep declaration order for introspection; lookups go through a
/// name index. Declaring a property twice replaces the earlier declaration.
pub struct HostType {
    name: String,
    doc: Option<String>,
    constructor: Option<Constructor>,
    copier: Option<Copier>,
    properties: Vec<Property>,
    property_index: FxHashMap<String, usize>,
    methods: Vec<(String, Method)>,
    conversions: Vec<(String, Converter)>,
}

impl HostType {
    /// Start declaring a type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            constructor: None,
            copier: None,
            properties: Vec::new(),
            property_index: FxHashMap::default(),
            methods: Vec::new(),
            conversions: Vec::new(),
        }
    }

    /// Attach a doc string
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Make the type constructible with zero arguments
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Make objects of the type copyable
    pub fn copier(mut self, copier: Copier) -> Self {
        self.copier = Some(copier);
        self
    }

    /// Declare a property
    pub fn property(mut self, property: Property) -> Self {
        self.add_property(property);
        self
    }

    /// Declare a method
    pub fn method(mut self, name: impl Into<String>, method: Method) -> Self {
        self.add_method(name, method);
        self
    }

    /// Declare a property on an existing declaration
    pub fn add_property(&mut self, property: Property) {
        match self.property_index.get(property.name()) {
            Some(&index) => self.properties[index] = property,
            None => {
                self.property_index
                    .insert(property.name().to_string(), self.properties.len());
                self.properties.push(property);
            }
        }
    }

    /// Declare a method on an existing declaration
    pub fn add_method(&mut self, name: impl Into<String>, method: Method) {
        let name = name.into();
        match self.methods.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = method,
            None => self.methods.push((name, method)),
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Doc string, if any
    pub fn doc_str(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Whether zero-argument construction is available
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Whether objects can be deep-copied
    pub fn is_copyable(&self) -> bool {
        self.copier.is_some()
    }

    /// Look up a property by name
    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.property_index.get(name).map(|&i| &self.properties[i])
    }

    /// Properties in declaration order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a method by name
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    /// Method names in declaration order
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|(n, _)| n.as_str())
    }

    /// Every attribute name (properties first, then methods)
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .map(|p| p.name())
            .chain(self.method_names())
    }

    /// Source type names with a declared implicit conversion into this type
    pub fn conversion_sources(&self) -> impl Iterator<Item = &str> {
        self.conversions.iter().map(|(from, _)| from.as_str())
    }

    pub(crate) fn conversions(&self) -> &[(String, Converter)] {
        &self.conversions
    }

    pub(crate) fn conversion_from(&self, from: &str) -> Option<&Converter> {
        self.conversions
            .iter()
            .find(|(source, _)| source == from)
            .map(|(_, c)| c)
    }

    pub(crate) fn set_conversion(&mut self, from: String, converter: Converter) {
        match self.conversions.iter_mut().find(|(source, _)| *source == from) {
            Some(slot) => slot.1 = converter,
            None => self.conversions.push((from, converter)),
        }
    }

    pub(crate) fn instantiate(&self) -> HostResult<HostObject> {
        match &self.constructor {
            Some(ctor) => ctor(),
            None => Err(HostError::NoConstructor(self.name.clone())),
        }
    }

    pub(crate) fn copy(&self, obj: &HostObject) -> HostResult<HostObject> {
        match &self.copier {
            Some(copier) => copier(obj),
            None => Err(HostError::NotCopyable(self.name.clone())),
        }
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostType")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .field("methods", &self.method_names().collect::<Vec<_>>())
            .field("conversions", &self.conversion_sources().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// EnumDecl
// ============================================================================

/// Host-side declaration of an enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    name: String,
    members: Vec<(String, i64)>,
}

impl EnumDecl {
    /// Start declaring an enumeration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add a member
    pub fn member(mut self, name: impl Into<String>, value: i64) -> Self {
        self.members.push((name.into(), value));
        self
    }

    /// Enumeration name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order
    pub fn members(&self) -> &[(String, i64)] {
        &self.members
    }

    /// Look up a member's value by name
    pub fn value_of(&self, member: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|(n, _)| n == member)
            .map(|(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: i64) -> Getter {
        Rc::new(move |_, _| Ok(HostValue::Int(value)))
    }

    #[test]
    fn test_property_redeclaration_replaces() {
        let ty = HostType::new("Slit")
            .property(Property::new("width", constant(1)))
            .property(Property::new("height", constant(2)))
            .property(Property::new("width", constant(3)));

        let names: Vec<_> = ty.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["width", "height"]);

        let module = HostModule::new("test");
        let obj = HostObject::new("Slit", ());
        let value = ty.find_property("width").unwrap().get(&module, &obj).unwrap();
        assert_eq!(value, HostValue::Int(3));
    }

    #[test]
    fn test_read_only_property_rejects_writes() {
        let prop = Property::new("count", constant(0));
        let module = HostModule::new("test");
        let obj = HostObject::new("Counter", ());

        let err = prop.set(&module, &obj, HostValue::Int(1)).unwrap_err();
        assert!(matches!(err, HostError::ReadOnly { .. }));
        assert_eq!(
            err.to_string(),
            "attribute 'count' of 'Counter' objects is not writable"
        );
    }

    #[test]
    fn test_missing_constructor_and_copier() {
        let ty = HostType::new("Opaque");
        assert!(matches!(ty.instantiate(), Err(HostError::NoConstructor(_))));
        let obj = HostObject::new("Opaque", ());
        assert!(matches!(ty.copy(&obj), Err(HostError::NotCopyable(_))));
    }

    #[test]
    fn test_enum_decl_lookup() {
        let decl = EnumDecl::new("SpreadType")
            .member("HARD_EDGE", 0)
            .member("SOFT_EDGE", 1);
        assert_eq!(decl.value_of("SOFT_EDGE"), Some(1));
        assert_eq!(decl.value_of("FUZZY"), None);
    }
}
