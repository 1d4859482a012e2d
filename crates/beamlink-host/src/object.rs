//! HostObject: a typed handle to native data living behind the host
//!
//! The payload is reference-counted and type-erased. Two kinds of payload
//! appear in practice:
//!
//! - `RefCell<T>` for a plain, host-resident value (shared by every handle)
//! - a proxy object that only knows how to get/set a value elsewhere
//!
//! The host never inspects the payload; bindings downcast it.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{HostError, HostResult};

/// Handle to a native object exposed under a host type name
#[derive(Clone)]
pub struct HostObject {
    type_name: Rc<str>,
    payload: Rc<dyn Any>,
}

impl HostObject {
    /// Wrap an owned payload
    pub fn new<T: 'static>(type_name: impl Into<Rc<str>>, payload: T) -> Self {
        Self {
            type_name: type_name.into(),
            payload: Rc::new(payload),
        }
    }

    /// Wrap an already shared payload without copying it
    pub fn from_rc<T: 'static>(type_name: impl Into<Rc<str>>, payload: Rc<T>) -> Self {
        Self {
            type_name: type_name.into(),
            payload,
        }
    }

    /// Wrap a plain value as a host-resident object (`RefCell<T>` payload)
    pub fn resident<T: 'static>(type_name: impl Into<Rc<str>>, value: T) -> Self {
        Self::new(type_name, RefCell::new(value))
    }

    /// Host type name of this object
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Borrow the payload as `T`
    pub fn downcast_ref<T: 'static>(&self) -> HostResult<&T> {
        self.payload
            .downcast_ref::<T>()
            .ok_or_else(|| self.payload_mismatch::<T>())
    }

    /// Share the payload as `Rc<T>`
    pub fn downcast_rc<T: 'static>(&self) -> HostResult<Rc<T>> {
        Rc::clone(&self.payload)
            .downcast::<T>()
            .map_err(|_| self.payload_mismatch::<T>())
    }

    /// Share the payload of a host-resident object
    pub fn resident_cell<T: 'static>(&self) -> HostResult<Rc<RefCell<T>>> {
        self.downcast_rc::<RefCell<T>>()
    }

    /// Check whether the payload is a `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.payload.is::<T>()
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &HostObject) -> bool {
        Rc::ptr_eq(&self.payload, &other.payload)
    }

    /// Number of live handles to the payload
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.payload)
    }

    fn payload_mismatch<T>(&self) -> HostError {
        HostError::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
            got: format!("payload of '{}'", self.type_name),
        }
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostObject")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: f64,
    }

    #[test]
    fn test_resident_object_shares_storage() {
        let obj = HostObject::resident("Point", Point { x: 1.0 });
        let alias = obj.clone();

        obj.resident_cell::<Point>().unwrap().borrow_mut().x = 4.0;

        assert_eq!(alias.resident_cell::<Point>().unwrap().borrow().x, 4.0);
        assert!(obj.ptr_eq(&alias));
    }

    #[test]
    fn test_downcast_mismatch_is_an_error() {
        let obj = HostObject::new("Point", Point { x: 1.0 });
        assert!(obj.downcast_ref::<Point>().is_ok());
        assert!(matches!(
            obj.downcast_ref::<String>(),
            Err(HostError::TypeMismatch { .. })
        ));
        assert!(!obj.is::<RefCell<Point>>());
    }

    #[test]
    fn test_from_rc_does_not_copy() {
        let shared = Rc::new(RefCell::new(Point { x: 2.0 }));
        let obj = HostObject::from_rc("Point", Rc::clone(&shared));

        shared.borrow_mut().x = 3.0;
        assert_eq!(obj.resident_cell::<Point>().unwrap().borrow().x, 3.0);
        assert_eq!(obj.handle_count(), 2);
    }
}
