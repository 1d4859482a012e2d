//! Proxy references over value types
//!
//! A [`Ref<T>`] stands for "the value of type `T` reachable by a fixed path
//! from some root". It owns no `T`. Reading re-walks the path from the root;
//! writing reads the enclosing value, replaces the member and writes the
//! enclosing value back through its own proxy, so a write at depth k costs
//! k reads and k writes.
//!
//! The root is host-resident storage (`Rc<RefCell<T>>`), which the proxy keeps
//! alive for as long as it exists.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use beamlink_host::HostResult;

use crate::error::ReflectError;

type ReadFn<T> = Rc<dyn Fn() -> HostResult<T>>;
type WriteFn<T> = Rc<dyn Fn(T) -> HostResult<()>>;

/// Get/set capability pair over a value reachable from a root
pub struct Ref<T> {
    read: ReadFn<T>,
    write: WriteFn<T>,
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            read: Rc::clone(&self.read),
            write: Rc::clone(&self.write),
        }
    }
}

impl<T: 'static> Ref<T> {
    /// Build a proxy from raw get/set functions
    pub fn new(
        get: impl Fn() -> HostResult<T> + 'static,
        set: impl Fn(T) -> HostResult<()> + 'static,
    ) -> Self {
        Self {
            read: Rc::new(get),
            write: Rc::new(set),
        }
    }

    /// Proxy over host-resident storage
    pub fn over_cell(cell: Rc<RefCell<T>>) -> Self
    where
        T: Clone,
    {
        let read_cell = Rc::clone(&cell);
        Self::new(
            move || {
                read_cell
                    .try_borrow()
                    .map(|value| value.clone())
                    .map_err(|_| borrowed::<T>())
            },
            move |value| {
                *cell.try_borrow_mut().map_err(|_| borrowed::<T>())? = value;
                Ok(())
            },
        )
    }

    /// Current value at the end of the path
    pub fn get(&self) -> HostResult<T> {
        (self.read)()
    }

    /// Replace the value at the end of the path
    pub fn set(&self, value: T) -> HostResult<()> {
        (self.write)(value)
    }

    /// Read-modify-write in one step
    pub fn update(&self, f: impl FnOnce(&mut T)) -> HostResult<()> {
        let mut value = self.get()?;
        f(&mut value);
        self.set(value)
    }

    /// Narrow to one member of `T`
    pub fn project<M: 'static>(
        &self,
        get: impl Fn(&T) -> M + 'static,
        set: impl Fn(&mut T, M) + 'static,
    ) -> Ref<M> {
        let outer = self.clone();
        let writer = self.clone();
        Ref::new(
            move || outer.get().map(|value| get(&value)),
            move |member| writer.update(|value| set(value, member)),
        )
    }

    /// Narrow to a member that may be absent, e.g. one alternative of a variant
    pub fn try_project<M: 'static>(
        &self,
        get: impl Fn(&T) -> HostResult<M> + 'static,
        set: impl Fn(&mut T, M) -> HostResult<()> + 'static,
    ) -> Ref<M> {
        let outer = self.clone();
        let writer = self.clone();
        Ref::new(
            move || get(&outer.get()?),
            move |member| {
                let mut value = writer.get()?;
                set(&mut value, member)?;
                writer.set(value)
            },
        )
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref<{}>", std::any::type_name::<T>())
    }
}

fn borrowed<T>() -> beamlink_host::HostError {
    ReflectError::Borrowed(std::any::type_name::<T>().to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Inner {
        x: i32,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Outer {
        inner: Inner,
        label: String,
    }

    fn inner_of(root: &Ref<Outer>) -> Ref<Inner> {
        root.project(|o| o.inner.clone(), |o, v| o.inner = v)
    }

    #[test]
    fn test_write_through_nested_projection() {
        let cell = Rc::new(RefCell::new(Outer::default()));
        let root = Ref::over_cell(Rc::clone(&cell));
        let x = inner_of(&root).project(|i| i.x, |i, v| i.x = v);

        x.set(5).unwrap();

        assert_eq!(cell.borrow().inner.x, 5);
        assert_eq!(x.get().unwrap(), 5);
    }

    #[test]
    fn test_sibling_members_survive_a_write() {
        let cell = Rc::new(RefCell::new(Outer {
            inner: Inner { x: 1 },
            label: "M1".to_string(),
        }));
        let root = Ref::over_cell(Rc::clone(&cell));

        inner_of(&root).set(Inner { x: 9 }).unwrap();

        assert_eq!(cell.borrow().label, "M1");
        assert_eq!(cell.borrow().inner, Inner { x: 9 });
    }

    #[test]
    fn test_reads_are_never_cached() {
        let cell = Rc::new(RefCell::new(Outer::default()));
        let x = inner_of(&Ref::over_cell(Rc::clone(&cell))).project(|i| i.x, |i, v| i.x = v);

        assert_eq!(x.get().unwrap(), 0);
        cell.borrow_mut().inner.x = 42;
        assert_eq!(x.get().unwrap(), 42);
    }

    #[test]
    fn test_write_cost_grows_with_depth() {
        let reads = Rc::new(Cell::new(0));
        let writes = Rc::new(Cell::new(0));
        let store = Rc::new(RefCell::new(Outer::default()));

        let (r, w, s1, s2) = (reads.clone(), writes.clone(), store.clone(), store.clone());
        let root = Ref::new(
            move || {
                r.set(r.get() + 1);
                Ok(s1.borrow().clone())
            },
            move |v| {
                w.set(w.get() + 1);
                *s2.borrow_mut() = v;
                Ok(())
            },
        );

        inner_of(&root).project(|i| i.x, |i, v| i.x = v).set(3).unwrap();

        // One root read per level on the way down, one root write at the end
        assert_eq!(reads.get(), 2);
        assert_eq!(writes.get(), 1);
        assert_eq!(store.borrow().inner.x, 3);
    }

    #[test]
    fn test_borrow_conflict_is_an_error() {
        let cell = Rc::new(RefCell::new(Outer::default()));
        let root = Ref::over_cell(Rc::clone(&cell));

        let _guard = cell.borrow_mut();
        assert!(root.get().is_err());
    }
}
