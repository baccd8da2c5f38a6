//! Observable cell updated outside the render cycle.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
struct Inner<T: Copy> {
    value: Cell<T>,
    version: Cell<u64>,
}

/// A single-writer, many-reader cell written once per frame.
///
/// Clones share the same cell. Readers compute styles from [`get`] directly,
/// so updating the value never re-renders the components that read it.
/// `version` increases on every write that changes the value.
///
/// [`get`]: SharedValue::get
#[derive(Debug, Clone)]
pub struct SharedValue<T: Copy> {
    inner: Rc<Inner<T>>,
}

impl<T: Copy + PartialEq> SharedValue<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: Cell::new(value),
                version: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.get()
    }

    /// Store `value`; returns whether it differed from the previous one.
    pub fn set(&self, value: T) -> bool {
        if self.inner.value.get() == value {
            return false;
        }
        self.inner.value.set(value);
        self.inner.version.set(self.inner.version.get().wrapping_add(1));
        true
    }

    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Read through a pure derivation
    pub fn map<U>(&self, derive: impl FnOnce(T) -> U) -> U {
        derive(self.get())
    }
}

impl<T: Copy + PartialEq + Default> Default for SharedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
