//! Observable single-threaded state cells.
//!
//! A [`MutableState`] is the writable side; [`State`] is a read-only view
//! handed to renderers. Every write bumps a version counter and requests a
//! frame, so a renderer can poll `version()` instead of subscribing.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::runtime::RuntimeHandle;

struct StateCell<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    runtime: RuntimeHandle,
}

pub struct MutableState<T> {
    inner: Rc<StateCell<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> MutableState<T> {
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(StateCell {
                value: RefCell::new(value),
                version: Cell::new(0),
                runtime,
            }),
        }
    }

    pub fn set_value(&self, value: T) {
        self.inner.runtime.assert_ui_thread();
        *self.inner.value.borrow_mut() = value;
        self.bump();
    }

    /// Mutates the value in place and publishes the change.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.inner.runtime.assert_ui_thread();
        let result = f(&mut *self.inner.value.borrow_mut());
        self.bump();
        result
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.inner.value.borrow())
    }

    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: Rc::clone(&self.inner),
        }
    }

    fn bump(&self) {
        self.inner.version.set(self.inner.version.get() + 1);
        self.inner.runtime.request_frame();
    }
}

impl<T: Clone> MutableState<T> {
    pub fn value(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &*self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T> {
    inner: Rc<StateCell<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> State<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.inner.value.borrow())
    }

    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }
}

impl<T: Clone> State<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State")
            .field(&*self.inner.value.borrow())
            .finish()
    }
}
