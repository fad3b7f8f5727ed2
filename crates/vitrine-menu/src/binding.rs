//! Bindings tie controls to settings values owned elsewhere.
//!
//! The engine never persists anything; the host hands each control a
//! [`Binding`] wrapping the live settings cell, and reads it back (or
//! listens on the change callback) when the menu closes.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared-mutable handle to an externally owned settings value.
pub struct Binding<T> {
    value: Rc<RefCell<T>>,
    on_change: Option<Rc<dyn Fn(&T)>>,
}

impl<T: Clone> Binding<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            on_change: None,
        }
    }

    /// Binds to a cell the host already owns.
    pub fn shared(value: Rc<RefCell<T>>) -> Self {
        Self {
            value,
            on_change: None,
        }
    }

    pub fn on_change(mut self, f: impl Fn(&T) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn set(&self, v: T) {
        *self.value.borrow_mut() = v;
        if let Some(f) = &self.on_change {
            f(&self.value.borrow());
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        if let Some(cb) = &self.on_change {
            cb(&self.value.borrow());
        }
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

/// Dynamic enabling predicate. A control whose predicate returns false is
/// skipped by hover, click and keyboard navigation alike.
pub type EnabledIf = Rc<dyn Fn() -> bool>;
