//! Where the controller keeps view state.
//!
//! The controller only reads and writes through [`StateStore`], so a UI
//! layer can back it with its own reactive cell while tests use
//! [`LocalStore`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::view::ViewState;

pub trait StateStore {
    /// Copy of the current state.
    fn snapshot(&self) -> ViewState;

    /// Mutate the state in place. Implementations must not call back into
    /// the controller from here.
    fn update<F: FnOnce(&mut ViewState)>(&self, f: F);
}

/// Plain shared cell for single-threaded hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct LocalStore {
    state: Rc<RefCell<ViewState>>,
}

impl LocalStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for LocalStore {
    fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    fn update<F: FnOnce(&mut ViewState)>(&self, f: F) {
        f(&mut self.state.borrow_mut());
    }
}
