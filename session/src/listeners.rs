//! Listener registry backing `on_auth_state_change` for the client adapters.
//!
//! ORDERING
//! ========
//! `emit` delivers synchronously to every live listener in registration
//! order. Successive `emit` calls are therefore observed in emission order.
//! A listener released during an emit is not invoked for the rest of it.

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::client::{AuthListener, Subscription};
use crate::types::{AuthChangeEvent, Session};

type SharedListener = Rc<dyn Fn(AuthChangeEvent, Option<&Session>)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, SharedListener)>,
}

/// Cheap-to-clone handle to a set of auth-state listeners.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; the returned handle removes it on release.
    pub fn subscribe(&self, listener: AuthListener) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.entries.push((id, Rc::from(listener)));
            id
        };
        let weak: Weak<RefCell<Registry>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    pub fn emit(&self, event: AuthChangeEvent, session: Option<&Session>) {
        let snapshot: Vec<(u64, SharedListener)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if self.contains(id) {
                listener(event, session);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: u64) -> bool {
        self.inner.borrow().entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}
