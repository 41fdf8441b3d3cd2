//! # Reactive state cells
//!
//! A [`StateCell`] is a single piece of mutable state that notifies its
//! subscribers on every write. Cells are single-threaded (`Rc` + `RefCell`) and
//! cheap to clone: every clone points at the same value and the same
//! subscriber set.
//!
//! Writes are never coalesced. Each [`StateCell::set`] replaces the value and
//! then runs every live subscriber once, synchronously, so a reader inside a
//! subscriber always sees the value that was just written.
//!
//! Subscribers are registered with [`StateCell::subscribe`] and stay alive for
//! as long as the returned [`Subscription`] is held.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of a registered subscriber.
    struct SubscriberId;
}

type Callback = Rc<dyn Fn()>;
type Registry = RefCell<SlotMap<SubscriberId, Callback>>;

/// A reactive, independently observable value.
pub struct StateCell<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<Registry>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T: Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &*self.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Replace the value and notify every subscriber.
    pub fn set(&self, value: T) {
        // The borrow must end before subscribers run; they read the cell.
        *self.value.borrow_mut() = value;
        self.notify();
    }

    /// Register `callback` to run after every write.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let id = self.subscribers.borrow_mut().insert(Rc::new(callback));
        Subscription {
            registry: Rc::downgrade(&self.subscribers),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Snapshot first so a subscriber may subscribe or unsubscribe while running.
        let callbacks: Vec<Callback> = self.subscribers.borrow().values().cloned().collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> StateCell<T> {
    /// Current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

/// Keeps a subscriber registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Weak<Registry>,
    id: SubscriberId,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
        }
    }
}
