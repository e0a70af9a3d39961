//! Synchronous publish/subscribe primitive.
//!
//! Listeners are invoked in registration order and each one runs to completion
//! before the next is called. There is no queue: a listener that fires further
//! events does so on the same call stack.

use std::fmt;

/// A registered callback.
pub type Listener<T> = Box<dyn FnMut(&T)>;

/// Ordered list of listeners for one kind of item.
pub struct Event<T> {
    listeners: Vec<Listener<T>>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener after all existing ones.
    pub fn register<F>(&mut self, listener: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Delivers `item` to every listener, in registration order.
    pub fn notify_all(&mut self, item: &T) {
        for listener in &mut self.listeners {
            listener(item);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
