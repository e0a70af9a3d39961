//! Identity neuron.

use crate::event::Event;
use crate::neuron::Neuron;
use std::fmt;

/// Re-fires exactly what it receives.
pub struct Forwarder<T> {
    fired: Event<T>,
}

impl<T> Forwarder<T> {
    pub fn new() -> Self {
        Self {
            fired: Event::new(),
        }
    }
}

impl<T> Default for Forwarder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Forwarder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forwarder").finish_non_exhaustive()
    }
}

impl<T> Neuron for Forwarder<T> {
    type Input = T;
    type Output = T;

    fn call(&mut self, input: T) {
        self.fired.notify_all(&input);
    }

    fn fired(&mut self) -> &mut Event<T> {
        &mut self.fired
    }

    fn name(&self) -> &'static str {
        "forwarder"
    }
}
