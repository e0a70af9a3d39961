//! Selector: wraps items matching a predicate in a one-element block.

use crate::event::Event;
use crate::neuron::Neuron;
use crate::token::Token;
use std::fmt;

type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// Brackets every item the predicate accepts.
///
/// A matching item fires `Start, Value(item), Finish`; anything else fires
/// `Value(item)` alone. Each decision is independent of earlier items.
pub struct Selector<T> {
    predicate: Predicate<T>,
    fired: Event<Token<T>>,
}

impl<T> Selector<T> {
    /// Creates a selector from a predicate.
    ///
    /// A panicking predicate unwinds through `call`.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            fired: Event::new(),
        }
    }

    /// Evaluates the predicate without firing anything.
    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }
}

impl<T> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}

impl<T> Neuron for Selector<T> {
    type Input = T;
    type Output = Token<T>;

    fn call(&mut self, item: T) {
        if (self.predicate)(&item) {
            self.fired.notify_all(&Token::Start);
            self.fired.notify_all(&Token::Value(item));
            self.fired.notify_all(&Token::Finish);
        } else {
            self.fired.notify_all(&Token::Value(item));
        }
    }

    fn fired(&mut self) -> &mut Event<Token<T>> {
        &mut self.fired
    }

    fn name(&self) -> &'static str {
        "selector"
    }
}
