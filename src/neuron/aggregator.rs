//! Aggregator: collapses each well-formed block into one list.

use crate::diagnostic::{Diagnostic, DiagnosticReporter, LogReporter};
use crate::event::Event;
use crate::neuron::Neuron;
use crate::token::Token;
use std::fmt;
use std::sync::Arc;

/// Collects the values between `Start` and `Finish` and fires them as a `Vec`.
///
/// Values outside a block are dropped. Nested `Start` and stray `Finish`
/// tokens are reported to the diagnostic reporter and otherwise ignored, so a
/// malformed block never affects the blocks after it.
pub struct Aggregator<T> {
    capturing: bool,
    buffer: Vec<T>,
    fired: Event<Vec<T>>,
    reporter: Arc<dyn DiagnosticReporter>,
}

impl<T> Aggregator<T> {
    /// Creates an aggregator that logs diagnostics to stderr.
    pub fn new() -> Self {
        Self::with_reporter(Arc::new(LogReporter))
    }

    pub fn with_reporter(reporter: Arc<dyn DiagnosticReporter>) -> Self {
        Self {
            capturing: false,
            buffer: Vec::new(),
            fired: Event::new(),
            reporter,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Values collected so far in the open block.
    pub fn pending(&self) -> &[T] {
        &self.buffer
    }

    fn report(&self, diagnostic: Diagnostic) {
        self.reporter.report(self.name(), &diagnostic);
    }
}

impl<T> Default for Aggregator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Aggregator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("capturing", &self.capturing)
            .field("pending", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl<T> Neuron for Aggregator<T> {
    type Input = Token<T>;
    type Output = Vec<T>;

    fn call(&mut self, token: Token<T>) {
        match (self.capturing, token) {
            (false, Token::Start) => {
                self.buffer.clear();
                self.capturing = true;
            }
            (false, Token::Finish) => self.report(Diagnostic::UnexpectedFinish),
            (false, Token::Value(_)) => {}

            // Nested blocks are not supported; keep what is already buffered
            (true, Token::Start) => self.report(Diagnostic::UnexpectedStart),
            (true, Token::Finish) => {
                let block = std::mem::take(&mut self.buffer);
                self.capturing = false;
                self.fired.notify_all(&block);
            }
            (true, Token::Value(value)) => self.buffer.push(value),
        }
    }

    fn fired(&mut self) -> &mut Event<Vec<T>> {
        &mut self.fired
    }

    fn name(&self) -> &'static str {
        "aggregator"
    }

    fn flush(&mut self) {
        if self.capturing {
            self.report(Diagnostic::UnterminatedBlock {
                pending: self.buffer.len(),
            });
            self.buffer.clear();
            self.capturing = false;
        }
    }
}
