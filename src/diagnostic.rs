//! Non-fatal reports about malformed token sequences.
//!
//! Diagnostics travel on a side channel. They never appear in a neuron's fired
//! output and never stop it from processing the next token.

use crossbeam_channel::Sender;
use std::sync::Mutex;
use thiserror::Error;

/// A malformed stream shape observed by a neuron.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `Start` arrived while a block was already open.
    #[error("Unexpected 'Start' token encountered inside a block")]
    UnexpectedStart,
    /// `Finish` arrived with no open block.
    #[error("Unexpected 'Finish' token encountered outside a block")]
    UnexpectedFinish,
    /// The stream ended while a block was still open.
    #[error("Block still open at end of stream, dropped {pending} buffered value(s)")]
    UnterminatedBlock { pending: usize },
}

/// Trait for reporting neuron diagnostics.
pub trait DiagnosticReporter: Send + Sync {
    /// Reports a diagnostic raised by the neuron called `neuron`.
    fn report(&self, neuron: &str, diagnostic: &Diagnostic);
}

/// Writes diagnostics to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl DiagnosticReporter for LogReporter {
    fn report(&self, neuron: &str, diagnostic: &Diagnostic) {
        eprintln!("[{}] {}", neuron, diagnostic);
    }
}

/// Keeps every diagnostic for later inspection.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    entries: Mutex<Vec<(String, Diagnostic)>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, oldest first.
    pub fn entries(&self) -> Vec<(String, Diagnostic)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Removes and returns everything reported so far.
    pub fn take(&self) -> Vec<(String, Diagnostic)> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&self, neuron: &str, diagnostic: &Diagnostic) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push((neuron.to_string(), diagnostic.clone())),
            Err(poisoned) => poisoned
                .into_inner()
                .push((neuron.to_string(), diagnostic.clone())),
        }
    }
}

/// Forwards diagnostics to a channel. A closed receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    sender: Sender<(String, Diagnostic)>,
}

impl ChannelReporter {
    pub fn new(sender: Sender<(String, Diagnostic)>) -> Self {
        Self { sender }
    }
}

impl DiagnosticReporter for ChannelReporter {
    fn report(&self, neuron: &str, diagnostic: &Diagnostic) {
        if self
            .sender
            .send((neuron.to_string(), diagnostic.clone()))
            .is_err()
        {
            // Receiver dropped, nobody is listening
        }
    }
}
