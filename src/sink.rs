//! Terminal consumers for the end of a chain.

use crate::neuron::{Handle, Neuron};
use crossbeam_channel::Sender;
use std::cell::RefCell;
use std::rc::Rc;

/// Pluggable handler for items fired by the last neuron of a chain.
pub trait Sink<T>: 'static {
    /// Handle one fired item.
    fn accept(&mut self, item: &T);

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "sink"
    }
}

/// Registers `sink` as a listener on `handle`'s output.
pub fn attach<N, S>(handle: &Handle<N>, mut sink: S)
where
    N: Neuron + 'static,
    S: Sink<N::Output>,
{
    handle.subscribe(move |item: &N::Output| sink.accept(item));
}

/// Collects fired items into a buffer shared with the caller.
///
/// Clones share one buffer, so keep a clone and [`CollectorSink::drain`] it
/// after feeding input.
#[derive(Debug)]
pub struct CollectorSink<T> {
    collected: Rc<RefCell<Vec<T>>>,
}

impl<T> CollectorSink<T> {
    pub fn new() -> Self {
        Self {
            collected: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn push(&self, item: T) {
        self.collected.borrow_mut().push(item);
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.collected.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.collected.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.borrow().is_empty()
    }
}

impl<T: Clone> CollectorSink<T> {
    /// Copy of everything collected so far, leaving it in place.
    pub fn snapshot(&self) -> Vec<T> {
        self.collected.borrow().clone()
    }
}

impl<T> Clone for CollectorSink<T> {
    fn clone(&self) -> Self {
        Self {
            collected: Rc::clone(&self.collected),
        }
    }
}

impl<T> Default for CollectorSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Sink<T> for CollectorSink<T> {
    fn accept(&mut self, item: &T) {
        self.push(item.clone());
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

/// Sends fired items over a channel.
///
/// The chain itself stays on one thread; this hands its output to another.
/// Items sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink<T> {
    sender: Sender<T>,
}

impl<T> ChannelSink<T> {
    pub fn new(sender: Sender<T>) -> Self {
        Self { sender }
    }
}

impl<T: Clone + 'static> Sink<T> for ChannelSink<T> {
    fn accept(&mut self, item: &T) {
        if self.sender.send(item.clone()).is_err() {
            // Receiver gone - OK to drop in sink
        }
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}
