//! Neurons: synchronous stream transformers and the wiring that chains them.
//!
//! A neuron accepts one input per [`Neuron::call`] and fires zero or more
//! outputs to its listeners before returning. Neurons are wired together
//! through [`Handle`], a shared reference that lets an upstream listener feed
//! a downstream neuron while the caller keeps access to it:
//!
//! ```
//! use brainstorm::{Aggregator, Debouncer, Handle, Selector};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let selector = Handle::new(Selector::new(|n: &i32| n % 2 == 0));
//! let blocks = Rc::new(RefCell::new(Vec::new()));
//! let sink = blocks.clone();
//!
//! selector
//!     .compose(Debouncer::new(1))
//!     .compose(Aggregator::new())
//!     .subscribe(move |block: &Vec<i32>| sink.borrow_mut().push(block.clone()));
//!
//! for n in [2, 3, 4, 7, 9, 10] {
//!     selector.call(n);
//! }
//! selector.flush();
//!
//! assert_eq!(*blocks.borrow(), vec![vec![2, 3, 4], vec![10]]);
//! ```

pub mod aggregator;
pub mod debouncer;
pub mod forwarder;
pub mod selector;

pub use aggregator::Aggregator;
pub use debouncer::{DebounceState, Debouncer};
pub use forwarder::Forwarder;
pub use selector::Selector;

use crate::event::Event;
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// A stream transformer.
///
/// Implementors keep all their state private and fire through their own
/// [`Event`]. Firing is synchronous: every listener has run by the time
/// `call` returns.
pub trait Neuron {
    /// The item this neuron accepts.
    type Input;
    /// The item this neuron fires.
    type Output;

    /// Processes a single input, firing any resulting outputs.
    fn call(&mut self, input: Self::Input);

    /// The event listeners are registered on.
    fn fired(&mut self) -> &mut Event<Self::Output>;

    /// Returns the name of this neuron for diagnostics.
    fn name(&self) -> &'static str;

    /// Signals the end of the stream.
    ///
    /// Override this to release anything held back waiting for more input.
    fn flush(&mut self) {}
}

type FlushHook = Box<dyn Fn()>;

/// Counts upstream flushes so a neuron fed from several upstreams flushes
/// once, after the last of them.
#[derive(Debug, Default)]
struct FlushGate {
    upstreams: Cell<usize>,
    arrived: Cell<usize>,
}

impl FlushGate {
    /// Records one upstream flush; true once every upstream has flushed.
    fn arrive(&self) -> bool {
        let arrived = self.arrived.get() + 1;
        if arrived >= self.upstreams.get() {
            self.arrived.set(0);
            true
        } else {
            self.arrived.set(arrived);
            false
        }
    }
}

/// Shared handle to a neuron inside a chain.
///
/// Cloning a handle clones the reference, not the neuron. Chains must be
/// acyclic: a neuron that ends up feeding itself panics on the re-entrant call.
///
/// In a graph with fan-in, a neuron's flush waits for every neuron connected
/// into it, so each upstream of a shared neuron must be flushed.
pub struct Handle<N: Neuron> {
    neuron: Rc<RefCell<N>>,
    downstream: Rc<RefCell<Vec<FlushHook>>>,
    gate: Rc<FlushGate>,
}

impl<N: Neuron + 'static> Handle<N> {
    pub fn new(neuron: N) -> Self {
        Self {
            neuron: Rc::new(RefCell::new(neuron)),
            downstream: Rc::new(RefCell::new(Vec::new())),
            gate: Rc::new(FlushGate::default()),
        }
    }

    /// Feeds one input into the neuron.
    pub fn call(&self, input: N::Input) {
        self.neuron.borrow_mut().call(input);
    }

    /// Flushes this neuron, then everything composed after it.
    ///
    /// A downstream neuron with several upstreams is flushed when the last
    /// of them flushes.
    pub fn flush(&self) {
        self.neuron.borrow_mut().flush();
        for hook in self.downstream.borrow().iter() {
            hook();
        }
    }

    /// Wires this neuron's output into `next` and returns the handle to `next`.
    pub fn compose<M>(&self, next: M) -> Handle<M>
    where
        M: Neuron<Input = N::Output> + 'static,
        N::Output: Clone + 'static,
    {
        let next = Handle::new(next);
        self.connect(&next);
        next
    }

    /// Like [`Handle::compose`], for a neuron that already has a handle.
    ///
    /// Connecting several neurons to one upstream fans its output out to all
    /// of them in connection order.
    pub fn connect<M>(&self, next: &Handle<M>) -> Handle<M>
    where
        M: Neuron<Input = N::Output> + 'static,
        N::Output: Clone + 'static,
    {
        let target = next.clone();
        self.neuron
            .borrow_mut()
            .fired()
            .register(move |item: &N::Output| target.call(item.clone()));

        let tail = next.clone();
        tail.gate.upstreams.set(tail.gate.upstreams.get() + 1);
        self.downstream.borrow_mut().push(Box::new(move || {
            if tail.gate.arrive() {
                tail.flush();
            }
        }));

        next.clone()
    }

    /// Registers a terminal listener on the neuron's output.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: FnMut(&N::Output) + 'static,
    {
        self.neuron.borrow_mut().fired().register(listener);
    }

    /// Borrows the neuron, e.g. to inspect its state between calls.
    pub fn borrow(&self) -> Ref<'_, N> {
        self.neuron.borrow()
    }

    pub fn name(&self) -> &'static str {
        self.neuron.borrow().name()
    }
}

impl<N: Neuron> Clone for Handle<N> {
    fn clone(&self) -> Self {
        Self {
            neuron: Rc::clone(&self.neuron),
            downstream: Rc::clone(&self.downstream),
            gate: Rc::clone(&self.gate),
        }
    }
}

impl<N: Neuron + fmt::Debug> fmt::Debug for Handle<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("neuron", &self.neuron)
            .field("downstream", &self.downstream.borrow().len())
            .finish()
    }
}
