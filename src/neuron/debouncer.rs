//! Debouncer: merges blocks separated by short gaps.
//!
//! A `Finish` is never passed on right away. The debouncer holds it back and
//! buffers the plain items that follow:
//! - If a `Start` arrives within `quiet_period` plain items, the buffered items
//!   are replayed inside the still-open block and the two blocks merge.
//!   Downstream never sees the intermediate `Finish`/`Start`.
//! - If `quiet_period + 1` plain items arrive first, the held `Finish` is fired,
//!   followed by the buffered items as ordinary passthrough.
//!
//! The quiet period counts tokens, not time, so the output is fully
//! determined by the input sequence.

use crate::event::Event;
use crate::neuron::Neuron;
use crate::token::Token;
use std::fmt;

/// Current mode of a [`Debouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// Outside any block, passing items through.
    Asleep,
    /// A block closed upstream; its `Finish` is being held back.
    Buffering,
    /// Inside a block that downstream has seen open.
    InBlock,
}

/// Coalesces blocks whose gap is at most `quiet_period` plain items.
pub struct Debouncer<T> {
    quiet_period: usize,
    state: DebounceState,
    buffer: Vec<Token<T>>,
    timer: usize,
    fired: Event<Token<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: usize) -> Self {
        Self {
            quiet_period,
            state: DebounceState::Asleep,
            buffer: Vec::new(),
            timer: 0,
            fired: Event::new(),
        }
    }

    pub fn quiet_period(&self) -> usize {
        self.quiet_period
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Plain items seen since the held `Finish`.
    pub fn timer(&self) -> usize {
        self.timer
    }

    /// Number of tokens waiting on a merge-or-split decision.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drops the pending buffer and restarts the gap count.
    fn close_block(&mut self) {
        self.buffer.clear();
        self.timer = 0;
        self.state = DebounceState::Buffering;
    }

    /// Fires the held `Finish` followed by the buffered items.
    fn release(&mut self) {
        self.fired.notify_all(&Token::Finish);
        for token in std::mem::take(&mut self.buffer) {
            self.fired.notify_all(&token);
        }
        self.timer = 0;
        self.state = DebounceState::Asleep;
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("quiet_period", &self.quiet_period)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .field("timer", &self.timer)
            .finish()
    }
}

impl<T> Neuron for Debouncer<T> {
    type Input = Token<T>;
    type Output = Token<T>;

    fn call(&mut self, token: Token<T>) {
        match (self.state, token) {
            (DebounceState::Asleep, Token::Start) => {
                self.fired.notify_all(&Token::Start);
                self.state = DebounceState::InBlock;
            }
            (DebounceState::Buffering, Token::Start) => {
                // Gap was short: replay it inside the block that never closed
                for buffered in std::mem::take(&mut self.buffer) {
                    self.fired.notify_all(&buffered);
                }
                self.timer = 0;
                self.state = DebounceState::InBlock;
            }
            (DebounceState::InBlock, Token::Start) => {}

            (_, Token::Finish) => self.close_block(),

            (DebounceState::Buffering, item) => {
                self.buffer.push(item);
                self.timer += 1;
                if self.timer > self.quiet_period {
                    self.release();
                }
            }
            (DebounceState::Asleep | DebounceState::InBlock, item) => {
                self.fired.notify_all(&item);
            }
        }
    }

    fn fired(&mut self) -> &mut Event<Token<T>> {
        &mut self.fired
    }

    fn name(&self) -> &'static str {
        "debouncer"
    }

    /// Releases a held `Finish` so a finite stream ends with its blocks closed.
    fn flush(&mut self) {
        if self.state == DebounceState::Buffering {
            self.release();
        }
    }
}
