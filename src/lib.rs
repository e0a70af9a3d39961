//! brainstorm - block-aware stream transformers
//!
//! Neurons consume a framed token stream one token at a time and synchronously
//! fire zero or more tokens downstream. `Start`/`Finish` pairs bracket blocks;
//! the selector creates blocks, the debouncer merges nearby ones and the
//! aggregator collapses each block into a list.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostic;
pub mod error;
pub mod event;
pub mod neuron;
pub mod output;
pub mod sink;
pub mod token;

// Core model
pub use event::{Event, Listener};
pub use token::Token;

// Neurons
pub use neuron::{Aggregator, DebounceState, Debouncer, Forwarder, Handle, Neuron, Selector};

// Sinks and diagnostics
pub use diagnostic::{
    ChannelReporter, CollectingReporter, Diagnostic, DiagnosticReporter, LogReporter,
};
pub use sink::{ChannelSink, CollectorSink, Sink, attach};

// Error handling
pub use error::{BrainstormError, Result};

// Config and driver
pub use app::{RunSummary, run_stream};
pub use config::{Config, InputMode, OutputFormat};

/// Build version string with optional git commit hash.
///
/// Returns `"0.2.0+abc1234"` when git hash is available, `"0.2.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            assert!(ver.contains('+'), "expected '+' in {}", ver);
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
