//! Composition root: builds a chain from [`Config`] and drives a text stream
//! through it.
//!
//! Lines mode:  `Selector(keywords) → [Debouncer] → [Aggregator]`
//! Tokens mode: `Forwarder → [Debouncer] → [Aggregator]`

use crate::config::{Config, InputMode};
use crate::diagnostic::{CollectingReporter, Diagnostic, DiagnosticReporter};
use crate::error::Result;
use crate::neuron::{Aggregator, Debouncer, Forwarder, Handle, Neuron, Selector};
use crate::output::{Emitted, render};
use crate::sink::CollectorSink;
use crate::token::Token;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// What a run consumed, produced and complained about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-empty input lines fed into the chain.
    pub lines_read: usize,
    /// Items written to the output.
    pub emitted: usize,
    /// Diagnostics raised by the chain, oldest first.
    pub diagnostics: Vec<(String, Diagnostic)>,
}

/// The head of a configured chain.
enum Chain {
    Lines(Handle<Selector<String>>),
    Tokens(Handle<Forwarder<Token<String>>>),
}

impl Chain {
    fn build(
        config: &Config,
        reporter: Arc<dyn DiagnosticReporter>,
        output: &CollectorSink<Emitted>,
    ) -> Self {
        match config.input.mode {
            InputMode::Lines => {
                let head = Handle::new(Selector::new(config.selector.predicate()));
                wire_tail(&head, config, reporter, output);
                Chain::Lines(head)
            }
            InputMode::Tokens => {
                let head = Handle::new(Forwarder::new());
                wire_tail(&head, config, reporter, output);
                Chain::Tokens(head)
            }
        }
    }

    fn feed(&self, line: &str) {
        match self {
            Chain::Lines(head) => head.call(line.to_string()),
            Chain::Tokens(head) => match line.parse::<Token<String>>() {
                Ok(token) => head.call(token),
                Err(never) => match never {},
            },
        }
    }

    fn flush(&self) {
        match self {
            Chain::Lines(head) => head.flush(),
            Chain::Tokens(head) => head.flush(),
        }
    }
}

/// Appends the optional debouncer and the output stage after `upstream`.
fn wire_tail<N>(
    upstream: &Handle<N>,
    config: &Config,
    reporter: Arc<dyn DiagnosticReporter>,
    output: &CollectorSink<Emitted>,
) where
    N: Neuron<Output = Token<String>> + 'static,
{
    if config.debouncer.enabled {
        let debouncer = upstream.compose(Debouncer::new(config.debouncer.quiet_period));
        wire_output(&debouncer, config, reporter, output);
    } else {
        wire_output(upstream, config, reporter, output);
    }
}

fn wire_output<N>(
    upstream: &Handle<N>,
    config: &Config,
    reporter: Arc<dyn DiagnosticReporter>,
    output: &CollectorSink<Emitted>,
) where
    N: Neuron<Output = Token<String>> + 'static,
{
    let sink = output.clone();
    if config.output.aggregate {
        upstream
            .compose(Aggregator::with_reporter(reporter))
            .subscribe(move |block: &Vec<String>| sink.push(Emitted::Block(block.clone())));
    } else {
        upstream.subscribe(move |token: &Token<String>| sink.push(Emitted::Token(token.clone())));
    }
}

/// Feed every line of `input` through the chain described by `config`,
/// writing rendered output to `out` as it is produced.
///
/// Blank lines are skipped. At end of input the chain is flushed, so a
/// withheld `Finish` still reaches the output.
pub fn run_stream<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    mut out: W,
) -> Result<RunSummary> {
    config.validate()?;

    let reporter = Arc::new(CollectingReporter::new());
    let output = CollectorSink::new();
    let chain = Chain::build(config, reporter.clone(), &output);

    let mut summary = RunSummary::default();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.lines_read += 1;
        chain.feed(&line);
        summary.emitted += write_items(&output, config, &mut out)?;
    }

    chain.flush();
    summary.emitted += write_items(&output, config, &mut out)?;
    out.flush()?;

    summary.diagnostics = reporter.take();
    Ok(summary)
}

fn write_items<W: Write>(
    output: &CollectorSink<Emitted>,
    config: &Config,
    out: &mut W,
) -> Result<usize> {
    let items = output.drain();
    for item in &items {
        writeln!(
            out,
            "{}",
            render(item, config.output.format, config.output.color)?
        )?;
    }
    Ok(items.len())
}
