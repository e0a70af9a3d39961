// tests/run_stream_test.rs
//! Driving text streams through configured chains
//!
//! Loads configuration the way the binary does (TOML file, then overrides)
//! and checks the rendered output of `run_stream`.

use brainstorm::config::{Config, InputMode, OutputFormat};
use brainstorm::{Diagnostic, run_stream};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

fn run(config: &Config, input: &str) -> (String, brainstorm::RunSummary) {
    let mut out = Vec::new();
    let summary = run_stream(config, Cursor::new(input), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

fn config_from(toml: &str) -> Config {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(toml.as_bytes()).unwrap();
    Config::load(file.path()).unwrap()
}

#[test]
fn log_grouping_from_config_file() {
    let config = config_from(
        r#"
        [selector]
        keywords = ["error", "panic"]
        ignore_case = true

        [debouncer]
        quiet_period = 1

        [output]
        aggregate = true
        "#,
    );

    let log = "\
INFO starting
ERROR connection refused
INFO retry 1
Error connection refused
INFO retry 2
INFO retry 3
INFO connected
thread 'main' PANICKED at src/main.rs
";
    let (out, summary) = run(&config, log);

    assert_eq!(
        out,
        "\
--- block: 3 item(s) ---
  ERROR connection refused
  INFO retry 1
  Error connection refused
--- block: 1 item(s) ---
  thread 'main' PANICKED at src/main.rs
"
    );
    assert_eq!(summary.lines_read, 8);
    assert_eq!(summary.emitted, 2);
    assert!(summary.diagnostics.is_empty());
}

#[test]
fn token_output_can_be_fed_back_in_tokens_mode() {
    let mut config = Config::default();
    config.debouncer.quiet_period = 0;
    let (tokens, _) = run(&config, "ERROR a\nERROR b\nok\nERROR c\n");
    assert_eq!(
        tokens,
        "[START]\n[ERROR a]\n[ERROR b]\n[FINISH]\n[ok]\n[START]\n[ERROR c]\n[FINISH]\n"
    );

    let mut replay = Config::default();
    replay.input.mode = InputMode::Tokens;
    replay.debouncer.enabled = false;
    replay.output.aggregate = true;
    replay.output.format = OutputFormat::Json;
    let (blocks, summary) = run(&replay, &tokens);

    assert_eq!(blocks, "[\"ERROR a\",\"ERROR b\"]\n[\"ERROR c\"]\n");
    assert!(summary.diagnostics.is_empty());
}

#[test]
fn values_named_like_markers_survive_the_token_round_trip() {
    let mut config = Config::default();
    config.selector.keywords = vec!["START".into(), "FINISH".into(), "[".into()];
    config.debouncer.enabled = false;
    let (tokens, _) = run(&config, "START\nFINISH\n[x]\n");
    assert_eq!(
        tokens,
        concat!(
            "[START]\n",
            r"[\START]",
            "\n[FINISH]\n[START]\n",
            r"[\FINISH]",
            "\n[FINISH]\n[START]\n[[x]]\n[FINISH]\n",
        )
    );

    let mut replay = Config::default();
    replay.input.mode = InputMode::Tokens;
    replay.debouncer.enabled = false;
    replay.output.aggregate = true;
    replay.output.format = OutputFormat::Json;
    let (blocks, summary) = run(&replay, &tokens);

    assert_eq!(blocks, "[\"START\"]\n[\"FINISH\"]\n[\"[x]\"]\n");
    assert!(summary.diagnostics.is_empty());
}

#[test]
fn unterminated_token_stream_is_reported() {
    let mut config = Config::default();
    config.input.mode = InputMode::Tokens;
    config.debouncer.enabled = false;
    config.output.aggregate = true;

    let (out, summary) = run(&config, "[START]\n[a]\n[b]\n");

    assert!(out.is_empty());
    assert_eq!(summary.emitted, 0);
    assert_eq!(
        summary.diagnostics,
        vec![(
            "aggregator".to_string(),
            Diagnostic::UnterminatedBlock { pending: 2 }
        )]
    );
}

#[test]
fn empty_input_writes_nothing() {
    let (out, summary) = run(&Config::default(), "\n\n");
    assert!(out.is_empty());
    assert_eq!(summary.lines_read, 0);
}
