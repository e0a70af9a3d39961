use anyhow::{Context, Result};
use brainstorm::cli::{Cli, Commands, ConfigAction};
use brainstorm::config::Config;
use brainstorm::{RunSummary, run_stream};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    match cli.command.take() {
        None => {
            let mut config = load_config(cli.config.as_deref())?;
            cli.apply_overrides(&mut config, io::stdout().is_terminal());

            let stdout = io::stdout().lock();
            let summary = match cli.input_path() {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    run_stream(&config, BufReader::new(file), stdout)?
                }
                None => run_stream(&config, io::stdin().lock(), stdout)?,
            };

            if !cli.quiet {
                report_diagnostics(&summary);
                if cli.verbose > 0 {
                    eprintln!(
                        "{}",
                        format!(
                            "{} line(s) read, {} item(s) written, {} diagnostic(s)",
                            summary.lines_read,
                            summary.emitted,
                            summary.diagnostics.len()
                        )
                        .dimmed()
                    );
                }
            }

            if cli.strict && !summary.diagnostics.is_empty() {
                std::process::exit(2);
            }
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "brainstorm", &mut io::stdout());
        }
    }

    Ok(())
}

/// Load configuration with fallback to defaults.
fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path()?)?
    };

    Ok(config.with_env_overrides())
}

fn report_diagnostics(summary: &RunSummary) {
    for (neuron, diagnostic) in &summary.diagnostics {
        eprintln!(
            "{} [{}] {}",
            "warning:".yellow().bold(),
            neuron,
            diagnostic
        );
    }
}

fn handle_config_command(action: ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    let config_path = match custom_path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };

    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default(&config_path)?.with_env_overrides();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            let status = if config_path.exists() {
                "exists".green().to_string()
            } else {
                "not found, using defaults".dimmed().to_string()
            };
            println!("{} ({})", config_path.display(), status);
        }
    }

    Ok(())
}
