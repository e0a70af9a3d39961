//! Rendering of chain output for the terminal.
//!
//! Text output uses the token text form, so token output can be piped back
//! into `brainstorm --input-mode tokens`. JSON output writes one value per line.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::token::Token;
use serde::Serialize;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// One item leaving the end of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Emitted {
    Token(Token<String>),
    Block(Vec<String>),
}

/// Render one emitted item, without a trailing newline.
pub fn render(item: &Emitted, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(item)?),
        OutputFormat::Text => Ok(match item {
            Emitted::Token(token) => render_token(token, color),
            Emitted::Block(values) => render_block(values, color),
        }),
    }
}

fn render_token(token: &Token<String>, color: bool) -> String {
    match (token, color) {
        (Token::Start | Token::Finish, true) => format!("{GREEN}{token}{RESET}"),
        _ => token.to_string(),
    }
}

fn render_block(values: &[String], color: bool) -> String {
    let header = format!("--- block: {} item(s) ---", values.len());
    let mut out = if color {
        format!("{CYAN}{header}{RESET}")
    } else {
        header
    };
    for value in values {
        out.push('\n');
        if color {
            out.push_str(DIM);
            out.push_str("  ");
            out.push_str(RESET);
        } else {
            out.push_str("  ");
        }
        out.push_str(value);
    }
    out
}
