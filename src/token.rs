//! The framing alphabet every neuron speaks.
//!
//! A flat stream expresses blocks with a `Start`/`Finish` pair around interior
//! `Value` tokens. Anything outside a pair is an ordinary passthrough item.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Text form of [`Token::Start`].
pub const START_MARKER: &str = "[START]";

/// Text form of [`Token::Finish`].
pub const FINISH_MARKER: &str = "[FINISH]";

/// Prefix that keeps a value's text form distinct from the markers.
const ESCAPE: char = '\\';

fn needs_escape(text: &str) -> bool {
    text == "START" || text == "FINISH" || text.starts_with(ESCAPE)
}

/// One unit of a framed stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token<T> {
    /// Opens a block.
    Start,
    /// Closes a block.
    Finish,
    /// Carries one item of the stream.
    Value(T),
}

impl<T> Token<T> {
    /// True for `Start` and `Finish`.
    pub fn is_bracket(&self) -> bool {
        matches!(self, Token::Start | Token::Finish)
    }

    /// Borrow the payload of a `Value`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Token::Value(v) => Some(v),
            Token::Start | Token::Finish => None,
        }
    }

    /// Take the payload of a `Value`.
    pub fn into_value(self) -> Option<T> {
        match self {
            Token::Value(v) => Some(v),
            Token::Start | Token::Finish => None,
        }
    }

    /// Map the payload, keeping brackets as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Token<U> {
        match self {
            Token::Start => Token::Start,
            Token::Finish => Token::Finish,
            Token::Value(v) => Token::Value(f(v)),
        }
    }
}

impl<T> From<T> for Token<T> {
    fn from(value: T) -> Self {
        Token::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Start => f.write_str(START_MARKER),
            Token::Finish => f.write_str(FINISH_MARKER),
            Token::Value(v) => {
                let text = v.to_string();
                if needs_escape(&text) {
                    write!(f, "[{ESCAPE}{text}]")
                } else {
                    write!(f, "[{text}]")
                }
            }
        }
    }
}

/// Parses the text form produced by `Display`.
///
/// `[START]` and `[FINISH]` are brackets and `[x]` is `Value("x")`. A leading
/// `\` inside the brackets is dropped, so `[\START]` is `Value("START")`.
/// Any other text is taken verbatim as a value.
impl FromStr for Token<String> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let token = match trimmed {
            START_MARKER => Token::Start,
            FINISH_MARKER => Token::Finish,
            _ => match trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                Some(inner) => {
                    Token::Value(inner.strip_prefix(ESCAPE).unwrap_or(inner).to_string())
                }
                None => Token::Value(trimmed.to_string()),
            },
        };
        Ok(token)
    }
}
