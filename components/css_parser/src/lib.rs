//! Parses a stylesheet into rules and component values.
//!
//! ```
//! use css_parser::{Parser, Rule};
//!
//! let stylesheet = Parser::new("@import 'a.css'; p { color: red }")
//!     .parse_a_stylesheet()
//!     .unwrap();
//! assert_eq!(stylesheet.rules.len(), 2);
//! assert!(matches!(&stylesheet.rules[0], Rule::AtRule(rule) if rule.name == "import"));
//! ```

pub use css_tokenizer::{Token, TokenizeError, Tokenizer};

pub use error::ParseError;
pub use types::{AtRule, ComponentValue, Function, QualifiedRule, Rule, SimpleBlock, Stylesheet};

macro_rules! log_parse_error {
    ($position:expr, $message:expr) => {
        tracing::debug!(
            target: "css_parser",
            position = $position,
            "parse error: {}",
            $message
        );
    };
}

mod error;
mod parser_algorithms;
mod parser_entry_points;
mod token_streams;
pub mod types;

use token_streams::TokenStream;

pub struct Parser<'a> {
    input: TokenStream<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::from_tokenizer(Tokenizer::new(input))
    }

    pub fn from_tokenizer(tokenizer: Tokenizer<'a>) -> Self {
        Self {
            input: TokenStream::new(tokenizer),
        }
    }
}

/// Shorthand for [`Parser::parse_a_stylesheet`].
pub fn parse_a_stylesheet(input: &str) -> Result<Stylesheet, ParseError> {
    Parser::new(input).parse_a_stylesheet()
}
