use css_tokenizer::{Token, Tokenizer};

use crate::error::ParseError;

/// The parser's side of the tokenizer: tokens are pulled one at a time, with
/// a single token of lookahead through [`TokenStream::reconsume`].
pub struct TokenStream<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokenizer: Tokenizer<'a>) -> Self {
        Self { tokenizer }
    }

    /// Returns the next token, or `None` at the end of input.
    ///
    /// Malformed url tokens are dropped here, so the grammar never sees them.
    pub fn consume_a_token(&mut self) -> Result<Option<Token>, ParseError> {
        loop {
            match self.tokenizer.consume_a_token() {
                Ok(token) => return Ok(token),
                Err(err) if err.is_recoverable() => {
                    log_parse_error!(err.position(), err);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// https://www.w3.org/TR/css-syntax-3/#reconsume-the-current-input-token
    pub fn reconsume(&mut self, token: Token) {
        let displaced = self.tokenizer.reconsume(token);
        debug_assert!(displaced.is_none(), "reconsumed twice without consuming");
    }

    pub fn position(&self) -> usize {
        self.tokenizer.position()
    }

    /// Byte offset at which the most recently consumed token started.
    pub fn token_start(&self) -> usize {
        self.tokenizer.token_start()
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.tokenizer.slice(start..end)
    }

    /// Repeatedly consumes a token and hands it to `action` until the action
    /// returns a result.
    pub fn process<A, R>(&mut self, mut action: A) -> Result<R, ParseError>
    where
        A: FnMut(&mut Self, Option<Token>) -> Result<ProcessResult<R>, ParseError>,
    {
        loop {
            let token = self.consume_a_token()?;
            match action(&mut *self, token)? {
                ProcessResult::Return(result) => return Ok(result),
                ProcessResult::Continue => {}
            }
        }
    }
}

pub enum ProcessResult<T> {
    Continue,
    Return(T),
}
