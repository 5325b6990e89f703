use css_tokenizer::TokenizeError;

/// Errors that abort a parser entry point.
///
/// The grammar itself recovers from everything it can: unterminated blocks
/// are closed at the end of input, qualified rules without a block and
/// malformed url tokens are dropped. Only tokenizer failures that cannot be
/// recovered from end up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

impl ParseError {
    /// Byte offset in the input at which parsing failed.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Tokenize(err) => err.position(),
        }
    }
}
