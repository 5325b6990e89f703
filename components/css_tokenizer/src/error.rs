/// Errors raised while consuming a token.
///
/// Every variant carries the byte position at which the problem was found.
/// The tokenizer has already moved past the offending code points, so callers
/// may keep consuming tokens after an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// `U+` followed by a hex digit or `?`.
    #[error("unicode-range tokens are not supported (at byte {position})")]
    UnicodeRange { position: usize },

    /// A backslash inside an unquoted `url(...)`.
    #[error("escapes in unquoted url tokens are not supported (at byte {position})")]
    UrlEscape { position: usize },

    /// A quote inside an unquoted `url(...)`.
    #[error("unexpected quote in unquoted url token (at byte {position})")]
    UrlQuote { position: usize },

    /// A `url(...)` that is not closed where it has to be. No token is
    /// produced for it.
    #[error("malformed url token (at byte {position})")]
    BadUrl { position: usize },
}

impl TokenizeError {
    /// Whether the parser may drop the offending unit and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TokenizeError::BadUrl { .. })
    }

    pub fn position(&self) -> usize {
        match self {
            TokenizeError::UnicodeRange { position }
            | TokenizeError::UrlEscape { position }
            | TokenizeError::UrlQuote { position }
            | TokenizeError::BadUrl { position } => *position,
        }
    }
}
