use std::ops::Range;

pub use error::TokenizeError;
pub use token::Token;

mod error;
mod patterns;
pub mod token;

macro_rules! definition {
    (digit) => {
        '0'..='9'
    };
    (hex_digit) => {
        definition!(digit) | 'a'..='f' | 'A'..='F'
    };
    (whitespace) => {
        ' ' | '\t' | '\n' | '\r' | '\x0C'
    };
}

macro_rules! log_current_token {
    ($token:expr) => {
        tracing::trace!(target: "css_tokenizer", token = ?$token);
    };
}

macro_rules! log_parse_error {
    ($position:expr, $message:expr) => {
        tracing::debug!(
            target: "css_tokenizer",
            position = $position,
            "parse error: {}",
            $message
        );
    };
}

/// A single-pass scanner over a stylesheet.
///
/// Tokens are produced on demand by [`Tokenizer::consume_a_token`]. One token
/// can be pushed back with [`Tokenizer::reconsume`]; it is returned by the
/// next call instead of scanning further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer<'a> {
    input: &'a str,
    /// Byte offset of the next input code point.
    position: usize,
    /// Byte offset at which the last returned token started.
    token_start: usize,
    reconsumed: Option<Token>,
    /// Byte offset of the first `/*` found to have no closing `*/`. No later
    /// `/*` can be closed either.
    unterminated_comment_from: Option<usize>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            token_start: 0,
            reconsumed: None,
            unterminated_comment_from: None,
        }
    }

    /// Consumes every remaining token.
    ///
    /// Malformed url tokens produce no token and are skipped. Any other error
    /// stops tokenization.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = vec![];

        loop {
            match self.consume_a_token() {
                Ok(Some(token)) => {
                    log_current_token!(token);
                    tokens.push(token);
                }
                Ok(None) => break,
                Err(err) if err.is_recoverable() => {
                    log_parse_error!(err.position(), err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(tokens)
    }

    /// Pushes `token` back so that the next [`Tokenizer::consume_a_token`]
    /// returns it again.
    ///
    /// Only one token is held at a time. If a token was already pushed back
    /// and not yet consumed, it is replaced and returned.
    #[must_use = "a token that was already pushed back is lost if ignored"]
    pub fn reconsume(&mut self, token: Token) -> Option<Token> {
        self.reconsumed.replace(token)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// The raw source text in `range`, or an empty string if the range is not
    /// valid for the input.
    pub fn slice(&self, range: Range<usize>) -> &'a str {
        self.input.get(range).unwrap_or_default()
    }

    fn current_input_code_point(&self) -> Option<char> {
        self.peek(0)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.position..)?.chars().nth(offset)
    }

    fn remaining_starts_with(&self, pattern: &str) -> bool {
        self.input
            .get(self.position..)
            .is_some_and(|rest| rest.starts_with(pattern))
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-token
    pub fn consume_a_token(&mut self) -> Result<Option<Token>, TokenizeError> {
        if let Some(token) = self.reconsumed.take() {
            return Ok(Some(token));
        }

        loop {
            self.token_start = self.position;

            let Some(code_point) = self.current_input_code_point() else {
                return Ok(None);
            };

            let token = match code_point {
                '"' | '\'' => self.consume_a_string_token(),
                '(' => self.consume_a_single_code_point_token(Token::LeftParenthesis),
                ')' => self.consume_a_single_code_point_token(Token::RightParenthesis),
                ',' => self.consume_a_single_code_point_token(Token::Comma),
                ':' => self.consume_a_single_code_point_token(Token::Colon),
                ';' => self.consume_a_single_code_point_token(Token::Semicolon),
                '[' => self.consume_a_single_code_point_token(Token::LeftSquareBracket),
                ']' => self.consume_a_single_code_point_token(Token::RightSquareBracket),
                '{' => self.consume_a_single_code_point_token(Token::LeftCurlyBracket),
                '}' => self.consume_a_single_code_point_token(Token::RightCurlyBracket),
                '#' => match self.consume_a_hash_token() {
                    Some(token) => token,
                    None => self.consume_a_delim_token(code_point),
                },
                definition!(whitespace) => {
                    self.consume_as_much_whitespace_as_possible();
                    Token::Whitespace
                }
                '@' => match self.consume_an_at_keyword_token() {
                    Some(token) => token,
                    None => self.consume_a_delim_token(code_point),
                },
                '\\' => match self.consume_an_ident_like_token()? {
                    Some(token) => token,
                    None => self.consume_a_delim_token(code_point),
                },
                definition!(digit) => match self.consume_a_numeric_token() {
                    Some(token) => token,
                    None => self.consume_a_delim_token(code_point),
                },
                'u' | 'U' => {
                    if self.stream_starts_with_a_unicode_range() {
                        let position = self.position;
                        // Skip "U+" so that scanning can resume after the error.
                        self.position += 2;
                        return Err(TokenizeError::UnicodeRange { position });
                    }

                    match self.consume_an_ident_like_token()? {
                        Some(token) => token,
                        None => self.consume_a_delim_token(code_point),
                    }
                }
                '$' | '*' | '^' | '|' | '~' => match self.consume_a_match_token(code_point) {
                    Some(token) => token,
                    None => self.consume_a_delim_token(code_point),
                },
                '-' => {
                    if let Some(token) = self.consume_a_numeric_token() {
                        token
                    } else if let Some(token) = self.consume_an_ident_like_token()? {
                        token
                    } else if let Some(token) = self.consume_a_cdc_token() {
                        token
                    } else {
                        self.consume_a_delim_token(code_point)
                    }
                }
                '+' | '.' => match self.consume_a_numeric_token() {
                    Some(token) => token,
                    None => self.consume_a_delim_token(code_point),
                },
                '/' => {
                    // Comments never become tokens.
                    if self.consume_a_comment() {
                        continue;
                    }
                    self.consume_a_delim_token(code_point)
                }
                '<' => match self.consume_a_cdo_token() {
                    Some(token) => token,
                    None => self.consume_a_delim_token(code_point),
                },
                _ => match self.consume_an_ident_like_token()? {
                    Some(token) => token,
                    None => self.consume_a_delim_token(code_point),
                },
            };

            return Ok(Some(token));
        }
    }

    fn consume_a_single_code_point_token(&mut self, token: Token) -> Token {
        self.position += 1;
        token
    }

    fn consume_a_delim_token(&mut self, value: char) -> Token {
        self.position += value.len_utf8();
        Token::Delim { value }
    }

    fn consume_as_much_whitespace_as_possible(&mut self) {
        if let Some(end) = patterns::whitespace(self.input, self.position) {
            self.position = end;
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-comment
    fn consume_a_comment(&mut self) -> bool {
        if self
            .unterminated_comment_from
            .is_some_and(|from| self.position >= from)
        {
            return false;
        }

        match patterns::comment(self.input, self.position) {
            Some(end) => {
                self.position = end;
                true
            }
            None => {
                if self.remaining_starts_with("/*") {
                    log_parse_error!(self.position, "unterminated comment");
                    self.unterminated_comment_from = Some(self.position);
                }
                false
            }
        }
    }

    fn consume_a_hash_token(&mut self) -> Option<Token> {
        // The name starts after the '#'.
        let end = patterns::hash_name(self.input, self.position + 1)?;
        let value = self.slice(self.position..end).to_string();
        self.position = end;
        Some(Token::Hash { value })
    }

    fn consume_an_at_keyword_token(&mut self) -> Option<Token> {
        let name_start = self.position + 1;
        let end = patterns::name(self.input, name_start)?;
        let value = self.slice(name_start..end).to_string();
        self.position = end;
        Some(Token::AtKeyword { value })
    }

    fn consume_a_cdo_token(&mut self) -> Option<Token> {
        if !self.remaining_starts_with("<!--") {
            return None;
        }
        self.position += 4;
        Some(Token::Cdo)
    }

    fn consume_a_cdc_token(&mut self) -> Option<Token> {
        if !self.remaining_starts_with("-->") {
            return None;
        }
        self.position += 3;
        Some(Token::Cdc)
    }

    fn consume_a_match_token(&mut self, code_point: char) -> Option<Token> {
        if self.peek(1) != Some('=') {
            return None;
        }

        let token = match code_point {
            '~' => Token::IncludeMatch,
            '|' => Token::DashMatch,
            '^' => Token::PrefixMatch,
            '$' => Token::SuffixMatch,
            '*' => Token::SubstringMatch,
            _ => return None,
        };
        self.position += 2;
        Some(token)
    }

    fn stream_starts_with_a_unicode_range(&self) -> bool {
        self.peek(1) == Some('+')
            && self
                .peek(2)
                .is_some_and(|c| matches!(c, definition!(hex_digit) | '?'))
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-numeric-token
    fn consume_a_numeric_token(&mut self) -> Option<Token> {
        let start = self.position;
        self.position = patterns::number(self.input, start)?;

        if self.current_input_code_point() == Some('%') {
            self.position += 1;
            return Some(Token::Percentage {
                value: self.slice(start..self.position).to_string(),
            });
        }

        if let Some(unit_end) = patterns::name(self.input, self.position) {
            self.position = unit_end;
            return Some(Token::Dimension {
                value: self.slice(start..self.position).to_string(),
            });
        }

        Some(Token::Number {
            value: self.slice(start..self.position).to_string(),
        })
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token
    fn consume_an_ident_like_token(&mut self) -> Result<Option<Token>, TokenizeError> {
        let Some(end) = patterns::name(self.input, self.position) else {
            return Ok(None);
        };
        let value = self.slice(self.position..end).to_string();
        self.position = end;

        if self.current_input_code_point() != Some('(') {
            return Ok(Some(Token::Ident { value }));
        }
        self.position += 1;

        if value.eq_ignore_ascii_case("url") {
            return self.consume_a_url_token().map(Some);
        }

        let text = format!("{value}(");
        Ok(Some(Token::Function { name: value, text }))
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-string-token
    fn consume_a_string_token(&mut self) -> Token {
        let (end, terminated) =
            patterns::string(self.input, self.position).unwrap_or((self.position + 1, false));
        if !terminated {
            log_parse_error!(self.position, "unterminated string");
        }

        let value = self.slice(self.position..end).to_string();
        self.position = end;
        Token::String { value }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-url-token
    //
    // Called with "url(" already consumed.
    fn consume_a_url_token(&mut self) -> Result<Token, TokenizeError> {
        self.consume_as_much_whitespace_as_possible();

        match self.current_input_code_point() {
            None => {
                log_parse_error!(self.position, "EOF in url token");
                Ok(self.url_token())
            }
            Some('"' | '\'') => {
                self.consume_a_string_token();
                self.consume_as_much_whitespace_as_possible();
                self.consume_the_end_of_a_url_token()
            }
            Some(_) => loop {
                let Some(code_point) = self.current_input_code_point() else {
                    log_parse_error!(self.position, "EOF in url token");
                    return Ok(self.url_token());
                };

                match code_point {
                    ')' => {
                        self.position += 1;
                        return Ok(self.url_token());
                    }
                    definition!(whitespace) => {
                        self.consume_as_much_whitespace_as_possible();
                        return self.consume_the_end_of_a_url_token();
                    }
                    '"' | '\'' => {
                        let position = self.position;
                        self.position += 1;
                        return Err(TokenizeError::UrlQuote { position });
                    }
                    '\\' => {
                        let position = self.position;
                        self.position += 1;
                        return Err(TokenizeError::UrlEscape { position });
                    }
                    _ => self.position += code_point.len_utf8(),
                }
            },
        }
    }

    fn consume_the_end_of_a_url_token(&mut self) -> Result<Token, TokenizeError> {
        match self.current_input_code_point() {
            Some(')') => {
                self.position += 1;
                Ok(self.url_token())
            }
            None => {
                log_parse_error!(self.position, "EOF in url token");
                Ok(self.url_token())
            }
            Some(_) => Err(TokenizeError::BadUrl {
                position: self.position,
            }),
        }
    }

    fn url_token(&self) -> Token {
        Token::Url {
            value: self.slice(self.token_start..self.position).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Token, TokenizeError, Tokenizer};

    fn tokens(input: &str) -> Vec<Token> {
        Tokenizer::new(input)
            .tokenize()
            .expect("input should tokenize")
    }

    fn ident(value: &str) -> Token {
        Token::Ident {
            value: value.to_string(),
        }
    }

    fn delim(value: char) -> Token {
        Token::Delim { value }
    }

    #[test]
    fn empty_input() {
        let mut tokenizer = Tokenizer::new("");
        assert_eq!(tokenizer.consume_a_token(), Ok(None));
        assert_eq!(tokenizer.consume_a_token(), Ok(None));
        assert!(tokens("").is_empty());
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(tokens(" "), vec![Token::Whitespace]);
        assert_eq!(tokens("   "), vec![Token::Whitespace]);
        assert_eq!(tokens(" \t\r\n\x0C "), vec![Token::Whitespace]);
        assert_eq!(
            tokens("a  \n b"),
            vec![ident("a"), Token::Whitespace, ident("b")]
        );
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            tokens("(),:;[]{}"),
            vec![
                Token::LeftParenthesis,
                Token::RightParenthesis,
                Token::Comma,
                Token::Colon,
                Token::Semicolon,
                Token::LeftSquareBracket,
                Token::RightSquareBracket,
                Token::LeftCurlyBracket,
                Token::RightCurlyBracket,
            ]
        );
    }

    #[test]
    fn numeric_classification() {
        assert_eq!(
            tokens("10px"),
            vec![Token::Dimension {
                value: "10px".to_string()
            }]
        );
        assert_eq!(
            tokens("50%"),
            vec![Token::Percentage {
                value: "50%".to_string()
            }]
        );
        assert_eq!(
            tokens("3.14"),
            vec![Token::Number {
                value: "3.14".to_string()
            }]
        );
        assert_eq!(
            tokens("-.5e3 +2"),
            vec![
                Token::Number {
                    value: "-.5e3".to_string()
                },
                Token::Whitespace,
                Token::Number {
                    value: "+2".to_string()
                },
            ]
        );
    }

    #[test]
    fn hyphen_priority() {
        assert_eq!(
            tokens("-1"),
            vec![Token::Number {
                value: "-1".to_string()
            }]
        );
        assert_eq!(tokens("-moz-box"), vec![ident("-moz-box")]);
        assert_eq!(tokens("-->"), vec![Token::Cdc]);
        assert_eq!(tokens("- "), vec![delim('-'), Token::Whitespace]);
    }

    #[test]
    fn plus_and_full_stop() {
        assert_eq!(tokens("+ ."), vec![delim('+'), Token::Whitespace, delim('.')]);
        assert_eq!(tokens(".a"), vec![delim('.'), ident("a")]);
    }

    #[test]
    fn hash_and_at_keyword() {
        assert_eq!(
            tokens("#main #000"),
            vec![
                Token::Hash {
                    value: "#main".to_string()
                },
                Token::Whitespace,
                Token::Hash {
                    value: "#000".to_string()
                },
            ]
        );
        assert_eq!(tokens("# "), vec![delim('#'), Token::Whitespace]);
        assert_eq!(
            tokens("@media"),
            vec![Token::AtKeyword {
                value: "media".to_string()
            }]
        );
        assert_eq!(tokens("@ "), vec![delim('@'), Token::Whitespace]);
    }

    #[test]
    fn strings_keep_quotes() {
        assert_eq!(
            tokens(r#""a b" 'c'"#),
            vec![
                Token::String {
                    value: r#""a b""#.to_string()
                },
                Token::Whitespace,
                Token::String {
                    value: "'c'".to_string()
                },
            ]
        );
        assert_eq!(
            tokens("'open\nx"),
            vec![
                Token::String {
                    value: "'open".to_string()
                },
                Token::Whitespace,
                ident("x"),
            ]
        );
    }

    #[test]
    fn functions() {
        assert_eq!(
            tokens("rgb("),
            vec![Token::Function {
                name: "rgb".to_string(),
                text: "rgb(".to_string()
            }]
        );
        assert_eq!(
            tokens("rgb ("),
            vec![ident("rgb"), Token::Whitespace, Token::LeftParenthesis]
        );
    }

    #[test]
    fn url_tokens() {
        let url = |value: &str| Token::Url {
            value: value.to_string(),
        };

        assert_eq!(tokens("url(a.png)"), vec![url("url(a.png)")]);
        assert_eq!(tokens("URL( a.png )"), vec![url("URL( a.png )")]);
        assert_eq!(tokens("url(\"a b.png\")"), vec![url("url(\"a b.png\")")]);
        assert_eq!(
            tokens("url( 'a.png' ) x"),
            vec![url("url( 'a.png' )"), Token::Whitespace, ident("x")]
        );
        assert_eq!(tokens("url(a.png"), vec![url("url(a.png")]);
        assert_eq!(tokens("url("), vec![url("url(")]);
    }

    #[test]
    fn malformed_url_produces_no_token() {
        let mut tokenizer = Tokenizer::new("url('a' b)");
        assert_eq!(
            tokenizer.consume_a_token(),
            Err(TokenizeError::BadUrl { position: 8 })
        );
        assert_eq!(tokenizer.consume_a_token(), Ok(Some(ident("b"))));

        assert_eq!(tokens("url(a b)"), vec![ident("b"), Token::RightParenthesis]);
    }

    #[test]
    fn unsupported_url_bodies() {
        let mut tokenizer = Tokenizer::new("url(a\\b)");
        assert_eq!(
            tokenizer.consume_a_token(),
            Err(TokenizeError::UrlEscape { position: 5 })
        );

        let mut tokenizer = Tokenizer::new("url(a\"b)");
        assert_eq!(
            tokenizer.consume_a_token(),
            Err(TokenizeError::UrlQuote { position: 5 })
        );
        assert_eq!(tokenizer.consume_a_token(), Ok(Some(ident("b"))));
    }

    #[test]
    fn unicode_range_is_an_error() {
        let mut tokenizer = Tokenizer::new("U+26 u+?");
        assert_eq!(
            tokenizer.consume_a_token(),
            Err(TokenizeError::UnicodeRange { position: 0 })
        );
        assert_eq!(
            tokenizer.consume_a_token(),
            Ok(Some(Token::Number {
                value: "26".to_string()
            }))
        );
        assert_eq!(tokenizer.consume_a_token(), Ok(Some(Token::Whitespace)));
        assert_eq!(
            tokenizer.consume_a_token(),
            Err(TokenizeError::UnicodeRange { position: 5 })
        );

        assert!(Tokenizer::new("U+0025").tokenize().is_err());
        assert_eq!(tokens("u+x"), vec![ident("u"), delim('+'), ident("x")]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(tokens("a/* x */b"), vec![ident("a"), ident("b")]);
        assert_eq!(tokens("/**/ /* y */"), vec![Token::Whitespace]);
        assert_eq!(tokens("a/* trailing */"), vec![ident("a")]);
        assert_eq!(
            tokens("a / b"),
            vec![
                ident("a"),
                Token::Whitespace,
                delim('/'),
                Token::Whitespace,
                ident("b"),
            ]
        );
    }

    #[test]
    fn unterminated_comment_falls_back_to_delim() {
        assert_eq!(
            tokens("/* x"),
            vec![delim('/'), delim('*'), Token::Whitespace, ident("x")]
        );
    }

    #[test]
    fn repeated_unterminated_comments_are_scanned_once() {
        let input = "/*a".repeat(50_000);
        let scanned = tokens(&input);

        assert_eq!(scanned.len(), 150_000);
        assert_eq!(&scanned[..3], &[delim('/'), delim('*'), ident("a")]);
        assert_eq!(scanned.last(), Some(&ident("a")));

        assert_eq!(
            tokens("/* a */ /* b"),
            vec![
                Token::Whitespace,
                delim('/'),
                delim('*'),
                Token::Whitespace,
                ident("b"),
            ]
        );
    }

    #[test]
    fn reconsume_returns_the_displaced_token() {
        let mut tokenizer = Tokenizer::new("a");
        assert_eq!(tokenizer.reconsume(ident("x")), None);
        assert_eq!(tokenizer.reconsume(ident("y")), Some(ident("x")));
        assert_eq!(tokenizer.consume_a_token(), Ok(Some(ident("y"))));
        assert_eq!(tokenizer.consume_a_token(), Ok(Some(ident("a"))));
    }

    #[test]
    fn cdo_cdc_and_match_tokens() {
        assert_eq!(
            tokens("<!-- -->"),
            vec![Token::Cdo, Token::Whitespace, Token::Cdc]
        );
        assert_eq!(tokens("<a"), vec![delim('<'), ident("a")]);
        assert_eq!(
            tokens("~=|=^=$=*="),
            vec![
                Token::IncludeMatch,
                Token::DashMatch,
                Token::PrefixMatch,
                Token::SuffixMatch,
                Token::SubstringMatch,
            ]
        );
        assert_eq!(tokens("*"), vec![delim('*')]);
    }

    #[test]
    fn non_ascii_identifiers_and_delims() {
        assert_eq!(tokens("caf\u{e9}"), vec![ident("caf\u{e9}")]);
        assert_eq!(tokens("\u{e9}t\u{e9}"), vec![ident("\u{e9}t\u{e9}")]);
        assert_eq!(tokens("!"), vec![delim('!')]);
        assert_eq!(tokens("\\"), vec![delim('\\')]);
        assert_eq!(tokens(r"\31 0"), vec![ident(r"\31 0")]);
    }

    #[test]
    fn reconsume_replays_exactly_once() {
        let mut tokenizer = Tokenizer::new("a b");
        let first = tokenizer.consume_a_token().unwrap().unwrap();
        assert_eq!(first, ident("a"));
        let position = tokenizer.position();

        assert_eq!(tokenizer.reconsume(first.clone()), None);
        assert_eq!(tokenizer.consume_a_token(), Ok(Some(first)));
        assert_eq!(tokenizer.position(), position);
        assert_eq!(tokenizer.consume_a_token(), Ok(Some(Token::Whitespace)));
        assert_eq!(tokenizer.consume_a_token(), Ok(Some(ident("b"))));
        assert_eq!(tokenizer.consume_a_token(), Ok(None));
    }

    #[test]
    fn token_start_tracks_source_offsets() {
        let mut tokenizer = Tokenizer::new("a /* c */ {");
        tokenizer.consume_a_token().unwrap();
        assert_eq!(tokenizer.token_start(), 0);
        tokenizer.consume_a_token().unwrap();
        assert_eq!(tokenizer.token_start(), 1);
        tokenizer.consume_a_token().unwrap();
        assert_eq!(tokenizer.token_start(), 9);
        let token = tokenizer.consume_a_token().unwrap().unwrap();
        assert_eq!(token, Token::LeftCurlyBracket);
        assert_eq!(tokenizer.token_start(), 10);
        assert_eq!(tokenizer.slice(tokenizer.token_start()..tokenizer.position()), "{");
    }

    #[test]
    fn tokenize_is_deterministic() {
        let input = "@import url(a.css); .a > b[href^='x'] { margin: -1px 2em 50% }";
        assert_eq!(tokens(input), tokens(input));
    }
}
