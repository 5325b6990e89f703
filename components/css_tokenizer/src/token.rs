use std::fmt;

/// https://www.w3.org/TR/css-syntax-3/#tokenization
///
/// Text carried by a token is the raw source text. Escapes are not decoded and
/// numbers are not converted; see [`Token::numeric_value`] for the latter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident {
        value: String,
    },
    /// Marks `name(` only. The arguments are assembled by the parser.
    Function {
        name: String,
        text: String,
    },
    /// The value does not include the `@`.
    AtKeyword {
        value: String,
    },
    /// The value includes the `#`.
    Hash {
        value: String,
    },
    /// The value includes the quotes that were present in the source.
    String {
        value: String,
    },
    /// The whole `url(...)` span, including `url(` and the closing `)`.
    Url {
        value: String,
    },
    Delim {
        value: char,
    },
    Number {
        value: String,
    },
    /// The value includes the `%`.
    Percentage {
        value: String,
    },
    /// Number and unit, concatenated.
    Dimension {
        value: String,
    },
    Whitespace,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    LeftSquareBracket,
    RightSquareBracket,
    LeftParenthesis,
    RightParenthesis,
    LeftCurlyBracket,
    RightCurlyBracket,
    /// `~=`
    IncludeMatch,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
}

impl Token {
    /// The closing token for `(`, `[` and `{`.
    pub fn mirror(&self) -> Option<Token> {
        match self {
            Token::LeftParenthesis => Some(Token::RightParenthesis),
            Token::LeftSquareBracket => Some(Token::RightSquareBracket),
            Token::LeftCurlyBracket => Some(Token::RightCurlyBracket),
            _ => None,
        }
    }

    /// Converts the leading number of a numeric token.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#convert-string-to-number
    pub fn numeric_value(&self) -> Option<f64> {
        let text = match self {
            Token::Number { value } | Token::Percentage { value } | Token::Dimension { value } => {
                value
            }
            _ => return None,
        };

        let (number, _) = split_numeric(text);
        number.parse().ok()
    }

    /// The unit of a dimension, e.g. `px` for `10px`.
    pub fn unit(&self) -> Option<&str> {
        match self {
            Token::Dimension { value } => Some(split_numeric(value).1),
            _ => None,
        }
    }

    /// The target of a `url(...)` token, without padding or quotes.
    pub fn url_target(&self) -> Option<&str> {
        let Token::Url { value } = self else {
            return None;
        };

        // "url(" is ASCII in any casing.
        let inner = value.get(4..).unwrap_or_default();
        let inner = inner.strip_suffix(')').unwrap_or(inner);
        let inner = inner.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C'));

        for quote in ['"', '\''] {
            if let Some(unquoted) = inner.strip_prefix(quote) {
                return Some(unquoted.strip_suffix(quote).unwrap_or(unquoted));
            }
        }
        Some(inner)
    }
}

fn split_numeric(text: &str) -> (&str, &str) {
    let text = text.strip_suffix('%').unwrap_or(text);
    match crate::patterns::number(text, 0) {
        Some(end) => text.split_at(end),
        None => ("", text),
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident { value }
            | Token::Hash { value }
            | Token::String { value }
            | Token::Url { value }
            | Token::Number { value }
            | Token::Percentage { value }
            | Token::Dimension { value } => f.write_str(value),
            Token::Function { text, .. } => f.write_str(text),
            Token::AtKeyword { value } => write!(f, "@{value}"),
            Token::Delim { value } => write!(f, "{value}"),
            Token::Whitespace => f.write_str(" "),
            Token::Cdo => f.write_str("<!--"),
            Token::Cdc => f.write_str("-->"),
            Token::Colon => f.write_str(":"),
            Token::Semicolon => f.write_str(";"),
            Token::Comma => f.write_str(","),
            Token::LeftSquareBracket => f.write_str("["),
            Token::RightSquareBracket => f.write_str("]"),
            Token::LeftParenthesis => f.write_str("("),
            Token::RightParenthesis => f.write_str(")"),
            Token::LeftCurlyBracket => f.write_str("{"),
            Token::RightCurlyBracket => f.write_str("}"),
            Token::IncludeMatch => f.write_str("~="),
            Token::DashMatch => f.write_str("|="),
            Token::PrefixMatch => f.write_str("^="),
            Token::SuffixMatch => f.write_str("$="),
            Token::SubstringMatch => f.write_str("*="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Token;

    #[test]
    fn numeric_value() {
        let dimension = Token::Dimension {
            value: "-1.5e2em".to_string(),
        };
        assert_eq!(dimension.numeric_value(), Some(-150.0));
        assert_eq!(dimension.unit(), Some("em"));

        let percentage = Token::Percentage {
            value: "50%".to_string(),
        };
        assert_eq!(percentage.numeric_value(), Some(50.0));
        assert_eq!(percentage.unit(), None);

        let ident = Token::Ident {
            value: "auto".to_string(),
        };
        assert_eq!(ident.numeric_value(), None);
    }

    #[test]
    fn url_target() {
        let quoted = Token::Url {
            value: "url( \"img/a.png\" )".to_string(),
        };
        assert_eq!(quoted.url_target(), Some("img/a.png"));

        let unquoted = Token::Url {
            value: "URL(img/b.png)".to_string(),
        };
        assert_eq!(unquoted.url_target(), Some("img/b.png"));

        let unterminated = Token::Url {
            value: "url(c.png".to_string(),
        };
        assert_eq!(unterminated.url_target(), Some("c.png"));
    }

    #[test]
    fn display_writes_source_text() {
        assert_eq!(
            Token::AtKeyword {
                value: "media".to_string()
            }
            .to_string(),
            "@media"
        );
        assert_eq!(Token::Whitespace.to_string(), " ");
        assert_eq!(Token::Cdc.to_string(), "-->");
        assert_eq!(Token::DashMatch.to_string(), "|=");
    }
}
