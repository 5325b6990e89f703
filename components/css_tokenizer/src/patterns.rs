//! Sub-lexers shared by the tokenizer.
//!
//! Every function takes the full input and a byte position, and returns the
//! byte position just past the match. None of them keep state between calls.

use std::sync::LazyLock;

use regex::Regex;

macro_rules! escape {
    () => {
        r"\\(?:\$|\n|[0-9a-fA-F]{1,6}[ \t\n\r\x0C]?)"
    };
}

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"^-?(?:[a-zA-Z_]|[^\x00-\x7F]|",
        escape!(),
        r")(?:[a-zA-Z0-9_\-]|[^\x00-\x7F]|",
        escape!(),
        r")*"
    ))
});

static HASH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"^(?:[a-zA-Z0-9_\-]|[^\x00-\x7F]|",
        escape!(),
        r")+"
    ))
});

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[+\-]?(?:[0-9]+\.[0-9]+|[0-9]+|\.[0-9]+)(?:[eE][+\-]?[0-9]+)?"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[ \t\n\r\x0C]+"));

static COMMENT: LazyLock<Regex> = LazyLock::new(|| compile(r"^/\*(?s:.)*?\*/"));

static DOUBLE_QUOTED_STRING: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"^"(?:[^\n\r\x0C"\\]|\\(?s:.))*(")?"#));

static SINGLE_QUOTED_STRING: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"^'(?:[^\n\r\x0C'\\]|\\(?s:.))*(')?"#));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("sub-lexer patterns are valid")
}

fn find(regex: &Regex, input: &str, position: usize) -> Option<usize> {
    let rest = input.get(position..)?;
    regex
        .find(rest)
        .filter(|m| !m.is_empty())
        .map(|m| position + m.end())
}

/// https://www.w3.org/TR/css-syntax-3/#consume-name
///
/// An optional `-`, then an identifier start (or escape), then any number of
/// identifier characters (or escapes). Escapes are matched, not decoded.
pub(crate) fn name(input: &str, position: usize) -> Option<usize> {
    find(&NAME, input, position)
}

/// Like [`name`], but any identifier character may come first.
pub(crate) fn hash_name(input: &str, position: usize) -> Option<usize> {
    find(&HASH_NAME, input, position)
}

/// https://www.w3.org/TR/css-syntax-3/#consume-number
pub(crate) fn number(input: &str, position: usize) -> Option<usize> {
    find(&NUMBER, input, position)
}

pub(crate) fn whitespace(input: &str, position: usize) -> Option<usize> {
    find(&WHITESPACE, input, position)
}

/// A complete `/* ... */`. Unterminated comments do not match.
pub(crate) fn comment(input: &str, position: usize) -> Option<usize> {
    find(&COMMENT, input, position)
}

/// https://www.w3.org/TR/css-syntax-3/#consume-string-token
///
/// Matches from the quote at `position` up to and including the matching
/// quote. An unterminated string stops before the first raw newline or at the
/// end of input; the returned flag tells whether the closing quote was found.
pub(crate) fn string(input: &str, position: usize) -> Option<(usize, bool)> {
    let rest = input.get(position..)?;
    let regex = match rest.chars().next()? {
        '"' => &DOUBLE_QUOTED_STRING,
        '\'' => &SINGLE_QUOTED_STRING,
        _ => return None,
    };

    let captures = regex.captures(rest)?;
    let end = captures.get(0)?.end();
    Some((position + end, captures.get(1).is_some()))
}
