use std::fmt;

use css_tokenizer::Token;

/// https://www.w3.org/TR/css-syntax-3/#css-stylesheet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

/// https://www.w3.org/TR/css-syntax-3/#css-rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    AtRule(AtRule),
    QualifiedRule(QualifiedRule),
}

impl Rule {
    pub fn prelude(&self) -> &[ComponentValue] {
        match self {
            Rule::AtRule(rule) => &rule.prelude,
            Rule::QualifiedRule(rule) => &rule.prelude,
        }
    }

    pub fn block(&self) -> Option<&SimpleBlock> {
        match self {
            Rule::AtRule(rule) => rule.block.as_ref(),
            Rule::QualifiedRule(rule) => rule.block.as_ref(),
        }
    }
}

/// https://www.w3.org/TR/css-syntax-3/#at-rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// The at-keyword without its `@`.
    pub name: String,
    pub prelude: Vec<ComponentValue>,
    /// `None` when the rule was ended by `;` or by the end of input.
    pub block: Option<SimpleBlock>,
}

/// https://www.w3.org/TR/css-syntax-3/#qualified-rule
///
/// The parser only ever returns qualified rules that have a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedRule {
    pub prelude: Vec<ComponentValue>,
    pub block: Option<SimpleBlock>,
}

/// https://www.w3.org/TR/css-syntax-3/#component-value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentValue {
    /// https://www.w3.org/TR/css-syntax-3/#preserved-tokens
    PreservedToken(Token),
    Function(Function),
    SimpleBlock(SimpleBlock),
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::PreservedToken(token) => write!(f, "{token}"),
            ComponentValue::Function(function) => f.write_str(&function.text),
            ComponentValue::SimpleBlock(block) => f.write_str(&block.text),
        }
    }
}

/// https://www.w3.org/TR/css-syntax-3/#function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    /// Raw source text from the name up to and including the closing `)`,
    /// or up to the end of input if the function is unterminated.
    pub text: String,
    pub components: Vec<ComponentValue>,
}

/// https://www.w3.org/TR/css-syntax-3/#simple-block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleBlock {
    /// One of `(`, `[` or `{`.
    pub associated_token: Token,
    /// Raw source text from the opening bracket up to and including the
    /// closing one, or up to the end of input if the block is unterminated.
    pub text: String,
    pub values: Vec<ComponentValue>,
}
