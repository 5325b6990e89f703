use super::parser_algorithms::{consume_a_list_of_component_values, consume_a_list_of_rules};
use super::types::{ComponentValue, Rule, Stylesheet};
use super::{ParseError, Parser};

/// 5.3. Parser Entry Points
///
/// https://www.w3.org/TR/css-syntax-3/#parser-entry-points
///
/// Every entry point consumes the rest of the input. A hard tokenizer error
/// aborts the call; the parser is left just past the offending input.
impl<'a> Parser<'a> {
    /// 5.3.3. Parse a stylesheet
    ///
    /// "Parse a stylesheet" is intended to be the normal parser entry point, for parsing
    /// stylesheets.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-stylesheet
    pub fn parse_a_stylesheet(&mut self) -> Result<Stylesheet, ParseError> {
        // Consume a list of rules from input, with the top-level flag set,
        // and set the stylesheet’s value to the result.
        let rules = consume_a_list_of_rules(&mut self.input, true)?;

        // Return the stylesheet.
        Ok(Stylesheet { rules })
    }

    /// 5.3.4. Parse a list of rules
    ///
    /// Meant for the contents of a block, such as the `text` of an `@media`
    /// block with its brackets removed. `<!--` and `-->` start at-rules here.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-list-of-rules
    pub fn parse_a_list_of_rules(&mut self) -> Result<Vec<Rule>, ParseError> {
        // Consume a list of rules from the input, with the top-level flag unset.
        consume_a_list_of_rules(&mut self.input, false)
    }

    /// 5.3.10. Parse a list of component values
    ///
    /// Whitespace is kept, so this is suitable for declaration values.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-list-of-component-values
    pub fn parse_a_list_of_component_values(&mut self) -> Result<Vec<ComponentValue>, ParseError> {
        consume_a_list_of_component_values(&mut self.input)
    }
}
