use css_tokenizer::Token;

use crate::error::ParseError;
use crate::token_streams::{ProcessResult, TokenStream};
use crate::types::{AtRule, ComponentValue, Function, QualifiedRule, Rule, SimpleBlock};

/// 5.4.1. Consume a list of rules
///
/// https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules
pub(crate) fn consume_a_list_of_rules(
    input: &mut TokenStream<'_>,
    top_level: bool,
) -> Result<Vec<Rule>, ParseError> {
    // Create an initially empty list of rules.
    let mut rules = vec![];

    // Repeatedly consume the next input token:
    input.process(|input, token| {
        match token {
            // <EOF-token>: Return the list of rules.
            None => return Ok(ProcessResult::Return(())),
            // <whitespace-token>: Do nothing.
            Some(Token::Whitespace) => {}
            // <CDO-token> or <CDC-token>: If the top-level flag is set, do nothing.
            Some(Token::Cdo | Token::Cdc) if top_level => {}
            // Otherwise, reconsume the current input token.
            // Consume an at-rule, and if anything is returned, append it to the list of rules.
            Some(token @ (Token::Cdo | Token::Cdc | Token::AtKeyword { .. })) => {
                input.reconsume(token);
                rules.push(Rule::AtRule(consume_an_at_rule(input)?));
            }
            // Anything else: Reconsume the current input token.
            // Consume a qualified rule. If anything is returned, append it to the list of rules.
            Some(token) => {
                input.reconsume(token);
                if let Some(rule) = consume_a_qualified_rule(input)? {
                    rules.push(Rule::QualifiedRule(rule));
                }
            }
        }
        Ok(ProcessResult::Continue)
    })?;

    Ok(rules)
}

/// 5.4.2. Consume an at-rule
///
/// https://www.w3.org/TR/css-syntax-3/#consume-at-rule
pub(crate) fn consume_an_at_rule(input: &mut TokenStream<'_>) -> Result<AtRule, ParseError> {
    // Consume the next input token. Create a new at-rule with its name set to the value of the
    // current input token, its prelude initially set to an empty list, and its value initially
    // set to nothing.
    let name = match input.consume_a_token()? {
        Some(Token::AtKeyword { value }) => value,
        // At-rules can also be started by <!-- and --> outside of the top level.
        Some(token) => token.to_string(),
        None => String::new(),
    };
    let mut rule = AtRule {
        name,
        prelude: vec![],
        block: None,
    };

    // Repeatedly consume the next input token:
    input.process(|input, token| match token {
        // <semicolon-token>: Return the at-rule.
        Some(Token::Semicolon) => Ok(ProcessResult::Return(())),
        // <EOF-token>: This is a parse error. Return the at-rule.
        None => {
            log_parse_error!(input.position(), "EOF in at-rule");
            Ok(ProcessResult::Return(()))
        }
        // <{-token>: Consume a simple block and assign it to the at-rule’s block. Return the
        // at-rule.
        Some(Token::LeftCurlyBracket) => {
            rule.block = Some(consume_a_simple_block(input, Token::LeftCurlyBracket)?);
            Ok(ProcessResult::Return(()))
        }
        // Anything else: Reconsume the current input token.
        // Consume a component value. Append the returned value to the at-rule’s prelude.
        Some(token) => {
            input.reconsume(token);
            if let Some(component_value) = consume_a_component_value(input)? {
                rule.prelude.push(component_value);
            }
            Ok(ProcessResult::Continue)
        }
    })?;

    Ok(rule)
}

/// 5.4.3. Consume a qualified rule
///
/// https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule
pub(crate) fn consume_a_qualified_rule(
    input: &mut TokenStream<'_>,
) -> Result<Option<QualifiedRule>, ParseError> {
    // Create a new qualified rule with its prelude initially set to an empty list,
    // and its value initially set to nothing.
    let mut prelude = vec![];

    // Repeatedly consume the next input token:
    let block = input.process(|input, token| match token {
        // <EOF-token>: This is a parse error. Return nothing.
        None => Ok(ProcessResult::Return(None)),
        // <{-token>: Consume a simple block and assign it to the qualified rule’s block.
        // Return the qualified rule.
        Some(Token::LeftCurlyBracket) => {
            let block = consume_a_simple_block(input, Token::LeftCurlyBracket)?;
            Ok(ProcessResult::Return(Some(block)))
        }
        // Anything else: Reconsume the current input token.
        // Consume a component value. Append the returned value to the qualified rule’s prelude.
        Some(token) => {
            input.reconsume(token);
            if let Some(component_value) = consume_a_component_value(input)? {
                prelude.push(component_value);
            }
            Ok(ProcessResult::Continue)
        }
    })?;

    if block.is_none() {
        log_parse_error!(input.position(), "EOF in qualified rule, dropping it");
        return Ok(None);
    }

    Ok(Some(QualifiedRule { prelude, block }))
}

/// 5.4.6. Consume a component value
///
/// https://www.w3.org/TR/css-syntax-3/#consume-component-value
pub(crate) fn consume_a_component_value(
    input: &mut TokenStream<'_>,
) -> Result<Option<ComponentValue>, ParseError> {
    // Consume the next input token.
    let Some(token) = input.consume_a_token()? else {
        return Ok(None);
    };

    let component_value = match token {
        // If the current input token is a <{-token>, <[-token>, or <(-token>, consume a simple
        // block and return it.
        Token::LeftCurlyBracket | Token::LeftSquareBracket | Token::LeftParenthesis => {
            ComponentValue::SimpleBlock(consume_a_simple_block(input, token)?)
        }
        // Otherwise, if the current input token is a <function-token>, consume a function and
        // return it.
        Token::Function { name, .. } => ComponentValue::Function(consume_a_function(input, name)?),
        // Otherwise, return the current input token.
        token => ComponentValue::PreservedToken(token),
    };

    Ok(Some(component_value))
}

/// 5.4.7. Consume a simple block
///
/// https://www.w3.org/TR/css-syntax-3/#consume-simple-block
///
/// Called right after `associated_token` was consumed. Whitespace directly
/// inside the brackets is not kept in the block's values.
pub(crate) fn consume_a_simple_block(
    input: &mut TokenStream<'_>,
    associated_token: Token,
) -> Result<SimpleBlock, ParseError> {
    let start = input.token_start();

    // The ending token is the mirror variant of the current input token.
    // (E.g. if it was called with <[-token>, the ending token is <]-token>.)
    let ending_token = associated_token.mirror();
    debug_assert!(
        ending_token.is_some(),
        "a '{{', '[' or '(' was expected while consuming a simple block"
    );

    let mut values = vec![];

    // Repeatedly consume the next input token and process it as follows:
    input.process(|input, token| match token {
        // ending token: Return the block.
        Some(token) if Some(&token) == ending_token.as_ref() => Ok(ProcessResult::Return(())),
        // <EOF-token>: This is a parse error. Return the block.
        None => {
            log_parse_error!(input.position(), "EOF in simple block");
            Ok(ProcessResult::Return(()))
        }
        // Anything else: Reconsume the current input token.
        // Consume a component value and append it to the value of the block.
        Some(token) => {
            input.reconsume(token);
            if let Some(component_value) = consume_a_component_value(input)? {
                values.push(component_value);
            }
            Ok(ProcessResult::Continue)
        }
    })?;

    trim_whitespace(&mut values);

    Ok(SimpleBlock {
        associated_token,
        text: input.slice(start, input.position()).to_string(),
        values,
    })
}

/// 5.4.8. Consume a function
///
/// https://www.w3.org/TR/css-syntax-3/#consume-function
///
/// Called right after the function token was consumed.
pub(crate) fn consume_a_function(
    input: &mut TokenStream<'_>,
    name: String,
) -> Result<Function, ParseError> {
    let start = input.token_start();

    // Create a function with its name equal to the value of the current input token
    // and with its value initially set to an empty list.
    let mut components = vec![];

    // Repeatedly consume the next input token and process it as follows:
    input.process(|input, token| match token {
        // <)-token>: Return the function.
        Some(Token::RightParenthesis) => Ok(ProcessResult::Return(())),
        // <EOF-token>: This is a parse error. Return the function.
        None => {
            log_parse_error!(input.position(), "EOF in function");
            Ok(ProcessResult::Return(()))
        }
        // Anything else: Reconsume the current input token.
        // Consume a component value and append the returned value to the function’s value.
        Some(token) => {
            input.reconsume(token);
            if let Some(component_value) = consume_a_component_value(input)? {
                components.push(component_value);
            }
            Ok(ProcessResult::Continue)
        }
    })?;

    Ok(Function {
        name,
        text: input.slice(start, input.position()).to_string(),
        components,
    })
}

/// Consumes component values up to the end of input.
///
/// https://www.w3.org/TR/css-syntax-3/#parse-list-of-component-values
pub(crate) fn consume_a_list_of_component_values(
    input: &mut TokenStream<'_>,
) -> Result<Vec<ComponentValue>, ParseError> {
    let mut values = vec![];

    input.process(|input, token| match token {
        None => Ok(ProcessResult::Return(())),
        Some(token) => {
            input.reconsume(token);
            if let Some(component_value) = consume_a_component_value(input)? {
                values.push(component_value);
            }
            Ok(ProcessResult::Continue)
        }
    })?;

    Ok(values)
}

fn trim_whitespace(values: &mut Vec<ComponentValue>) {
    let is_whitespace =
        |value: &ComponentValue| matches!(value, ComponentValue::PreservedToken(Token::Whitespace));

    while values.last().is_some_and(is_whitespace) {
        values.pop();
    }

    let leading = values.iter().take_while(|value| is_whitespace(value)).count();
    values.drain(..leading);
}
