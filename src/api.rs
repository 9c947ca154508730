//! Public parse entry points.
//!
//! [`parse_document`] and [`parse_str`] run the full pipeline and return
//! the synthetic `root` tag. The three smaller entry points parse a value
//! list, an attribute list or a single literal out of a string, reusing
//! the same lexer and assembler so every continuation and
//! date/time-resolution rule applies to them unchanged.

use crate::error::{ParseError, SdlError};
use crate::lexer::Lexer;
use crate::parser::{self, Parser};
use crate::tag::{Attributes, Tag};
use crate::value::Value;
use std::io::{BufRead, Cursor};

/// Parses a full document from any line-producing source.
///
/// Returns the synthetic `root` tag; the document's top-level tags are its
/// children. The source is consumed to exhaustion and released on every
/// exit path.
///
/// # Errors
/// Returns a [`ParseError`] for malformed input and an I/O error if the
/// source fails.
pub fn parse_document<R: BufRead>(source: R) -> Result<Tag, SdlError> {
    Parser::new(source).parse()
}

/// Parses a full document held in memory.
///
/// ```rust
/// let root = sdl_core::parse_str("greeting \"hello\"").unwrap();
/// assert_eq!(root.children()[0].name(), "greeting");
/// ```
pub fn parse_str(text: &str) -> Result<Tag, SdlError> {
    parse_document(Cursor::new(text))
}

/// Parses `text` as the value list of an implicit tag and returns the
/// first parsed tag's values.
///
/// ```rust
/// use sdl_core::Value;
/// let values = sdl_core::parse_values("1 2.5 \"three\"").unwrap();
/// assert_eq!(values[0], Value::Int32(1));
/// assert_eq!(values.len(), 3);
/// ```
pub fn parse_values(text: &str) -> Result<Vec<Value>, SdlError> {
    let root = parse_str(text)?;
    match root.children().first() {
        Some(tag) => Ok(tag.values().to_vec()),
        None => Err(ParseError::new("Expecting a value list but got an empty input", 1, 1).into()),
    }
}

/// Parses `text` as the attribute list of an implicit `atts` tag and
/// returns the resulting attribute map.
///
/// ```rust
/// use sdl_core::Value;
/// let atts = sdl_core::parse_attributes("name=\"joe\" size=5").unwrap();
/// assert_eq!(atts["size"], (String::new(), Value::Int32(5)));
/// ```
pub fn parse_attributes(text: &str) -> Result<Attributes, SdlError> {
    let root = parse_str(&format!("atts {text}"))?;
    Ok(root
        .children()
        .first()
        .map(|tag| tag.attributes().clone())
        .unwrap_or_default())
}

/// Parses a single literal: a string, character, number, boolean, `null`,
/// binary, date, date-time or time span.
///
/// ```rust
/// use sdl_core::Value;
/// assert_eq!(sdl_core::parse_literal("-.5").unwrap(), Value::Float64(-0.5));
/// assert_eq!(
///     sdl_core::parse_literal("[aGk=]").unwrap(),
///     Value::Binary(vec![0x68, 0x69])
/// );
/// ```
pub fn parse_literal(text: &str) -> Result<Value, SdlError> {
    let mut lexer = Lexer::new(Cursor::new(text));
    let Some(tokens) = lexer.next_token_line()? else {
        return Err(ParseError::new("Expecting a literal but got an empty input", 1, 1).into());
    };
    if !tokens[0].kind.is_literal() {
        return Err(ParseError::new(
            format!("Expecting a literal but got {}", tokens[0].kind.describe()),
            tokens[0].line,
            tokens[0].column,
        )
        .into());
    }
    let mut index = 0;
    let value = parser::read_value(&tokens, &mut index)?;
    if let Some(extra) = tokens.get(index) {
        return Err(ParseError::new(
            format!("Expecting a single literal but got {}", extra.kind.describe()),
            extra.line,
            extra.column,
        )
        .into());
    }
    if lexer.next_token_line()?.is_some() {
        return Err(ParseError::new(
            "Expecting a single literal but got further content",
            lexer.line_number(),
            1,
        )
        .into());
    }
    Ok(value)
}
