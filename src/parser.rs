//! The tag assembler: turns token lines into the tag tree.
//!
//! One token line normally builds one tag. A line ending in `{` opens a
//! block: the tag collects the following lines as children until the
//! balancing `}`. The assembler also owns the one piece of context the
//! tokenizer cannot decide locally: a `Date` token immediately followed by
//! a `TimeOrSpan` token collapses into a single `DateTime` value, while a
//! stand-alone `TimeOrSpan` becomes a `TimeSpan` (and must then carry
//! neither a timezone nor a missing seconds field).

use crate::error::{ParseError, SdlError};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::literal::TimeSpanWithZone;
use crate::tag::Tag;
use crate::value::{DateTime, Value};
use chrono::NaiveDate;
use std::io::BufRead;

/// A recursive descent parser over the token lines of one source.
///
/// The parser is bound to its source and consumes it to exhaustion; the
/// source is released when the parser is dropped, on every exit path.
pub struct Parser<R> {
    lexer: Lexer<R>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(source: R) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    /// Parses the whole source and returns the synthetic `root` tag whose
    /// children are the document's top-level tags.
    pub fn parse(&mut self) -> Result<Tag, SdlError> {
        let mut root = Tag::root();
        while let Some(tokens) = self.lexer.next_token_line()? {
            if tokens[0].kind == TokenKind::EndBlock {
                return Err(ParseError::new(
                    "no opening block for close block",
                    tokens[0].line,
                    tokens[0].column,
                )
                .into());
            }
            let tag = self.parse_tag_line(tokens)?;
            root.push_child(tag);
        }
        Ok(root)
    }

    fn parse_tag_line(&mut self, tokens: Vec<Token>) -> Result<Tag, SdlError> {
        match tokens.last() {
            Some(last) if last.kind == TokenKind::StartBlock => {
                let open_line = last.line;
                let mut tag = line_to_tag(&tokens[..tokens.len() - 1])?;
                self.parse_children(&mut tag, open_line)?;
                Ok(tag)
            }
            _ => line_to_tag(&tokens),
        }
    }

    fn parse_children(&mut self, parent: &mut Tag, open_line: usize) -> Result<(), SdlError> {
        loop {
            match self.lexer.next_token_line()? {
                None => {
                    return Err(
                        ParseError::new("no closing brace for block", open_line, 1).into()
                    );
                }
                Some(tokens) => {
                    if tokens[0].kind == TokenKind::EndBlock {
                        if let Some(extra) = tokens.get(1) {
                            return Err(unexpected(extra, "end of line after '}'"));
                        }
                        return Ok(());
                    }
                    let child = self.parse_tag_line(tokens)?;
                    parent.push_child(child);
                }
            }
        }
    }
}

fn unexpected(token: &Token, expected: &str) -> SdlError {
    ParseError::new(
        format!("Expecting {expected} but got {}", token.kind.describe()),
        token.line,
        token.column,
    )
    .into()
}

fn end_of_line(tokens: &[Token], expected: &str) -> SdlError {
    let (line, column) = tokens
        .last()
        .map_or((1, 1), |t| (t.line, t.column + 1));
    ParseError::new(
        format!("Expecting {expected} but got end of line"),
        line,
        column,
    )
    .into()
}

/// Builds one tag from one token line (the trailing `{`, if any, already
/// stripped). An empty line or a line opening with a literal produces the
/// anonymous `content` tag.
pub(crate) fn line_to_tag(tokens: &[Token]) -> Result<Tag, SdlError> {
    let mut index = 0;
    let mut tag = match tokens.first() {
        Some(Token {
            kind: TokenKind::Identifier(first),
            ..
        }) => match (tokens.get(1).map(|t| &t.kind), tokens.get(2)) {
            (
                Some(TokenKind::Colon),
                Some(Token {
                    kind: TokenKind::Identifier(name),
                    ..
                }),
            ) => {
                index = 3;
                Tag::with_namespace(first, name)?
            }
            (Some(TokenKind::Colon), Some(other)) => {
                return Err(unexpected(other, "a tag name after ':'"));
            }
            (Some(TokenKind::Colon), None) => {
                return Err(end_of_line(tokens, "a tag name after ':'"));
            }
            _ => {
                index = 1;
                Tag::new(first)?
            }
        },
        _ => Tag::anonymous(),
    };

    // Value phase: literals up to the first identifier.
    while index < tokens.len() {
        if matches!(tokens[index].kind, TokenKind::Identifier(_)) {
            break;
        }
        if !tokens[index].kind.is_literal() {
            return Err(unexpected(&tokens[index], "a value"));
        }
        let value = read_value(tokens, &mut index)?;
        tag.push_value(value);
    }

    // Attribute phase: name (":" name)? "=" literal, repeated.
    while index < tokens.len() {
        read_attribute(&mut tag, tokens, &mut index)?;
    }
    Ok(tag)
}

fn read_attribute(tag: &mut Tag, tokens: &[Token], index: &mut usize) -> Result<(), SdlError> {
    let first = match &tokens[*index].kind {
        TokenKind::Identifier(name) => name.clone(),
        _ => return Err(unexpected(&tokens[*index], "an attribute name")),
    };
    *index += 1;

    let (namespace, name) = if matches!(
        tokens.get(*index).map(|t| &t.kind),
        Some(TokenKind::Colon)
    ) {
        *index += 1;
        match tokens.get(*index) {
            Some(Token {
                kind: TokenKind::Identifier(name),
                ..
            }) => {
                let name = name.clone();
                *index += 1;
                (first, name)
            }
            Some(other) => return Err(unexpected(other, "an attribute name after ':'")),
            None => return Err(end_of_line(tokens, "an attribute name after ':'")),
        }
    } else {
        (String::new(), first)
    };

    match tokens.get(*index).map(|t| &t.kind) {
        Some(TokenKind::Equals) => *index += 1,
        Some(_) => return Err(unexpected(&tokens[*index], "'='")),
        None => return Err(end_of_line(tokens, "'='")),
    }

    match tokens.get(*index) {
        Some(token) if token.kind.is_literal() => {
            let value = read_value(tokens, index)?;
            tag.set_namespaced_attribute(&namespace, &name, value)?;
            Ok(())
        }
        Some(other) => Err(unexpected(other, "a value")),
        None => Err(end_of_line(tokens, "a value")),
    }
}

/// Reads one value starting at `index`, consuming two tokens when a date
/// and a time combine into a date-time.
pub(crate) fn read_value(tokens: &[Token], index: &mut usize) -> Result<Value, SdlError> {
    let token = &tokens[*index];
    let value = match &token.kind {
        TokenKind::String(s) => Value::String(s.clone()),
        TokenKind::Char(c) => Value::Character(*c),
        TokenKind::Number(v) => v.clone(),
        TokenKind::Bool(b) => Value::Boolean(*b),
        TokenKind::Null => Value::Null,
        TokenKind::Binary(bytes) => Value::Binary(bytes.clone()),
        TokenKind::Date(date) => {
            if let Some(Token {
                kind: TokenKind::TimeOrSpan(span),
                line,
                column,
            }) = tokens.get(*index + 1)
            {
                *index += 2;
                return combine_date_time(*date, span, *line, *column);
            }
            Value::Date(*date)
        }
        TokenKind::TimeOrSpan(span) => {
            if span.timezone.is_some() {
                return Err(ParseError::new(
                    "TimeSpan cannot have a timezone",
                    token.line,
                    token.column,
                )
                .into());
            }
            if span.seconds.is_none() {
                return Err(ParseError::new(
                    "time span requires hours, minutes and seconds",
                    token.line,
                    token.column,
                )
                .into());
            }
            Value::TimeSpan(span.to_duration())
        }
        _ => return Err(unexpected(token, "a value")),
    };
    *index += 1;
    Ok(value)
}

fn combine_date_time(
    date: NaiveDate,
    span: &TimeSpanWithZone,
    line: usize,
    column: usize,
) -> Result<Value, SdlError> {
    if span.days.is_some_and(|d| d != 0) {
        return Err(ParseError::new(
            "the time portion of a date/time cannot have a day component",
            line,
            column,
        )
        .into());
    }
    let time = span.time_of_day().ok_or_else(|| {
        ParseError::new("invalid time of day in date/time literal", line, column)
    })?;
    Ok(Value::DateTime(DateTime::new(
        date,
        time,
        span.timezone.clone(),
    )))
}
