//! # SDL Tokenizer
//!
//! The lexer converts the character stream of one logical line into a
//! sequence of [`Token`]s. It is a hand-written, stateful scanner working
//! line by line: it pulls cooked lines from the [`LineReader`] and, while
//! inside a multi-line construct (double-quoted string continuations, raw
//! back-quoted strings, binary literals, block comments), switches to raw
//! lines so blank and `#` lines keep their meaning.
//!
//! Literal tokens carry their decoded payload: a `Number` token already
//! holds the typed [`Value`], a `Date` token holds the calendar date, and a
//! `TimeOrSpan` token holds the undecided time-span-with-zone intermediate
//! that the parser later collapses into either a `TimeSpan` value or the
//! time portion of a `DateTime`.
//!
//! ## Example
//!
//! ```rust
//! use sdl_core::lexer::{Lexer, TokenKind};
//! use std::io::Cursor;
//!
//! let mut lexer = Lexer::new(Cursor::new("size 5 name=\"joe\""));
//! let line = lexer.next_token_line().unwrap().unwrap();
//! assert_eq!(line[0].kind, TokenKind::Identifier("size".to_string()));
//! assert_eq!(line.len(), 5);
//! assert!(lexer.next_token_line().unwrap().is_none());
//! ```

use crate::error::{ParseError, SdlError};
use crate::literal::{self, TimeSpanWithZone};
use crate::reader::LineReader;
use crate::value::Value;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::NaiveDate;
use std::io::BufRead;

/// The kinds of token one logical SDL line can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A tag, namespace or attribute name.
    Identifier(String),
    /// A double- or back-quoted string literal, unescaped.
    String(String),
    /// A character literal.
    Char(char),
    /// A number literal, already classified by its suffix.
    Number(Value),
    /// `true`, `false`, `on` or `off`.
    Bool(bool),
    /// The `null` keyword.
    Null,
    /// A `[base64]` literal, decoded.
    Binary(Vec<u8>),
    /// A `YYYY/MM/DD` literal.
    Date(NaiveDate),
    /// A time literal that is either a time span or the time portion of a
    /// date-time; the parser decides which.
    TimeOrSpan(TimeSpanWithZone),
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// `{`
    StartBlock,
    /// `}`
    EndBlock,
}

impl TokenKind {
    /// Returns `true` for the token kinds that denote a value.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::String(_)
                | TokenKind::Char(_)
                | TokenKind::Number(_)
                | TokenKind::Bool(_)
                | TokenKind::Null
                | TokenKind::Binary(_)
                | TokenKind::Date(_)
                | TokenKind::TimeOrSpan(_)
        )
    }

    /// A short name for error messages.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier(_) => "identifier",
            TokenKind::String(_) => "string literal",
            TokenKind::Char(_) => "character literal",
            TokenKind::Number(_) => "number literal",
            TokenKind::Bool(_) => "boolean literal",
            TokenKind::Null => "null",
            TokenKind::Binary(_) => "binary literal",
            TokenKind::Date(_) => "date literal",
            TokenKind::TimeOrSpan(_) => "time literal",
            TokenKind::Colon => "':'",
            TokenKind::Equals => "'='",
            TokenKind::StartBlock => "'{'",
            TokenKind::EndBlock => "'}'",
        }
    }
}

/// A single token with its 1-based position in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Token {
        Token { kind, line, column }
    }
}

/// The tokenizer: yields one `Vec<Token>` per logical line.
///
/// A logical line can span several physical lines through string, binary
/// and block-comment continuations and the trailing-`\` line continuation.
pub struct Lexer<R> {
    reader: LineReader<R>,
    line: Vec<char>,
    pos: usize,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: LineReader::new(source),
            line: Vec::new(),
            pos: 0,
        }
    }

    /// The 1-based number of the physical line currently being scanned.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.reader.line_number().max(1)
    }

    /// Scans and returns the next non-empty token line, or `None` at the
    /// end of the source. Lines holding only comments produce no tokens
    /// and are skipped.
    pub fn next_token_line(&mut self) -> Result<Option<Vec<Token>>, SdlError> {
        loop {
            match self.reader.next_content()? {
                None => return Ok(None),
                Some(text) => {
                    self.set_line(text);
                    let tokens = self.scan_line()?;
                    if !tokens.is_empty() {
                        return Ok(Some(tokens));
                    }
                }
            }
        }
    }

    fn scan_line(&mut self) -> Result<Vec<Token>, SdlError> {
        let mut tokens = Vec::new();
        loop {
            while matches!(self.peek(), Some(' ' | '\t')) {
                self.advance();
            }
            let Some(c) = self.peek() else { break };
            let line = self.line_number();
            let column = self.pos + 1;
            match c {
                '#' => break,
                '/' if self.peek_at(1) == Some('/') => break,
                '-' if self.peek_at(1) == Some('-') => break,
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment()?,
                '{' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::StartBlock, line, column));
                }
                '}' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::EndBlock, line, column));
                }
                '=' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Equals, line, column));
                }
                ':' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Colon, line, column));
                }
                '"' => {
                    self.advance();
                    let value = self.scan_quoted_string()?;
                    tokens.push(Token::new(TokenKind::String(value), line, column));
                }
                '`' => {
                    self.advance();
                    let value = self.scan_raw_string()?;
                    tokens.push(Token::new(TokenKind::String(value), line, column));
                }
                '\'' => {
                    self.advance();
                    let value = self.scan_character()?;
                    tokens.push(Token::new(TokenKind::Char(value), line, column));
                }
                '[' => {
                    self.advance();
                    let value = self.scan_binary(line, column)?;
                    tokens.push(Token::new(TokenKind::Binary(value), line, column));
                }
                '\\' => self.scan_line_continuation()?,
                c if c.is_ascii_digit() || c == '-' || c == '.' => {
                    let kind = self.scan_number_like(line, column)?;
                    tokens.push(Token::new(kind, line, column));
                }
                c if c.is_alphabetic() || c == '_' => {
                    let kind = self.scan_identifier();
                    tokens.push(Token::new(kind, line, column));
                }
                other => {
                    return Err(self.error_here(format!("unexpected character '{other}'")));
                }
            }
        }
        Ok(tokens)
    }

    // == Character cursor over the current physical line ==

    fn set_line(&mut self, text: String) {
        self.line = text.chars().collect();
        self.pos = 0;
    }

    fn peek(&self) -> Option<char> {
        self.line.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.line.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn error_here(&self, message: impl Into<String>) -> SdlError {
        ParseError::new(message, self.line_number(), self.pos + 1).into()
    }

    /// Pulls the next raw physical line while inside a multi-line
    /// construct; running out of input is fatal for every such construct.
    fn continue_raw(&mut self, what: &str) -> Result<(), SdlError> {
        match self.reader.next_raw()? {
            Some(text) => {
                self.set_line(text);
                Ok(())
            }
            None => Err(self.error_here(format!("{what} not terminated before end of input"))),
        }
    }

    // == Token scanners ==

    fn scan_quoted_string(&mut self) -> Result<String, SdlError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(value),
                Some('\\') => match self.peek() {
                    Some('\\') => {
                        value.push('\\');
                        self.advance();
                    }
                    Some('"') => {
                        value.push('"');
                        self.advance();
                    }
                    Some('n') => {
                        value.push('\n');
                        self.advance();
                    }
                    Some('r') => {
                        value.push('\r');
                        self.advance();
                    }
                    Some('t') => {
                        value.push('\t');
                        self.advance();
                    }
                    Some(' ' | '\t') | None => {
                        // Backslash, optional spaces/tabs, then the line
                        // end: a continuation. The backslash and the next
                        // line's leading whitespace are both dropped.
                        while matches!(self.peek(), Some(' ' | '\t')) {
                            self.advance();
                        }
                        if self.peek().is_some() {
                            return Err(self.error_here("illegal escape in string literal"));
                        }
                        self.continue_raw("string literal")?;
                        while matches!(self.peek(), Some(' ' | '\t')) {
                            self.advance();
                        }
                    }
                    Some(other) => {
                        return Err(self
                            .error_here(format!("illegal escape '\\{other}' in string literal")));
                    }
                },
                Some(c) => value.push(c),
                None => {
                    return Err(self.error_here("string literal not terminated on its line"));
                }
            }
        }
    }

    fn scan_raw_string(&mut self) -> Result<String, SdlError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('`') => return Ok(value),
                Some(c) => value.push(c),
                None => {
                    value.push('\n');
                    self.continue_raw("raw string literal")?;
                }
            }
        }
    }

    fn scan_character(&mut self) -> Result<char, SdlError> {
        let value = match self.advance() {
            None => return Err(self.error_here("character literal not terminated")),
            Some('\'') => return Err(self.error_here("empty character literal")),
            Some('\\') => match self.advance() {
                Some('\\') => '\\',
                Some('\'') => '\'',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('t') => '\t',
                Some(other) => {
                    return Err(self
                        .error_here(format!("illegal escape '\\{other}' in character literal")));
                }
                None => return Err(self.error_here("character literal not terminated")),
            },
            Some(c) => c,
        };
        match self.advance() {
            Some('\'') => Ok(value),
            _ => Err(self.error_here("character literal must contain exactly one character")),
        }
    }

    fn scan_binary(&mut self, line: usize, column: usize) -> Result<Vec<u8>, SdlError> {
        let mut text = String::new();
        loop {
            match self.advance() {
                Some(']') => break,
                Some(c) if c.is_ascii_whitespace() => {}
                Some(c) => text.push(c),
                None => self.continue_raw("binary literal")?,
            }
        }
        BASE64
            .decode(text.as_bytes())
            .map_err(|_| ParseError::new("malformed base64 in binary literal", line, column).into())
    }

    fn skip_block_comment(&mut self) -> Result<(), SdlError> {
        self.advance();
        self.advance();
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {}
                None => self.continue_raw("block comment")?,
            }
        }
    }

    /// Trailing `\` outside any literal: splice the next content line into
    /// the current logical line.
    fn scan_line_continuation(&mut self) -> Result<(), SdlError> {
        self.advance();
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }
        if self.peek().is_some() {
            return Err(self.error_here("unexpected character '\\'"));
        }
        match self.reader.next_content()? {
            Some(text) => {
                self.set_line(text);
                Ok(())
            }
            None => Err(self.error_here("line continuation at end of input")),
        }
    }

    /// Scans the number/date/time-span family: accumulate the literal text,
    /// then classify by content (`/` means date, `:` means time-or-span).
    fn scan_number_like(&mut self, line: usize, column: usize) -> Result<TokenKind, SdlError> {
        let mut text = String::new();
        if let Some(c) = self.advance() {
            text.push(c);
        }
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | ':' | '/')) {
                break;
            }
            // A `/*` opens a comment and `--` comments out the rest of the
            // line; neither belongs to the literal.
            if c == '/' && self.peek_at(1) == Some('*') {
                break;
            }
            if c == '-' && self.peek_at(1) == Some('-') {
                break;
            }
            text.push(c);
            self.advance();
        }

        let result = if text.contains('/') {
            literal::scan_date(&text).map(TokenKind::Date)
        } else if text.contains(':') {
            literal::scan_time_span_with_zone(&text).map(TokenKind::TimeOrSpan)
        } else {
            literal::scan_number(&text).map(TokenKind::Number)
        };
        result.map_err(|message| ParseError::new(message, line, column).into())
    }

    fn scan_identifier(&mut self) -> TokenKind {
        let mut ident = String::new();
        if let Some(c) = self.advance() {
            ident.push(c);
        }
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        match ident.as_str() {
            "true" | "on" => TokenKind::Bool(true),
            "false" | "off" => TokenKind::Bool(false),
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier(ident),
        }
    }
}
