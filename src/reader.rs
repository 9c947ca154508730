//! The physical-line source feeding the tokenizer.
//!
//! Two read modes: *cooked* skips lines that are blank or `#`-prefixed once
//! trimmed; *raw* returns every physical line and is used only inside
//! multi-line literals and block comments. The line counter advances on
//! every physical line in either mode, so error positions are stable.

use crate::error::SdlError;
use std::io::BufRead;

/// A stateful reader yielding physical lines with a 1-based line counter.
///
/// Line endings (`\n` or `\r\n`) are stripped; the rest of the crate never
/// sees a terminator. The underlying reader is released when the
/// `LineReader` is dropped, on success and error paths alike.
pub struct LineReader<R> {
    inner: R,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_number: 0,
        }
    }

    /// The 1-based number of the most recently returned line, or 0 before
    /// the first read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Raw mode: the next physical line, terminator stripped.
    pub fn next_raw(&mut self) -> Result<Option<String>, SdlError> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    /// Cooked mode: the next line that is neither blank nor a `#` comment.
    pub fn next_content(&mut self) -> Result<Option<String>, SdlError> {
        loop {
            match self.next_raw()? {
                None => return Ok(None),
                Some(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() && !trimmed.starts_with('#') {
                        return Ok(Some(line));
                    }
                }
            }
        }
    }
}
