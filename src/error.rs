use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the crate.
///
/// Parsing produces [`ParseError`], coercion of host values and typed
/// extraction produce [`CoercionError`], and reading from the underlying
/// source can surface an I/O error.
#[derive(Error, Debug, Diagnostic)]
pub enum SdlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Coercion(#[from] CoercionError),

    #[error("I/O error while reading the source")]
    #[diagnostic(code(sdl::io))]
    Io(#[from] std::io::Error),
}

/// A lexical or syntactic failure during document or literal parsing.
///
/// Carries a 1-based line and column. Any parse error terminates the current
/// parse; no partial tree is returned.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("{message} (line {line}, column {column})")]
#[diagnostic(
    code(sdl::parse),
    help("The input is not well-formed SDL at the reported position.")
)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// A host value could not be stored as an SDL value, or an SDL value could
/// not be extracted into the requested host type.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("{message}")]
#[diagnostic(
    code(sdl::coerce),
    help("Only the thirteen SDL value variants can be stored in a tag.")
)]
pub struct CoercionError {
    pub message: String,
}

impl CoercionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
