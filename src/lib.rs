//! Core parser, value model and serializer for the Simple Declarative
//! Language (SDL): a human-readable, tag-oriented configuration format.
//! A document is a forest of tags; each tag has a name with an optional
//! namespace, an ordered list of typed values, a set of typed attributes
//! and child tags.
//!
//! ```text
//! # an SDL document
//! author "Ann Example" active=true
//! folder "projects" {
//!     file "readme.txt" size=1024 modified=2023/05/12 14:32:00
//! }
//! ```
//!
//! ```rust
//! use sdl_core::{parse_str, Value};
//!
//! let root = parse_str("size 5 name=\"joe\"").unwrap();
//! let tag = &root.children()[0];
//! assert_eq!(tag.name(), "size");
//! assert_eq!(tag.values()[0], Value::Int32(5));
//! assert_eq!(tag.attribute("name"), Some(&Value::String("joe".into())));
//!
//! // Round trip: serialization is canonical SDL.
//! let again = parse_str(&root.children_to_sdl()).unwrap();
//! assert_eq!(root, again);
//! ```

pub mod error;
pub mod lexer;
mod literal;
pub mod parser;
pub mod reader;
pub mod serialization;
pub mod tag;
pub mod value;
mod api;

pub use api::{parse_attributes, parse_document, parse_literal, parse_str, parse_values};
pub use error::{CoercionError, ParseError, SdlError};
pub use serialization::PlainValue;
pub use tag::{Attributes, Tag, ANONYMOUS_NAME};
pub use value::{DateTime, Value};
