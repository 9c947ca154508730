//! The SDL tag tree.
//!
//! A [`Tag`] is a named, possibly namespaced record of values, attributes
//! and child tags. Tags are produced by the parser, freely mutated by
//! their owner, and serialized back to canonical SDL text. Two tags are
//! equal when their canonical serializations are equal; for attributes
//! this makes equality independent of insertion order.
//!
//! Accessors hand out plain references into the tag; the borrow checker
//! rules out the stale-snapshot hazards the copy-on-read pattern would
//! otherwise guard against.

use crate::error::{CoercionError, SdlError};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The reserved name of the anonymous tag carrying values-only lines.
/// When serialized, the name (and its trailing space) is suppressed.
pub const ANONYMOUS_NAME: &str = "content";

/// A tag's attributes: attribute name to `(namespace, value)`, kept in
/// ascending name order for serialization.
pub type Attributes = BTreeMap<String, (String, Value)>;

pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn check_identifier(what: &str, text: &str) -> Result<(), CoercionError> {
    if is_identifier(text) {
        Ok(())
    } else {
        Err(CoercionError::new(format!("invalid {what} '{text}'")))
    }
}

/// A named, possibly namespaced node of the SDL tree.
#[derive(Debug, Clone)]
pub struct Tag {
    namespace: String,
    name: String,
    values: Vec<Value>,
    attributes: Attributes,
    children: Vec<Tag>,
}

impl Tag {
    /// Creates a tag in the empty namespace. The name must be a valid SDL
    /// identifier.
    pub fn new(name: &str) -> Result<Tag, SdlError> {
        Tag::with_namespace("", name)
    }

    /// Creates a namespaced tag. The namespace may be empty; a non-empty
    /// namespace must be a valid SDL identifier.
    pub fn with_namespace(namespace: &str, name: &str) -> Result<Tag, SdlError> {
        check_identifier("tag name", name)?;
        if !namespace.is_empty() {
            check_identifier("namespace", namespace)?;
        }
        Ok(Tag {
            namespace: namespace.to_string(),
            name: name.to_string(),
            values: Vec::new(),
            attributes: Attributes::new(),
            children: Vec::new(),
        })
    }

    /// The synthetic `root` tag wrapping a parsed document's top-level
    /// tags.
    #[must_use]
    pub fn root() -> Tag {
        Tag {
            namespace: String::new(),
            name: "root".to_string(),
            values: Vec::new(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// The anonymous `content` tag produced for values-only lines.
    #[must_use]
    pub fn anonymous() -> Tag {
        Tag {
            namespace: String::new(),
            name: ANONYMOUS_NAME.to_string(),
            values: Vec::new(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the tag; an invalid identifier leaves it unchanged.
    pub fn set_name(&mut self, name: &str) -> Result<(), SdlError> {
        check_identifier("tag name", name)?;
        self.name = name.to_string();
        Ok(())
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Changes the namespace; the empty string clears it. An invalid
    /// identifier leaves the tag unchanged.
    pub fn set_namespace(&mut self, namespace: &str) -> Result<(), SdlError> {
        if !namespace.is_empty() {
            check_identifier("namespace", namespace)?;
        }
        self.namespace = namespace.to_string();
        Ok(())
    }

    /// Returns `true` if this is the anonymous `content` tag.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.namespace.is_empty() && self.name == ANONYMOUS_NAME
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    /// Appends a value, coercing from any host type with an SDL variant.
    pub fn push_value(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Looks up an attribute value by name, ignoring its namespace.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).map(|(_, value)| value)
    }

    /// Sets an attribute in the empty namespace. Setting an existing name
    /// replaces both its value and its namespace.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) -> Result<(), SdlError> {
        self.set_namespaced_attribute("", name, value)
    }

    /// Sets a namespaced attribute. Invalid identifiers leave the tag
    /// unchanged.
    pub fn set_namespaced_attribute(
        &mut self,
        namespace: &str,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), SdlError> {
        check_identifier("attribute name", name)?;
        if !namespace.is_empty() {
            check_identifier("namespace", namespace)?;
        }
        self.attributes
            .insert(name.to_string(), (namespace.to_string(), value.into()));
        Ok(())
    }

    /// Removes an attribute, returning its value if it was present.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name).map(|(_, value)| value)
    }

    #[must_use]
    pub fn children(&self) -> &[Tag] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Tag> {
        &mut self.children
    }

    /// Appends a child tag; the child is owned by this tag from then on.
    pub fn push_child(&mut self, child: Tag) {
        self.children.push(child);
    }

    /// The canonical SDL form of this tag, children included.
    #[must_use]
    pub fn to_sdl(&self) -> String {
        let mut out = String::new();
        self.write_sdl(&mut out, "");
        out
    }

    /// Serializes the children as an SDL document: one top-level tag per
    /// logical line, CR-LF terminated. This is the document form of the
    /// synthetic `root` tag.
    #[must_use]
    pub fn children_to_sdl(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_sdl(&mut out, "");
            out.push_str("\r\n");
        }
        out
    }

    fn write_sdl(&self, out: &mut String, prefix: &str) {
        out.push_str(prefix);
        let mut wrote_any = false;
        if !self.is_anonymous() {
            if !self.namespace.is_empty() {
                out.push_str(&self.namespace);
                out.push(':');
            }
            out.push_str(&self.name);
            wrote_any = true;
        }
        for value in &self.values {
            if wrote_any {
                out.push(' ');
            }
            out.push_str(&value.to_string());
            wrote_any = true;
        }
        for (name, (namespace, value)) in &self.attributes {
            if wrote_any {
                out.push(' ');
            }
            if !namespace.is_empty() {
                out.push_str(namespace);
                out.push(':');
            }
            out.push_str(name);
            out.push('=');
            out.push_str(&value.to_string());
            wrote_any = true;
        }
        if !self.children.is_empty() {
            if wrote_any {
                out.push(' ');
            }
            out.push_str("{\r\n");
            let child_prefix = format!("{prefix}    ");
            for child in &self.children {
                child.write_sdl(out, &child_prefix);
                out.push_str("\r\n");
            }
            out.push_str(prefix);
            out.push('}');
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sdl())
    }
}

/// Tag equality is equality of canonical serialization.
impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.to_sdl() == other.to_sdl()
    }
}
