//! Document attribute values and processor options
//!
//! AsciiDoc attributes are string-or-boolean valued. Option attribute values
//! may carry a trailing `@` ("soft set"): a soft value can be overridden by a
//! matching attribute entry in the document itself, and the marker is
//! stripped whenever the value is used for rendering.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An attribute value: a string or a boolean flag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean flag attribute (`:toc:` style on/off)
    Bool(bool),
    /// String-valued attribute
    Str(String),
}

impl AttributeValue {
    /// String form of the value, if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            AttributeValue::Bool(_) => None,
        }
    }

    /// Whether the value is soft-set (trailing `@`)
    pub fn is_soft(&self) -> bool {
        matches!(self, AttributeValue::Str(s) if s.ends_with('@'))
    }

    /// String form with any trailing soft-set `@` marker stripped
    pub fn resolved(&self) -> Option<&str> {
        self.as_str().map(|s| s.strip_suffix('@').unwrap_or(s))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Str(s) => f.write_str(s),
            AttributeValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Str(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Str(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

/// Options handed to [`crate::Processor::load`]
///
/// The `attributes` map is overlaid onto the document's own attribute entries
/// during conversion. Hard values win over document entries; soft values
/// (trailing `@`) yield to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProcessorOptions {
    /// Attributes injected by the caller (e.g. `imagesdir`)
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}
