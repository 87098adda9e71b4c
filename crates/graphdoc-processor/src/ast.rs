//! Block and inline elements of a parsed AsciiDoc document
//!
//! This module defines the in-memory shape of document content between the
//! parse and convert phases: block-level structure (paragraphs, headings,
//! lists, literal blocks, macros) and inline formatting runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeValue;

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A section heading
    Heading(Heading),
    /// An ordered or unordered list
    List(List),
    /// A delimited literal/code block
    Literal(LiteralBlock),
    /// A block image (`image::target[alt]`)
    Image(ImageBlock),
    /// An unexpanded block macro (`name::target[attrs]`), resolved at convert
    Macro(MacroCall),
    /// Raw HTML passthrough, typically produced by macro handlers
    Raw(String),
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content within the paragraph
    pub inlines: Vec<Inline>,
}

/// A section heading (`==` is level 1, `===` is level 2, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-5)
    pub level: u8,
    /// Heading text content
    pub text: Vec<Inline>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Type of list
    pub list_type: ListType,
    /// List items
    pub items: Vec<ListItem>,
}

/// List type variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListType {
    /// Unordered/bullet list (`*`)
    Unordered,
    /// Ordered/numbered list (`.`)
    Ordered,
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item content
    pub inlines: Vec<Inline>,
    /// Nesting level (0-based)
    pub level: u8,
}

/// A delimited literal block (`----` fences)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiteralBlock {
    /// The literal content, verbatim
    pub content: String,
    /// Language for syntax highlighting (from `[source,lang]`)
    pub language: Option<String>,
}

/// A block image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Image target path, resolved against `imagesdir` at convert
    pub target: String,
    /// Alternative text
    pub alt: Option<String>,
}

/// A block macro invocation awaiting expansion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroCall {
    /// Macro name (the part before `::`)
    pub name: String,
    /// Macro target (between `::` and `[`)
    pub target: String,
    /// Positional attributes from the attribute list
    pub attrs: Vec<String>,
}

/// Inline-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    /// Plain text content
    Text(String),
    /// Formatted content (bold, italic, monospace)
    Format(FormatType, Box<Inline>),
}

/// Text formatting types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatType {
    /// `*bold*`
    Bold,
    /// `_italic_`
    Italic,
    /// `` `monospace` ``
    Monospace,
}

/// Parsed document header: title, author line, revision line, attribute entries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    /// Document title, partitioned into main/subtitle
    pub title: Option<TitleParts>,
    /// Author metadata from the implicit author line
    pub author: Option<AuthorInfo>,
    /// Revision metadata from the revision line
    pub revision: Option<RevisionInfo>,
    /// `:key: value` attribute entries declared in the header
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// A document title partitioned into main and subtitle parts
///
/// The subtitle is everything after the last `": "` in the raw title,
/// mirroring Asciidoctor's partitioned title semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleParts {
    main: String,
    subtitle: Option<String>,
    combined: String,
}

impl TitleParts {
    /// Partition a raw title on the last `": "` separator
    pub fn partition(raw: &str) -> Self {
        match raw.rfind(": ") {
            Some(idx) => Self {
                main: raw[..idx].to_string(),
                subtitle: Some(raw[idx + 2..].to_string()),
                combined: raw.to_string(),
            },
            None => Self {
                main: raw.to_string(),
                subtitle: None,
                combined: raw.to_string(),
            },
        }
    }

    /// The main part of the title
    pub fn main(&self) -> &str {
        &self.main
    }

    /// The subtitle part, if present
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Whether the title carries a subtitle
    pub fn has_subtitle(&self) -> bool {
        self.subtitle.is_some()
    }

    /// The full, unpartitioned title
    pub fn combined(&self) -> &str {
        &self.combined
    }
}

/// Author metadata parsed from the implicit author line
///
/// Absent parts are empty strings, matching the attribute defaults the
/// transformer layer expects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorInfo {
    /// Full name, without the email part
    pub full_name: String,
    /// First word of the name
    pub first_name: String,
    /// Last word of the name (empty for single-word names)
    pub last_name: String,
    /// Middle words, joined (empty when fewer than three words)
    pub middle_name: String,
    /// Initials of first/middle/last parts
    pub initials: String,
    /// Email from the trailing `<...>` segment
    pub email: String,
}

/// Revision metadata parsed from the revision line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevisionInfo {
    /// Revision number (leading `v` stripped)
    pub number: String,
    /// Revision date
    pub date: String,
    /// Revision remark (after the `:`)
    pub remark: String,
}
