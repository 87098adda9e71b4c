//! The output entity handed to the content graph
//!
//! A [`DocumentRecord`] is created once per source file per build and is
//! immutable after creation; the external content graph owns it from then on.
//! Serialization uses the camelCase field names the graph consumers expect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use graphdoc_processor::AttributeValue;

/// Graph node type for transformed documents
pub const NODE_TYPE: &str = "Asciidoc";

/// Media type of the rendered content
pub const MEDIA_TYPE: &str = "text/html";

/// A transformed document node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Node id, derived deterministically from the source node id
    pub id: String,
    /// Id of the source node this record was derived from
    pub parent: String,
    /// Rendered HTML body
    pub html: String,
    /// Structured document title
    pub document: DocumentFields,
    /// Revision metadata, present only if the source declares it
    pub revision: Option<Revision>,
    /// Author metadata, present only if the source declares an author
    pub author: Option<Author>,
    /// Page-scoped attributes, prefix stripped
    pub page_attributes: BTreeMap<String, AttributeValue>,
    /// Graph bookkeeping fields
    pub internal: RecordInternal,
}

/// Structured document-title fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFields {
    /// Combined title (main plus subtitle)
    pub title: String,
    /// Subtitle; empty string when the title has none
    pub subtitle: String,
    /// Main part of the title
    pub main: String,
}

/// Revision metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    /// Revision date
    pub date: String,
    /// Revision number
    pub number: String,
    /// Revision remark
    pub remark: String,
}

/// Author metadata; absent fields are empty strings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Full name
    pub full_name: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Middle name
    pub middle_name: String,
    /// Author initials
    pub author_initials: String,
    /// Email address
    pub email: String,
}

/// Graph-internal bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInternal {
    /// Node type, always [`NODE_TYPE`]
    #[serde(rename = "type")]
    pub type_name: String,
    /// Content media type, always [`MEDIA_TYPE`]
    pub media_type: String,
    /// Content-derived identity digest over the assembled record
    pub content_digest: String,
}
