//! Two-phase document handles
//!
//! [`ParsedDocument`] is the result of the load step. It exposes a single
//! operation, [`ParsedDocument::convert`], which renders HTML, expands block
//! macros, and finalizes the attribute set. Title, author, revision, and
//! attribute reads only exist on [`ConvertedDocument`], so reading before
//! conversion is impossible by construction.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::ast::{AuthorInfo, Block, Header, TitleParts};
use crate::attributes::{AttributeValue, ProcessorOptions};
use crate::error::Result;
use crate::html::HtmlRenderer;
use crate::processor::BlockMacro;

/// A parsed, not yet converted document
pub struct ParsedDocument {
    header: Header,
    blocks: Vec<Block>,
    options: ProcessorOptions,
    macros: HashMap<String, Arc<dyn BlockMacro>>,
}

impl ParsedDocument {
    pub(crate) fn new(
        header: Header,
        blocks: Vec<Block>,
        options: ProcessorOptions,
        macros: HashMap<String, Arc<dyn BlockMacro>>,
    ) -> Self {
        Self {
            header,
            blocks,
            options,
            macros,
        }
    }

    /// Convert the document to HTML, consuming the parse-phase handle
    ///
    /// Conversion expands block macros (failing on unregistered names) and
    /// finalizes the attribute set: document entries, overlaid with option
    /// attributes (soft `@` values yield to document entries), plus derived
    /// title/author/revision attributes.
    pub fn convert(self) -> Result<ConvertedDocument> {
        let mut attributes = self.header.attributes.clone();

        for (key, value) in &self.options.attributes {
            if value.is_soft() && attributes.contains_key(key) {
                continue;
            }
            attributes.insert(key.clone(), value.clone());
        }

        if let Some(title) = &self.header.title {
            attributes.insert("doctitle".to_string(), title.combined().into());
        }
        if let Some(author) = &self.header.author {
            let fields = [
                ("author", &author.full_name),
                ("firstname", &author.first_name),
                ("lastname", &author.last_name),
                ("middlename", &author.middle_name),
                ("authorinitials", &author.initials),
                ("email", &author.email),
            ];
            for (key, value) in fields {
                if !value.is_empty() {
                    attributes.insert(key.to_string(), value.as_str().into());
                }
            }
        }
        if let Some(revision) = &self.header.revision {
            if !revision.number.is_empty() {
                attributes.insert("revnumber".to_string(), revision.number.as_str().into());
            }
            if !revision.date.is_empty() {
                attributes.insert("revdate".to_string(), revision.date.as_str().into());
            }
            if !revision.remark.is_empty() {
                attributes.insert("revremark".to_string(), revision.remark.as_str().into());
            }
        }

        let html = HtmlRenderer::new(&attributes, &self.macros).render(&self.blocks)?;

        Ok(ConvertedDocument {
            html,
            header: self.header,
            attributes,
        })
    }
}

/// A converted document: HTML plus finalized metadata
#[derive(Debug)]
pub struct ConvertedDocument {
    html: String,
    header: Header,
    attributes: BTreeMap<String, AttributeValue>,
}

impl ConvertedDocument {
    /// The rendered HTML body
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The partitioned document title, if the document has one
    pub fn document_title(&self) -> Option<&TitleParts> {
        self.header.title.as_ref()
    }

    /// Whether the document declared revision metadata
    pub fn has_revision_info(&self) -> bool {
        self.header.revision.is_some()
    }

    /// Revision date, if declared
    pub fn revision_date(&self) -> Option<&str> {
        self.header.revision.as_ref().map(|r| r.date.as_str())
    }

    /// Revision number, if declared
    pub fn revision_number(&self) -> Option<&str> {
        self.header.revision.as_ref().map(|r| r.number.as_str())
    }

    /// Revision remark, if declared
    pub fn revision_remark(&self) -> Option<&str> {
        self.header.revision.as_ref().map(|r| r.remark.as_str())
    }

    /// Author metadata, if the document declared an author
    pub fn author(&self) -> Option<&AuthorInfo> {
        self.header.author.as_ref()
    }

    /// A single finalized attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// The full finalized attribute set
    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }
}
