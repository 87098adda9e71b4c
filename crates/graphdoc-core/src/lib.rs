//! graphdoc-core - AsciiDoc sources into content-graph document nodes
//!
//! Given a source node's raw AsciiDoc text and plugin configuration, the
//! transformer produces a [`DocumentRecord`]: rendered HTML plus structured
//! title, optional author and revision metadata, and page-scoped attributes.
//! Records are handed to an external content graph through the collaborator
//! traits in [`graph`].
//!
//! The heavy lifting (parsing, conversion) is delegated to
//! `graphdoc-processor`; extension resolution to `graphdoc-plugins`. This
//! crate owns option normalization, attribute extraction, and the
//! per-node orchestration.

pub mod attributes;
pub mod graph;
pub mod options;
pub mod record;
pub mod transformer;

// Re-export main types
pub use attributes::{extract_page_attributes, PAGE_ATTRIBUTE_PREFIX};
pub use graph::{
    BuildReporter, ContentGraph, ContentLoader, NodeIdentity, Sha1Identity, SourceNode,
};
pub use options::{
    with_path_prefix, NormalizedOptions, OptionsCache, TransformerOptions,
    DEFAULT_FILE_EXTENSIONS,
};
pub use record::{Author, DocumentFields, DocumentRecord, Revision};

// Re-exported so downstream callers can build attribute maps without
// depending on the processor crate directly
pub use graphdoc_processor::AttributeValue;
pub use transformer::{AsciidocTransformer, TransformContext, TransformError, TransformOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
