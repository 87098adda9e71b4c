//! The document transformer
//!
//! Orchestrates one node's pipeline: extension filter → option normalization
//! → extension registration → content load → parse → convert → field
//! extraction → record emission. Each invocation is stateless across nodes;
//! the caller drives parallelism.

use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, error, info};

use graphdoc_plugins::{register_all, ExtensionError, ExtensionRegistry};
use graphdoc_processor::{ConvertedDocument, Processor, ProcessorError};

use crate::attributes::extract_page_attributes;
use crate::graph::{BuildReporter, ContentGraph, ContentLoader, NodeIdentity, SourceNode};
use crate::options::{NormalizedOptions, OptionsCache, TransformerOptions};
use crate::record::{
    Author, DocumentFields, DocumentRecord, RecordInternal, Revision, MEDIA_TYPE, NODE_TYPE,
};

/// Terminal state of one node invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOutcome {
    /// The node's extension is not in the allow-list; nothing happened
    Skipped,
    /// A record was created and linked in the content graph
    Emitted,
    /// Conversion or extraction failed; reported, no record emitted
    Failed,
}

/// Hard failures surfaced to the caller instead of the build reporter
#[derive(Debug, Error)]
pub enum TransformError {
    /// The content loader failed
    #[error("failed to load content for {context}: {source}")]
    Load {
        /// File path or node id
        context: String,
        /// Loader failure
        #[source]
        source: anyhow::Error,
    },

    /// An extension failed to register
    #[error(transparent)]
    Extension(#[from] ExtensionError),
}

/// Collaborators for one node invocation
pub struct TransformContext<'a> {
    /// The source node under consideration
    pub node: &'a SourceNode,
    /// Content loader
    pub loader: &'a dyn ContentLoader,
    /// Content graph receiving the record
    pub graph: &'a dyn ContentGraph,
    /// Id and digest generator
    pub identity: &'a dyn NodeIdentity,
    /// Build-fatal failure sink
    pub reporter: &'a dyn BuildReporter,
}

/// The document transformer
///
/// Owns the extension registry and the option-normalization cache; otherwise
/// stateless. One instance serves a whole build.
#[derive(Default)]
pub struct AsciidocTransformer {
    registry: ExtensionRegistry,
    cache: Mutex<OptionsCache>,
}

impl AsciidocTransformer {
    /// Transformer with no registered extensions
    pub fn new() -> Self {
        Self::default()
    }

    /// Transformer resolving extension names against the given registry
    pub fn with_registry(registry: ExtensionRegistry) -> Self {
        Self {
            registry,
            cache: Mutex::new(OptionsCache::new()),
        }
    }

    /// Process one source node
    ///
    /// Returns the terminal state. Loader and extension-registration errors
    /// propagate as [`TransformError`]; parse/convert/extract failures are
    /// reported through the context's [`BuildReporter`] and yield
    /// [`TransformOutcome::Failed`].
    pub async fn on_create_node(
        &self,
        ctx: &TransformContext<'_>,
        options: &TransformerOptions,
        path_prefix: &str,
    ) -> Result<TransformOutcome, TransformError> {
        if !options.supports_extension(&ctx.node.extension) {
            debug!(
                node = %ctx.node.id,
                extension = %ctx.node.extension,
                "extension not in allow-list, skipping"
            );
            return Ok(TransformOutcome::Skipped);
        }

        let normalized = self
            .cache
            .lock()
            .unwrap()
            .get_or_normalize(options, path_prefix);

        // The processor is private to this invocation; registration repeats
        // per node and must stay sequential.
        let mut processor = Processor::new();
        register_all(
            &self.registry,
            &mut processor,
            path_prefix,
            &normalized.attributes,
            &normalized.plugins,
        )
        .await?;

        let content = ctx
            .loader
            .load_node_content(ctx.node)
            .await
            .map_err(|source| TransformError::Load {
                context: ctx.node.describe(),
                source,
            })?;

        let record = match build_record(ctx, &processor, &normalized, &content) {
            Ok(record) => record,
            Err(err) => {
                let message = format!(
                    "Error processing Asciidoc {}:\n{}",
                    ctx.node.describe(),
                    err
                );
                error!(node = %ctx.node.id, "{message}");
                ctx.reporter.panic_on_build(&message);
                return Ok(TransformOutcome::Failed);
            }
        };

        let child_id = record.id.clone();
        ctx.graph.create_node(record);
        ctx.graph.create_parent_child_link(ctx.node, &child_id);
        info!(node = %ctx.node.id, child = %child_id, "emitted document record");
        Ok(TransformOutcome::Emitted)
    }
}

/// Parse, convert, and extract one document into a record
fn build_record(
    ctx: &TransformContext<'_>,
    processor: &Processor,
    normalized: &NormalizedOptions,
    content: &str,
) -> Result<DocumentRecord, ProcessorError> {
    let parsed = processor.load(content, &normalized.processor_options())?;
    // Convert before any metadata read; conversion finalizes attributes
    let converted = parsed.convert()?;

    let title = converted
        .document_title()
        .ok_or_else(|| ProcessorError::Parse("document has no title".to_string()))?;

    let document = DocumentFields {
        title: title.combined().to_string(),
        subtitle: title.subtitle().unwrap_or("").to_string(),
        main: title.main().to_string(),
    };

    let mut record = DocumentRecord {
        id: ctx
            .identity
            .create_node_id(&format!("{} >>> ASCIIDOC", ctx.node.id)),
        parent: ctx.node.id.clone(),
        html: converted.html().to_string(),
        document,
        revision: extract_revision(&converted),
        author: extract_author(&converted),
        page_attributes: extract_page_attributes(converted.attributes()),
        internal: RecordInternal {
            type_name: NODE_TYPE.to_string(),
            media_type: MEDIA_TYPE.to_string(),
            content_digest: String::new(),
        },
    };
    record.internal.content_digest = ctx.identity.create_content_digest(&record);
    Ok(record)
}

fn extract_revision(converted: &ConvertedDocument) -> Option<Revision> {
    if !converted.has_revision_info() {
        return None;
    }
    Some(Revision {
        date: converted.revision_date().unwrap_or("").to_string(),
        number: converted.revision_number().unwrap_or("").to_string(),
        remark: converted.revision_remark().unwrap_or("").to_string(),
    })
}

fn extract_author(converted: &ConvertedDocument) -> Option<Author> {
    converted.author().map(|author| Author {
        full_name: author.full_name.clone(),
        first_name: author.first_name.clone(),
        last_name: author.last_name.clone(),
        middle_name: author.middle_name.clone(),
        author_initials: author.initials.clone(),
        email: author.email.clone(),
    })
}
