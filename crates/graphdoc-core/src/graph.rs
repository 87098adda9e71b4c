//! Boundary collaborators
//!
//! The transformer consumes these contracts; it does not implement the
//! content graph, loader, or reporter itself. [`Sha1Identity`] is the stock
//! identity generator.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::record::DocumentRecord;

/// A source file node, as handed over by the external orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct SourceNode {
    /// Orchestrator-assigned node id
    pub id: String,
    /// File extension, without the dot
    pub extension: String,
    /// Absolute path of the source file, when known
    pub absolute_path: Option<PathBuf>,
}

impl SourceNode {
    /// Human-readable node reference for error messages
    ///
    /// Prefers the file path, falls back to the node id.
    pub fn describe(&self) -> String {
        match &self.absolute_path {
            Some(path) => format!("file {}", path.display()),
            None => format!("node {}", self.id),
        }
    }
}

/// Loads the raw text content of a source node
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// Load the node's content; awaited once per node
    async fn load_node_content(&self, node: &SourceNode) -> anyhow::Result<String>;
}

/// Receives created nodes and parent/child links
///
/// Both methods are called exactly once per successfully processed node.
pub trait ContentGraph: Send + Sync {
    /// Register a newly created document record
    fn create_node(&self, record: DocumentRecord);
    /// Link the record to its source node
    fn create_parent_child_link(&self, parent: &SourceNode, child_id: &str);
}

/// Derives node ids and content digests
pub trait NodeIdentity: Send + Sync {
    /// Deterministic node id from a seed string
    fn create_node_id(&self, seed: &str) -> String;
    /// Identity digest over the fully assembled record
    fn create_content_digest(&self, record: &DocumentRecord) -> String;
}

/// Receives build-fatal failure reports
pub trait BuildReporter: Send + Sync {
    /// Report a failure that terminates this node's processing
    fn panic_on_build(&self, message: &str);
}

/// SHA-1 based identity generator
///
/// Node ids hash the seed; content digests hash the record's canonical JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1Identity;

impl Sha1Identity {
    fn hex_digest(bytes: &[u8]) -> String {
        let mut sha = sha1_smol::Sha1::new();
        sha.update(bytes);
        sha.digest().to_string()
    }
}

impl NodeIdentity for Sha1Identity {
    fn create_node_id(&self, seed: &str) -> String {
        Self::hex_digest(seed.as_bytes())
    }

    fn create_content_digest(&self, record: &DocumentRecord) -> String {
        // Serialization of a record cannot fail: all keys are strings
        let json = serde_json::to_vec(record).unwrap();
        Self::hex_digest(&json)
    }
}
