//! Typed extension registry for graphdoc
//!
//! Extensions customize the processor before a document is converted,
//! typically by registering block-macro handlers. Configuration names an
//! ordered sequence of extensions; each name is resolved against a registry
//! and registered serially, in declaration order, because registration
//! mutates shared processor state.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! use graphdoc_plugins::{
//!     register_all, Extension, ExtensionContext, ExtensionDescriptor, ExtensionRegistry,
//! };
//! use graphdoc_processor::{AttributeValue, Block, BlockMacro, Processor};
//!
//! struct Badges;
//!
//! #[async_trait::async_trait]
//! impl Extension for Badges {
//!     async fn register(
//!         &self,
//!         ctx: ExtensionContext<'_>,
//!         _options: &BTreeMap<String, AttributeValue>,
//!     ) -> graphdoc_plugins::Result<()> {
//!         struct Badge;
//!         impl BlockMacro for Badge {
//!             fn expand(&self, target: &str, _attrs: &[String]) -> graphdoc_processor::Result<Block> {
//!                 Ok(Block::Raw(format!("<span class=\"badge\">{}</span>", target)))
//!             }
//!         }
//!         ctx.processor.register_block_macro("badge", Arc::new(Badge));
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut registry = ExtensionRegistry::new();
//! registry.insert("badges", Arc::new(Badges));
//!
//! let mut processor = Processor::new();
//! let descriptors = vec![ExtensionDescriptor::new("badges")];
//! register_all(&registry, &mut processor, "", &BTreeMap::new(), &descriptors)
//!     .await
//!     .unwrap();
//! assert!(processor.block_macro("badge").is_some());
//! # });
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use graphdoc_processor::{AttributeValue, Processor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors that can occur during extension registration
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The extension's registration callback failed
    #[error("extension '{name}' failed to register: {reason}")]
    Registration {
        /// Extension name as configured
        name: String,
        /// Failure description from the extension
        reason: String,
    },

    /// Invalid extension configuration
    #[error("invalid configuration for extension '{name}': {reason}")]
    Configuration {
        /// Extension name as configured
        name: String,
        /// What was wrong with the configuration
        reason: String,
    },
}

/// Result type for extension operations
pub type Result<T> = std::result::Result<T, ExtensionError>;

/// Configuration entry naming an extension and its options
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Registry name to resolve
    pub resolve: String,
    /// Options passed to this extension's registration callback
    #[serde(default, rename = "pluginOptions")]
    pub options: BTreeMap<String, AttributeValue>,
}

impl ExtensionDescriptor {
    /// Descriptor with a name and no options
    pub fn new(resolve: impl Into<String>) -> Self {
        Self {
            resolve: resolve.into(),
            options: BTreeMap::new(),
        }
    }
}

/// What an extension sees while registering
pub struct ExtensionContext<'a> {
    /// The processor to customize
    pub processor: &'a mut Processor,
    /// Site path prefix for the current build
    pub path_prefix: &'a str,
    /// The full normalized attribute set from the plugin configuration
    pub attributes: &'a BTreeMap<String, AttributeValue>,
}

/// A registrable extension
#[async_trait]
pub trait Extension: Send + Sync {
    /// Customize the processor; called once per document invocation
    async fn register(
        &self,
        ctx: ExtensionContext<'_>,
        options: &BTreeMap<String, AttributeValue>,
    ) -> Result<()>;
}

/// Name → extension lookup table
///
/// Resolution returns `None` for unknown names; callers treat that as a
/// silent no-op rather than an error.
#[derive(Default, Clone)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Arc<dyn Extension>>,
}

impl ExtensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extension under a name
    pub fn insert(&mut self, name: impl Into<String>, extension: Arc<dyn Extension>) {
        self.extensions.insert(name.into(), extension);
    }

    /// Resolve a configured name to its extension, if registered
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Extension>> {
        self.extensions.get(name).cloned()
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Register all configured extensions with the processor
///
/// Strictly sequential, in declaration order; each registration completes
/// before the next starts. Unresolved names are skipped. The first error is
/// returned as-is; extensions registered before it stay registered.
pub async fn register_all(
    registry: &ExtensionRegistry,
    processor: &mut Processor,
    path_prefix: &str,
    attributes: &BTreeMap<String, AttributeValue>,
    descriptors: &[ExtensionDescriptor],
) -> Result<()> {
    for descriptor in descriptors {
        let Some(extension) = registry.resolve(&descriptor.resolve) else {
            continue;
        };
        let ctx = ExtensionContext {
            processor: &mut *processor,
            path_prefix,
            attributes,
        };
        extension.register(ctx, &descriptor.options).await?;
    }
    Ok(())
}
