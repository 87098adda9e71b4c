//! Plugin configuration and option normalization
//!
//! Raw plugin configuration is normalized once per distinct (configuration,
//! path prefix) pair: the `imagesdir` attribute is always computed from the
//! site path prefix, never left to the caller's default. Normalized options
//! are memoized by value in an explicit, caller-owned cache.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use graphdoc_plugins::ExtensionDescriptor;
use graphdoc_processor::{AttributeValue, ProcessorOptions};

/// Extensions processed when the configuration does not name any
pub const DEFAULT_FILE_EXTENSIONS: [&str; 2] = ["adoc", "asciidoc"];

/// Default `imagesdir`, soft-set so documents may override it
const DEFAULT_IMAGES_DIR: &str = "/images@";

/// Raw plugin configuration, as supplied by the site configuration surface
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerOptions {
    /// File extensions to process; `None` means the default pair
    #[serde(default)]
    pub file_extensions: Option<Vec<String>>,
    /// Attributes merged into the processor options
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Extensions to register, in declaration order
    #[serde(default)]
    pub plugins: Vec<ExtensionDescriptor>,
}

impl TransformerOptions {
    /// Whether a node with this file extension should be processed
    ///
    /// Case-sensitive exact match against the configured list, or against
    /// [`DEFAULT_FILE_EXTENSIONS`] when unconfigured.
    pub fn supports_extension(&self, extension: &str) -> bool {
        match &self.file_extensions {
            Some(list) => list.iter().any(|e| e == extension),
            None => DEFAULT_FILE_EXTENSIONS.contains(&extension),
        }
    }
}

/// Processor-ready options derived from [`TransformerOptions`]
///
/// Immutable once built; shared via `Arc` from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOptions {
    /// Attribute set with `imagesdir` computed
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Extension descriptors, declaration order preserved
    pub plugins: Vec<ExtensionDescriptor>,
}

impl NormalizedOptions {
    /// The options handed to the processor's load step
    pub fn processor_options(&self) -> ProcessorOptions {
        ProcessorOptions {
            attributes: self.attributes.clone(),
        }
    }
}

/// Value-keyed memo cache for option normalization
///
/// Owned by the transformer rather than hidden in process-wide state, so
/// lifetime and invalidation are explicit. Deep-equal inputs share one
/// normalized instance.
#[derive(Default)]
pub struct OptionsCache {
    entries: HashMap<(TransformerOptions, String), Arc<NormalizedOptions>>,
}

impl OptionsCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize options, reusing a previous result for equal inputs
    pub fn get_or_normalize(
        &mut self,
        options: &TransformerOptions,
        path_prefix: &str,
    ) -> Arc<NormalizedOptions> {
        let key = (options.clone(), path_prefix.to_string());
        if let Some(cached) = self.entries.get(&key) {
            return Arc::clone(cached);
        }
        let normalized = Arc::new(normalize(options, path_prefix));
        self.entries.insert(key, Arc::clone(&normalized));
        normalized
    }

    /// Number of distinct cached inputs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Produce processor-ready options from raw configuration
fn normalize(options: &TransformerOptions, path_prefix: &str) -> NormalizedOptions {
    let mut attributes = options.attributes.clone();

    let imagesdir = attributes
        .get("imagesdir")
        .and_then(AttributeValue::as_str)
        .unwrap_or(DEFAULT_IMAGES_DIR)
        .to_string();
    attributes.insert(
        "imagesdir".to_string(),
        with_path_prefix(path_prefix, &imagesdir).into(),
    );

    NormalizedOptions {
        attributes,
        plugins: options.plugins.clone(),
    }
}

/// Prepend the site path prefix to a URL
///
/// Only the first doubled separator produced by the concatenation is
/// collapsed. Downstream consumers depend on this exact boundary behavior.
pub fn with_path_prefix(path_prefix: &str, url: &str) -> String {
    format!("{}{}", path_prefix, url).replacen("//", "/", 1)
}
