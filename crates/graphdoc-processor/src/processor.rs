//! The processor: macro registration surface and the load step
//!
//! A [`Processor`] owns the set of registered block-macro handlers. Loading a
//! document snapshots that set, so a handle stays consistent even if more
//! handlers are registered afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::Block;
use crate::attributes::ProcessorOptions;
use crate::document::ParsedDocument;
use crate::error::Result;
use crate::parser::Parser;

/// A block-macro handler invoked during conversion
///
/// Handlers expand `name::target[attrs]` lines into a block. Returning
/// [`Block::Raw`] injects HTML verbatim.
pub trait BlockMacro: Send + Sync {
    /// Expand a macro invocation into a block
    fn expand(&self, target: &str, attrs: &[String]) -> Result<Block>;
}

/// An AsciiDoc processor with a mutable macro registration surface
#[derive(Default, Clone)]
pub struct Processor {
    macros: HashMap<String, Arc<dyn BlockMacro>>,
}

impl Processor {
    /// Create a processor with no registered macros
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block-macro handler
    ///
    /// A later registration for the same name replaces the earlier one, so
    /// registration order is observable.
    pub fn register_block_macro(&mut self, name: impl Into<String>, handler: Arc<dyn BlockMacro>) {
        self.macros.insert(name.into(), handler);
    }

    /// Look up a registered handler by name
    pub fn block_macro(&self, name: &str) -> Option<Arc<dyn BlockMacro>> {
        self.macros.get(name).cloned()
    }

    /// Parse source text into a document handle
    ///
    /// The handle exposes nothing but [`ParsedDocument::convert`]; all reads
    /// happen on the converted document.
    pub fn load(&self, text: &str, options: &ProcessorOptions) -> Result<ParsedDocument> {
        let parsed = Parser::new().parse(text)?;
        Ok(ParsedDocument::new(
            parsed.header,
            parsed.blocks,
            options.clone(),
            self.macros.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl BlockMacro for Upper {
        fn expand(&self, target: &str, _attrs: &[String]) -> Result<Block> {
            Ok(Block::Raw(format!("<div>{}</div>", target.to_uppercase())))
        }
    }

    #[test]
    fn test_later_registration_replaces_earlier() {
        struct Lower;
        impl BlockMacro for Lower {
            fn expand(&self, target: &str, _attrs: &[String]) -> Result<Block> {
                Ok(Block::Raw(target.to_lowercase()))
            }
        }

        let mut processor = Processor::new();
        processor.register_block_macro("shout", Arc::new(Lower));
        processor.register_block_macro("shout", Arc::new(Upper));

        let handler = processor.block_macro("shout").unwrap();
        let block = handler.expand("hi", &[]).unwrap();
        assert_eq!(block, Block::Raw("<div>HI</div>".to_string()));
    }

    #[test]
    fn test_load_snapshots_registered_macros() {
        let mut processor = Processor::new();
        let doc = processor
            .load("shout::hi[]", &ProcessorOptions::default())
            .unwrap();
        processor.register_block_macro("shout", Arc::new(Upper));

        // The handle was loaded before registration, so convert fails
        assert!(doc.convert().is_err());
    }
}
