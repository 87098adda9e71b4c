//! graphdoc-processor - Embedded AsciiDoc processor
//!
//! Parses AsciiDoc text and converts it to embedded HTML, with a mutable
//! block-macro registration surface and a two-phase document handle that
//! enforces convert-then-read.
//!
//! # Example
//!
//! ```
//! use graphdoc_processor::{Processor, ProcessorOptions};
//!
//! let processor = Processor::new();
//! let doc = processor
//!     .load("= Title\n\nBody.", &ProcessorOptions::default())
//!     .unwrap();
//! let converted = doc.convert().unwrap();
//!
//! assert_eq!(converted.document_title().unwrap().main(), "Title");
//! assert!(converted.html().contains("<p>Body.</p>"));
//! ```

pub mod ast;
pub mod attributes;
pub mod document;
pub mod error;
mod html;
mod parser;
pub mod processor;

// Re-export main types
pub use ast::{AuthorInfo, Block, Header, Inline, RevisionInfo, TitleParts};
pub use attributes::{AttributeValue, ProcessorOptions};
pub use document::{ConvertedDocument, ParsedDocument};
pub use error::{ProcessorError, Result};
pub use processor::{BlockMacro, Processor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
