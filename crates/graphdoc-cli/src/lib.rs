//! graphdoc CLI - command-line interface library
//!
//! Provides the `graphdoc` binary's functionality:
//! - Convert: transform one AsciiDoc file and print its HTML or full record
//!
//! # Library usage
//!
//! ```ignore
//! use graphdoc_cli::convert_command;
//!
//! let record = convert_command(&input, "/blog", &[])?;
//! println!("{}", record.html);
//! ```
//!
//! # Binary usage
//!
//! ```bash
//! # Print rendered HTML
//! graphdoc convert post.adoc
//!
//! # Full document record as JSON, with a path prefix
//! graphdoc convert post.adoc --path-prefix /blog --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{convert_command, run_cli, OutputFormat};
