//! Processor error types

use thiserror::Error;

/// Errors reported by the parse and convert phases
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The source document could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// A block macro has no registered handler
    #[error("no handler registered for block macro '{0}'")]
    UnknownMacro(String),

    /// A registered macro handler failed during expansion
    #[error("block macro '{name}' failed: {reason}")]
    MacroFailed {
        /// Macro name
        name: String,
        /// Handler-supplied failure description
        reason: String,
    },
}

/// Result type for processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;
