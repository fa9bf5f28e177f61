//! Interface for language front-ends that build declaration trees.

use crate::declaration::DeclTree;

/// Errors a front-end can report for one source unit.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// The source does not parse.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        /// Line number (1-indexed).
        line: usize,
        /// Column number (1-indexed).
        column: usize,
        /// What the parser found.
        message: String,
    },

    /// The parser could not be set up.
    #[error("language setup failed: {0}")]
    Language(String),
}

/// Turns source text into a [`DeclTree`].
///
/// Implementations are shared across files and must not keep per-file state.
pub trait Frontend: Send + Sync {
    /// Short language identifier (e.g., "java").
    fn language_id(&self) -> &str;

    /// File extensions handled, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Parses one source unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed.
    fn parse(&self, source: &str) -> Result<DeclTree, FrontendError>;

    /// Returns true if this front-end handles the given extension.
    fn handles(&self, extension: &str) -> bool {
        self.extensions().contains(&extension)
    }
}
