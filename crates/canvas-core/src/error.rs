//! Error types for playground operations.
//!
//! Compiling and rendering never fail. Everything here comes from
//! persistence or from user input to the snippet actions.

use miette::Diagnostic;

use crate::snippet::SnippetId;
use crate::storage::StorageError;

pub type Result<T, E = CanvasError> = std::result::Result<T, E>;

/// Main error type for canvas operations
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum CanvasError {
    /// Key-value store failure
    #[error(transparent)]
    #[diagnostic(code(canvas::storage))]
    Storage(#[from] StorageError),

    /// Stored data that does not decode
    #[error("stored snippets are not valid JSON: {0}")]
    #[diagnostic(
        code(canvas::serde),
        help("the `codeSnippets` key can be cleared to start from an empty collection")
    )]
    Serde(#[from] serde_json::Error),

    /// Snippet names must contain something other than whitespace
    #[error("snippet name is empty")]
    #[diagnostic(code(canvas::snippet::empty_name))]
    EmptySnippetName,

    /// No snippet with this id in the collection
    #[error("no snippet with id {0}")]
    #[diagnostic(code(canvas::snippet::not_found))]
    SnippetNotFound(SnippetId),

    /// Highlighter failure
    #[error("syntax highlighting failed: {0}")]
    #[diagnostic(code(canvas::highlight))]
    Highlight(String),
}
