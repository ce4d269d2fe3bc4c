//! Primary error enum for structural merge failures.

use figment::Error as FigmentError;
use thiserror::Error;

/// Errors that abort a merge before any field is visited.
///
/// Field-level mismatches are never reported here; they surface as keys left
/// in the returned diff.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResidueError {
    /// The input was not well-formed JSON.
    #[error("Failed to decode JSON document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The document decoded, but its root is not a JSON object.
    #[error("Expected a JSON object at the document root, found {found}")]
    NotAnObject {
        /// Name of the JSON type found at the root.
        found: &'static str,
    },

    /// Merge options could not be gathered from their providers.
    #[error("Failed to load merge options: {0}")]
    Options(#[from] Box<FigmentError>),
}
