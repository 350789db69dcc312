//! Error type for ontology loading.
//!
//! Compilation itself never fails: unresolvable prefixes, unknown targets and
//! non-matching bullet lines all degrade to omitted constraints. The only
//! hard failures come from reading and parsing the source ontology.

use std::path::PathBuf;

/// Errors raised while loading an ontology.
#[derive(Debug, thiserror::Error)]
pub enum ShapesError {
    /// The ontology file could not be read.
    #[error("failed to read ontology {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The ontology text is not valid Turtle.
    #[error("malformed Turtle: {0}")]
    Parse(String),

    /// The in-memory triple store failed while being queried.
    #[error("triple store error: {0}")]
    Store(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = ShapesError> = std::result::Result<T, E>;
