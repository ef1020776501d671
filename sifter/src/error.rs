//! Errors returned by plan compilation and sifting.

use crate::tag::TagError;

/// Failure of a sift or plan compilation.
///
/// A caller always receives either a complete, correctly gated tree or one
/// of these; partial output is never returned.
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    /// The top-level value is not a record (for example an empty `Option`).
    #[error("expected a record or a reference to one, found {found}")]
    Type { found: String },

    /// A field carries a malformed tag. The record's plan is not cached, so
    /// every call for the type fails the same way until the tag is fixed.
    #[error("invalid tag on field `{record}.{field}`: {source}")]
    TagParse {
        record: &'static str,
        field: &'static str,
        #[source]
        source: TagError,
    },

    /// The record nests itself, directly or through other records.
    #[error("record `{record}` nests itself through `{path}`")]
    CyclicType { record: &'static str, path: String },

    /// Traversal visited more field entries than the fixed ceiling.
    #[error("aborted after visiting more than {limit} fields")]
    LimitExceeded { limit: usize },

    /// A nested key would have to be created where a leaf was already written.
    #[error("output key `{path}` is already occupied by a value")]
    KeyConflict { path: String },

    /// The record's accessor disagrees with its descriptor about a field.
    #[error("field `{record}.{field}` does not match its descriptor")]
    DescriptorMismatch {
        record: &'static str,
        field: &'static str,
    },

    /// A leaf value could not be converted for output.
    #[error("failed to encode field `{field}`: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
