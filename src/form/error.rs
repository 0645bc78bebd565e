//! Errors reported by form mutations

use super::field_type::FieldType;
use thiserror::Error;

/// Failure of a single mutation. The document is unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field '{0}' not found")]
    NotFound(String),

    #[error("no field is selected")]
    NoSelection,

    #[error("option index {index} is out of range ({len} options)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    IllegalState(#[from] Precondition),
}

/// Structural invariant an operation would have violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("please add a form title")]
    MissingTitle,

    #[error("please add at least one field")]
    NoFields,

    #[error("a {0} field needs at least one option")]
    LastOption(FieldType),

    #[error("{0} fields do not have options")]
    NoOptions(FieldType),

    #[error("field id '{0}' is already used in this form")]
    DuplicateId(String),

    #[error("option id '{0}' is used twice in this field")]
    DuplicateOptionId(String),

    #[error("minimum {min} is greater than maximum {max}")]
    InvertedBounds { min: i64, max: i64 },

    #[error("max file size {0} MB is outside 1-50 MB")]
    FileSizeOutOfRange(u32),
}
