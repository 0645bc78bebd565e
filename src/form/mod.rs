//! Form domain layer
//!
//! Field definitions, the ordered form document that owns them, and the
//! mutation operations the builder applies to it. Nothing here renders or
//! persists; every operation either succeeds or leaves the document as it
//! was.

mod document;
mod error;
mod field;
mod field_type;
mod ids;
mod option;
mod rules;
mod templates;

pub use document::{FormDocument, InsertPosition, PublishState};
pub use error::{FormError, Precondition};
pub use field::{FieldDefinition, FieldKind, FieldPatch};
pub use field_type::FieldType;
pub use ids::{IdGenerator, UuidGenerator};
pub use option::{value_from_label, FieldOption, OptionPatch};
pub use rules::{
    NumberRules, TextRules, UploadRules, DEFAULT_MAX_FILE_SIZE_MB, DOCUMENT_MIME_TYPES,
    IMAGE_MIME_TYPES, MAX_FILE_SIZE_RANGE,
};
pub use templates::{FormTemplate, TemplateField, TEMPLATES};

#[cfg(test)]
pub use ids::MockIdGenerator;

/// Mock id generator handing out `id-1`, `id-2`, ...
#[cfg(test)]
pub fn sequential_ids() -> MockIdGenerator {
    prefixed_ids("id")
}

/// Mock id generator handing out `{prefix}-1`, `{prefix}-2`, ...
#[cfg(test)]
pub fn prefixed_ids(prefix: &'static str) -> MockIdGenerator {
    let mut ids = MockIdGenerator::new();
    let mut counter = 0u32;
    ids.expect_next_id().returning(move || {
        counter += 1;
        format!("{prefix}-{counter}")
    });
    ids
}
