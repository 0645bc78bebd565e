//! Identifier generation

use uuid::Uuid;

/// Source of unique string identifiers for fields, options and forms.
/// Implementations must never hand out the same id twice.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
