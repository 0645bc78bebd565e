//! Per-type validation rules

use super::error::Precondition;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted range for an upload field's size limit, in MB
pub const MAX_FILE_SIZE_RANGE: RangeInclusive<u32> = 1..=50;

/// Size limit shown when none is configured
pub const DEFAULT_MAX_FILE_SIZE_MB: u32 = 10;

pub const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("PNG", "image/png"),
    ("JPEG", "image/jpeg"),
    ("GIF", "image/gif"),
    ("WebP", "image/webp"),
];

pub const DOCUMENT_MIME_TYPES: &[(&str, &str)] = &[
    ("PDF", "application/pdf"),
    ("Word (.doc)", "application/msword"),
    (
        "Word (.docx)",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("Excel (.xls)", "application/vnd.ms-excel"),
    (
        "Excel (.xlsx)",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
];

/// Length limits for short and long text answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl TextRules {
    pub fn check(&self) -> Result<(), Precondition> {
        check_bounds(
            self.min_length.map(i64::from),
            self.max_length.map(i64::from),
        )
    }
}

/// Value limits for number answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl NumberRules {
    pub fn check(&self) -> Result<(), Precondition> {
        check_bounds(self.min, self.max)
    }
}

/// Size and type limits for image and document uploads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRules {
    #[serde(
        default,
        rename = "maxFileSize",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_file_size_mb: Option<u32>,
    /// `None` means the type's default allow-list applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_file_types: Option<Vec<String>>,
}

impl UploadRules {
    pub fn check(&self) -> Result<(), Precondition> {
        match self.max_file_size_mb {
            Some(size) if !MAX_FILE_SIZE_RANGE.contains(&size) => {
                Err(Precondition::FileSizeOutOfRange(size))
            }
            _ => Ok(()),
        }
    }

    /// An explicitly empty allow-list means "use the defaults"
    pub fn normalize(&mut self) {
        if self
            .allowed_file_types
            .as_ref()
            .is_some_and(|types| types.is_empty())
        {
            self.allowed_file_types = None;
        }
    }

    /// Allowed MIME types, falling back to `defaults` when unset
    pub fn effective_types(&self, defaults: &[(&str, &str)]) -> Vec<String> {
        match &self.allowed_file_types {
            Some(types) => types.clone(),
            None => defaults.iter().map(|(_, mime)| mime.to_string()).collect(),
        }
    }

    /// Toggle one MIME type starting from the effective list. Unchecking
    /// the last type resets the list to the defaults.
    pub fn toggle_type(&mut self, mime: &str, defaults: &[(&str, &str)]) {
        let mut types = self.effective_types(defaults);
        if let Some(pos) = types.iter().position(|t| t == mime) {
            types.remove(pos);
        } else {
            types.push(mime.to_string());
        }
        self.allowed_file_types = Some(types);
        self.normalize();
    }
}

fn check_bounds(min: Option<i64>, max: Option<i64>) -> Result<(), Precondition> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(Precondition::InvertedBounds { min, max }),
        _ => Ok(()),
    }
}
