//! Field type catalog

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of question a field asks. Palette order is the order of
/// [`FieldType::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    ShortText,
    LongText,
    Email,
    Number,
    Dropdown,
    Radio,
    Checkbox,
    Date,
    Image,
    Document,
}

impl FieldType {
    pub const ALL: [FieldType; 10] = [
        Self::ShortText,
        Self::LongText,
        Self::Email,
        Self::Number,
        Self::Dropdown,
        Self::Radio,
        Self::Checkbox,
        Self::Date,
        Self::Image,
        Self::Document,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ShortText => "Short Text",
            Self::LongText => "Long Text",
            Self::Email => "Email",
            Self::Number => "Number",
            Self::Dropdown => "Dropdown",
            Self::Radio => "Radio Buttons",
            Self::Checkbox => "Checkboxes",
            Self::Date => "Date",
            Self::Image => "Image Upload",
            Self::Document => "Document Upload",
        }
    }

    /// Single-glyph icon for the palette and canvas
    pub fn icon(&self) -> &'static str {
        match self {
            Self::ShortText => "T",
            Self::LongText => "¶",
            Self::Email => "@",
            Self::Number => "#",
            Self::Dropdown => "▾",
            Self::Radio => "◉",
            Self::Checkbox => "☑",
            Self::Date => "▦",
            Self::Image => "▣",
            Self::Document => "▤",
        }
    }

    /// Machine name used in the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortText => "short_text",
            Self::LongText => "long_text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Dropdown => "dropdown",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Image => "image",
            Self::Document => "document",
        }
    }

    /// Dropdown, radio and checkbox fields carry an option list
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio | Self::Checkbox)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::ShortText | Self::LongText)
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Image | Self::Document)
    }

    /// Next type in palette order (wraps)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous type in palette order (wraps)
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
