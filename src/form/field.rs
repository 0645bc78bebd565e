//! Field definitions

use super::error::{FormError, Precondition};
use super::field_type::FieldType;
use super::ids::IdGenerator;
use super::option::{FieldOption, OptionPatch};
use super::rules::{NumberRules, TextRules, UploadRules, DOCUMENT_MIME_TYPES, IMAGE_MIME_TYPES};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Type tag plus the payload that type carries. Options only exist on
/// choice types and each rule set only on the types it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    ShortText {
        #[serde(default)]
        validation: TextRules,
    },
    LongText {
        #[serde(default)]
        validation: TextRules,
    },
    Email,
    Number {
        #[serde(default)]
        validation: NumberRules,
    },
    Dropdown {
        options: Vec<FieldOption>,
    },
    Radio {
        options: Vec<FieldOption>,
    },
    Checkbox {
        options: Vec<FieldOption>,
    },
    Date,
    Image {
        #[serde(default)]
        validation: UploadRules,
    },
    Document {
        #[serde(default)]
        validation: UploadRules,
    },
}

impl FieldKind {
    /// Fresh payload for a type. Choice types start with two options.
    pub fn new(field_type: FieldType, ids: &mut dyn IdGenerator) -> Self {
        match field_type {
            FieldType::ShortText => Self::ShortText {
                validation: TextRules::default(),
            },
            FieldType::LongText => Self::LongText {
                validation: TextRules::default(),
            },
            FieldType::Email => Self::Email,
            FieldType::Number => Self::Number {
                validation: NumberRules::default(),
            },
            FieldType::Dropdown => Self::Dropdown {
                options: default_options(ids),
            },
            FieldType::Radio => Self::Radio {
                options: default_options(ids),
            },
            FieldType::Checkbox => Self::Checkbox {
                options: default_options(ids),
            },
            FieldType::Date => Self::Date,
            FieldType::Image => Self::Image {
                validation: UploadRules::default(),
            },
            FieldType::Document => Self::Document {
                validation: UploadRules::default(),
            },
        }
    }

    /// Choice payload of the given type holding `options`
    pub fn with_options(field_type: FieldType, options: Vec<FieldOption>) -> Option<Self> {
        match field_type {
            FieldType::Dropdown => Some(Self::Dropdown { options }),
            FieldType::Radio => Some(Self::Radio { options }),
            FieldType::Checkbox => Some(Self::Checkbox { options }),
            _ => None,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::ShortText { .. } => FieldType::ShortText,
            Self::LongText { .. } => FieldType::LongText,
            Self::Email => FieldType::Email,
            Self::Number { .. } => FieldType::Number,
            Self::Dropdown { .. } => FieldType::Dropdown,
            Self::Radio { .. } => FieldType::Radio,
            Self::Checkbox { .. } => FieldType::Checkbox,
            Self::Date => FieldType::Date,
            Self::Image { .. } => FieldType::Image,
            Self::Document { .. } => FieldType::Document,
        }
    }

    pub fn options(&self) -> Option<&[FieldOption]> {
        match self {
            Self::Dropdown { options } | Self::Radio { options } | Self::Checkbox { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Vec<FieldOption>> {
        match self {
            Self::Dropdown { options } | Self::Radio { options } | Self::Checkbox { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn text_rules(&self) -> Option<&TextRules> {
        match self {
            Self::ShortText { validation } | Self::LongText { validation } => Some(validation),
            _ => None,
        }
    }

    pub fn number_rules(&self) -> Option<&NumberRules> {
        match self {
            Self::Number { validation } => Some(validation),
            _ => None,
        }
    }

    pub fn upload_rules(&self) -> Option<&UploadRules> {
        match self {
            Self::Image { validation } | Self::Document { validation } => Some(validation),
            _ => None,
        }
    }

    pub fn text_rules_mut(&mut self) -> Option<&mut TextRules> {
        match self {
            Self::ShortText { validation } | Self::LongText { validation } => Some(validation),
            _ => None,
        }
    }

    pub fn number_rules_mut(&mut self) -> Option<&mut NumberRules> {
        match self {
            Self::Number { validation } => Some(validation),
            _ => None,
        }
    }

    pub fn upload_rules_mut(&mut self) -> Option<&mut UploadRules> {
        match self {
            Self::Image { validation } | Self::Document { validation } => Some(validation),
            _ => None,
        }
    }

    /// Default MIME allow-list for upload types, empty for everything else
    pub fn default_mime_types(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Image { .. } => IMAGE_MIME_TYPES,
            Self::Document { .. } => DOCUMENT_MIME_TYPES,
            _ => &[],
        }
    }

    /// Check the rule payload for internal consistency and option ids for
    /// uniqueness
    pub fn check(&self) -> Result<(), Precondition> {
        match self {
            Self::ShortText { validation } | Self::LongText { validation } => validation.check(),
            Self::Number { validation } => validation.check(),
            Self::Image { validation } | Self::Document { validation } => validation.check(),
            _ => match self.options() {
                Some(options) => check_options(options),
                None => Ok(()),
            },
        }
    }

    fn normalize(&mut self) {
        if let Self::Image { validation } | Self::Document { validation } = self {
            validation.normalize();
        }
    }
}

fn check_options(options: &[FieldOption]) -> Result<(), Precondition> {
    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.id.as_str()) {
            return Err(Precondition::DuplicateOptionId(option.id.clone()));
        }
    }
    Ok(())
}

fn default_options(ids: &mut dyn IdGenerator) -> Vec<FieldOption> {
    vec![FieldOption::numbered(ids, 1), FieldOption::numbered(ids, 2)]
}

/// One question of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Partial update of a field. `None` leaves the property as it is;
/// `placeholder: Some(None)` clears the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub placeholder: Option<Option<String>>,
    pub required: Option<bool>,
    pub kind: Option<FieldKind>,
}

impl FieldDefinition {
    /// New blank field as dropped from the palette
    pub fn new(field_type: FieldType, ids: &mut dyn IdGenerator) -> Self {
        let id = ids.next_id();
        Self {
            id,
            label: String::new(),
            placeholder: Some(String::new()),
            required: false,
            kind: FieldKind::new(field_type, ids),
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn options(&self) -> Option<&[FieldOption]> {
        self.kind.options()
    }

    /// Label for display, with a stand-in for unlabeled questions
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            "Untitled Question"
        } else {
            &self.label
        }
    }

    /// Shallow merge of `patch`. Rules in a new kind are checked before
    /// anything is written.
    pub fn apply(&mut self, patch: FieldPatch) -> Result<(), FormError> {
        let kind = match patch.kind {
            Some(mut kind) => {
                kind.check()?;
                kind.normalize();
                Some(kind)
            }
            None => None,
        };

        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(kind) = kind {
            self.kind = kind;
        }
        Ok(())
    }

    /// Switch to another type. Options survive a switch between choice
    /// types unchanged; entering a choice type from elsewhere seeds the
    /// two default options. Rules never carry over.
    pub fn change_type(&mut self, field_type: FieldType, ids: &mut dyn IdGenerator) {
        if field_type == self.field_type() {
            return;
        }

        let carried = self.kind.options_mut().map(std::mem::take);
        self.kind = match carried {
            Some(options) if field_type.has_options() => {
                FieldKind::with_options(field_type, options)
                    .unwrap_or_else(|| FieldKind::new(field_type, ids))
            }
            _ => FieldKind::new(field_type, ids),
        };

        if field_type.has_options() {
            self.placeholder = None;
        } else if self.placeholder.is_none() {
            self.placeholder = Some(String::new());
        }
    }

    /// Append an auto-numbered option
    pub fn add_option(&mut self, ids: &mut dyn IdGenerator) -> Result<&FieldOption, FormError> {
        let field_type = self.field_type();
        let options = self
            .kind
            .options_mut()
            .ok_or(Precondition::NoOptions(field_type))?;
        let option = FieldOption::numbered(ids, options.len() + 1);
        options.push(option);
        Ok(&options[options.len() - 1])
    }

    /// Raw shallow merge into the option at `index`. Does not derive the
    /// value from a new label; see [`FieldDefinition::rename_option`].
    pub fn update_option(&mut self, index: usize, patch: OptionPatch) -> Result<(), FormError> {
        self.option_at_mut(index)?.merge(patch);
        Ok(())
    }

    /// Editor policy for label edits: set the label and derive the value
    pub fn rename_option(&mut self, index: usize, label: &str) -> Result<(), FormError> {
        self.option_at_mut(index)?.relabel(label);
        Ok(())
    }

    /// Remove the option at `index`. The last option of a choice field
    /// cannot be removed.
    pub fn remove_option(&mut self, index: usize) -> Result<FieldOption, FormError> {
        let field_type = self.field_type();
        let options = self
            .kind
            .options_mut()
            .ok_or(Precondition::NoOptions(field_type))?;
        if index >= options.len() {
            return Err(FormError::IndexOutOfRange {
                index,
                len: options.len(),
            });
        }
        if options.len() <= 1 {
            return Err(Precondition::LastOption(field_type).into());
        }
        Ok(options.remove(index))
    }

    fn option_at_mut(&mut self, index: usize) -> Result<&mut FieldOption, FormError> {
        let field_type = self.field_type();
        let options = self
            .kind
            .options_mut()
            .ok_or(Precondition::NoOptions(field_type))?;
        let len = options.len();
        options
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange { index, len })
    }
}
