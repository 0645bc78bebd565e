//! Field editor: which properties a field exposes and how edits apply

use crate::form::{
    FieldDefinition, FieldPatch, FieldType, FormError, IdGenerator, DEFAULT_MAX_FILE_SIZE_MB,
};
use crate::state::BuilderSession;

/// Longest numeric draft accepted; keeps every value inside `u32`
const MAX_DRAFT_DIGITS: usize = 9;

/// One editable row of the field editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorProperty {
    Type,
    Label,
    Placeholder,
    Option(usize),
    AddOption,
    Required,
    MinLength,
    MaxLength,
    Min,
    Max,
    MaxFileSize,
    AllowedType(usize),
}

impl EditorProperty {
    pub fn title(&self) -> String {
        match self {
            Self::Type => "Type".to_string(),
            Self::Label => "Question".to_string(),
            Self::Placeholder => "Placeholder".to_string(),
            Self::Option(i) => format!("Option {}", i + 1),
            Self::AddOption => "Add Option".to_string(),
            Self::Required => "Required".to_string(),
            Self::MinLength => "Min Length".to_string(),
            Self::MaxLength => "Max Length".to_string(),
            Self::Min => "Min Value".to_string(),
            Self::Max => "Max Value".to_string(),
            Self::MaxFileSize => "Max File Size (MB)".to_string(),
            Self::AllowedType(_) => "Allowed".to_string(),
        }
    }

    /// Free text properties take any character
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Label | Self::Placeholder | Self::Option(_))
    }

    /// Numeric properties are edited as a draft and committed on leave
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::MinLength | Self::MaxLength | Self::Min | Self::Max | Self::MaxFileSize
        )
    }

    /// Starts a rules section in the editor
    pub fn starts_rules(&self) -> bool {
        matches!(self, Self::MinLength | Self::Min | Self::MaxFileSize)
    }
}

/// Editor rows for `field`, in display order
pub fn properties_for(field: &FieldDefinition) -> Vec<EditorProperty> {
    let field_type = field.field_type();
    let mut properties = vec![EditorProperty::Type, EditorProperty::Label];

    if let Some(options) = field.options() {
        properties.extend((0..options.len()).map(EditorProperty::Option));
        properties.push(EditorProperty::AddOption);
    } else {
        properties.push(EditorProperty::Placeholder);
    }
    properties.push(EditorProperty::Required);

    if field_type.is_text() {
        properties.extend([EditorProperty::MinLength, EditorProperty::MaxLength]);
    } else if field_type == FieldType::Number {
        properties.extend([EditorProperty::Min, EditorProperty::Max]);
    } else if field_type.is_upload() {
        properties.push(EditorProperty::MaxFileSize);
        let count = field.kind.default_mime_types().len();
        properties.extend((0..count).map(EditorProperty::AllowedType));
    }
    properties
}

/// Current value of a property as shown in the editor
pub fn display_value(field: &FieldDefinition, property: EditorProperty) -> String {
    let number = |n: Option<i64>| n.map(|n| n.to_string()).unwrap_or_default();
    let kind = &field.kind;

    match property {
        EditorProperty::Type => format!("◂ {} ▸", field.field_type().label()),
        EditorProperty::Label => field.label.clone(),
        EditorProperty::Placeholder => field.placeholder.clone().unwrap_or_default(),
        EditorProperty::Option(i) => field
            .options()
            .and_then(|options| options.get(i))
            .map(|o| format!("{} ({})", o.label, o.value))
            .unwrap_or_default(),
        EditorProperty::AddOption => "+".to_string(),
        EditorProperty::Required => checkbox(field.required).to_string(),
        EditorProperty::MinLength => number(
            kind.text_rules()
                .and_then(|r| r.min_length)
                .map(i64::from),
        ),
        EditorProperty::MaxLength => number(
            kind.text_rules()
                .and_then(|r| r.max_length)
                .map(i64::from),
        ),
        EditorProperty::Min => number(kind.number_rules().and_then(|r| r.min)),
        EditorProperty::Max => number(kind.number_rules().and_then(|r| r.max)),
        EditorProperty::MaxFileSize => kind
            .upload_rules()
            .and_then(|r| r.max_file_size_mb)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("({DEFAULT_MAX_FILE_SIZE_MB})")),
        EditorProperty::AllowedType(i) => {
            let defaults = kind.default_mime_types();
            let Some((label, mime)) = defaults.get(i) else {
                return String::new();
            };
            let allowed = kind
                .upload_rules()
                .map(|r| r.effective_types(defaults))
                .unwrap_or_default();
            format!("{} {label}", checkbox(allowed.iter().any(|t| t == mime)))
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Cursor and pending numeric input of the field editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEditor {
    pub focus: usize,
    /// Uncommitted text of the focused numeric property
    pub draft: Option<String>,
}

impl FieldEditor {
    pub fn reset(&mut self) {
        self.focus = 0;
        self.draft = None;
    }

    /// Focused property of the selected field
    pub fn focused(&self, session: &BuilderSession) -> Option<EditorProperty> {
        let field = session.selected_field()?;
        let properties = properties_for(field);
        properties
            .get(self.focus.min(properties.len().saturating_sub(1)))
            .copied()
    }

    /// Display value, preferring the uncommitted draft
    pub fn value_of(&self, field: &FieldDefinition, property: EditorProperty, focused: bool) -> String {
        match &self.draft {
            Some(draft) if focused && property.is_numeric() => draft.clone(),
            _ => display_value(field, property),
        }
    }

    pub fn next(&mut self, session: &mut BuilderSession) -> Result<(), FormError> {
        let count = self.property_count(session);
        let committed = self.commit(session);
        if count > 0 {
            self.focus = (self.focus.min(count - 1) + 1) % count;
        }
        committed
    }

    pub fn prev(&mut self, session: &mut BuilderSession) -> Result<(), FormError> {
        let count = self.property_count(session);
        let committed = self.commit(session);
        if count > 0 {
            let current = self.focus.min(count - 1);
            self.focus = if current == 0 { count - 1 } else { current - 1 };
        }
        committed
    }

    /// Type a character into the focused property
    pub fn input_char(&mut self, session: &mut BuilderSession, c: char) -> Result<(), FormError> {
        let Some(property) = self.focused(session) else {
            return Ok(());
        };
        let Some(field) = session.selected_field() else {
            return Ok(());
        };
        let field_id = field.id.clone();

        match property {
            EditorProperty::Label => {
                let mut label = field.label.clone();
                label.push(c);
                session.update_selected(FieldPatch {
                    label: Some(label),
                    ..Default::default()
                })
            }
            EditorProperty::Placeholder => {
                let mut placeholder = field.placeholder.clone().unwrap_or_default();
                placeholder.push(c);
                session.update_selected(FieldPatch {
                    placeholder: Some(Some(placeholder)),
                    ..Default::default()
                })
            }
            EditorProperty::Option(i) => {
                let Some(option) = field.options().and_then(|o| o.get(i)) else {
                    return Ok(());
                };
                let mut label = option.label.clone();
                label.push(c);
                session.document_mut().rename_option(&field_id, i, &label)
            }
            p if p.is_numeric() => {
                let mut draft = self
                    .draft
                    .take()
                    .unwrap_or_else(|| display_numeric(field, p));
                let accepts_sign = matches!(p, EditorProperty::Min | EditorProperty::Max);
                let digits = draft.trim_start_matches('-').len();
                if (c.is_ascii_digit() && digits < MAX_DRAFT_DIGITS)
                    || (c == '-' && accepts_sign && draft.is_empty())
                {
                    draft.push(c);
                }
                self.draft = Some(draft);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Delete the last character of the focused property
    pub fn backspace(&mut self, session: &mut BuilderSession) -> Result<(), FormError> {
        let Some(property) = self.focused(session) else {
            return Ok(());
        };
        let Some(field) = session.selected_field() else {
            return Ok(());
        };
        let field_id = field.id.clone();

        match property {
            EditorProperty::Label => {
                let mut label = field.label.clone();
                label.pop();
                session.update_selected(FieldPatch {
                    label: Some(label),
                    ..Default::default()
                })
            }
            EditorProperty::Placeholder => {
                let mut placeholder = field.placeholder.clone().unwrap_or_default();
                placeholder.pop();
                session.update_selected(FieldPatch {
                    placeholder: Some(Some(placeholder)),
                    ..Default::default()
                })
            }
            EditorProperty::Option(i) => {
                let Some(option) = field.options().and_then(|o| o.get(i)) else {
                    return Ok(());
                };
                let mut label = option.label.clone();
                label.pop();
                session.document_mut().rename_option(&field_id, i, &label)
            }
            p if p.is_numeric() => {
                let mut draft = self
                    .draft
                    .take()
                    .unwrap_or_else(|| display_numeric(field, p));
                draft.pop();
                self.draft = Some(draft);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Space/Enter on the focused property: toggles and buttons
    pub fn activate(
        &mut self,
        session: &mut BuilderSession,
        ids: &mut dyn IdGenerator,
    ) -> Result<(), FormError> {
        let Some(property) = self.focused(session) else {
            return Ok(());
        };
        let Some(field) = session.selected_field() else {
            return Ok(());
        };

        match property {
            EditorProperty::Required => {
                let required = !field.required;
                session.update_selected(FieldPatch {
                    required: Some(required),
                    ..Default::default()
                })
            }
            EditorProperty::AddOption => self.add_option(session, ids),
            EditorProperty::AllowedType(i) => {
                let mut kind = field.kind.clone();
                let defaults = kind.default_mime_types();
                let Some((_, mime)) = defaults.get(i) else {
                    return Ok(());
                };
                if let Some(rules) = kind.upload_rules_mut() {
                    rules.toggle_type(mime, defaults);
                }
                session.update_selected(FieldPatch {
                    kind: Some(kind),
                    ..Default::default()
                })
            }
            EditorProperty::Type => self.cycle_type(session, true, ids),
            p if p.is_numeric() => self.commit(session),
            _ => Ok(()),
        }
    }

    /// Switch the selected field to the next or previous type
    pub fn cycle_type(
        &mut self,
        session: &mut BuilderSession,
        forward: bool,
        ids: &mut dyn IdGenerator,
    ) -> Result<(), FormError> {
        let Some(field) = session.selected_field() else {
            return Ok(());
        };
        let field_id = field.id.clone();
        let current = field.field_type();
        let next = if forward { current.next() } else { current.prev() };
        self.draft = None;
        session
            .document_mut()
            .change_field_type(&field_id, next, ids)
    }

    /// Append an option to the selected field. Rows from the add button
    /// down shift by one, and the cursor moves with them.
    pub fn add_option(
        &mut self,
        session: &mut BuilderSession,
        ids: &mut dyn IdGenerator,
    ) -> Result<(), FormError> {
        let Some(field) = session.selected_field() else {
            return Ok(());
        };
        let field_id = field.id.clone();
        let button = properties_for(field)
            .iter()
            .position(|p| *p == EditorProperty::AddOption);

        session.document_mut().add_option(&field_id, ids)?;
        if button.is_some_and(|row| self.focus >= row) {
            self.focus += 1;
        }
        Ok(())
    }

    /// Remove the focused option
    pub fn remove_option(&mut self, session: &mut BuilderSession) -> Result<(), FormError> {
        let Some(EditorProperty::Option(i)) = self.focused(session) else {
            return Ok(());
        };
        let Some(field_id) = session.selected_field_id().map(str::to_string) else {
            return Ok(());
        };
        session.document_mut().remove_option(&field_id, i)?;
        Ok(())
    }

    /// Write the numeric draft into the field's rules. The draft is
    /// dropped whether or not the rules accept it.
    pub fn commit(&mut self, session: &mut BuilderSession) -> Result<(), FormError> {
        let Some(draft) = self.draft.take() else {
            return Ok(());
        };
        let Some(property) = self.focused(session) else {
            return Ok(());
        };
        let Some(field) = session.selected_field() else {
            return Ok(());
        };

        let value = draft.trim();
        let as_u32 = || value.parse::<u32>().ok();
        let as_i64 = || value.parse::<i64>().ok();
        let mut kind = field.kind.clone();

        match property {
            EditorProperty::MinLength => {
                if let Some(rules) = kind.text_rules_mut() {
                    rules.min_length = as_u32();
                }
            }
            EditorProperty::MaxLength => {
                if let Some(rules) = kind.text_rules_mut() {
                    rules.max_length = as_u32();
                }
            }
            EditorProperty::Min => {
                if let Some(rules) = kind.number_rules_mut() {
                    rules.min = as_i64();
                }
            }
            EditorProperty::Max => {
                if let Some(rules) = kind.number_rules_mut() {
                    rules.max = as_i64();
                }
            }
            EditorProperty::MaxFileSize => {
                if let Some(rules) = kind.upload_rules_mut() {
                    rules.max_file_size_mb = as_u32();
                }
            }
            _ => return Ok(()),
        }

        session.update_selected(FieldPatch {
            kind: Some(kind),
            ..Default::default()
        })
    }

    fn property_count(&self, session: &BuilderSession) -> usize {
        session
            .selected_field()
            .map(|f| properties_for(f).len())
            .unwrap_or(0)
    }
}

/// Committed numeric value without the default-size hint
fn display_numeric(field: &FieldDefinition, property: EditorProperty) -> String {
    match property {
        EditorProperty::MaxFileSize => field
            .kind
            .upload_rules()
            .and_then(|r| r.max_file_size_mb)
            .map(|n| n.to_string())
            .unwrap_or_default(),
        p => display_value(field, p),
    }
}
