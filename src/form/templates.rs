//! Starter templates

use super::document::FormDocument;
use super::field::{FieldDefinition, FieldKind};
use super::field_type::FieldType;
use super::ids::IdGenerator;
use super::option::FieldOption;

/// Field blueprint without ids; options are `(label, value)` pairs
#[derive(Debug, Clone, Copy)]
pub struct TemplateField {
    pub field_type: FieldType,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub options: &'static [(&'static str, &'static str)],
}

impl TemplateField {
    const fn text(
        field_type: FieldType,
        label: &'static str,
        placeholder: &'static str,
        required: bool,
    ) -> Self {
        Self {
            field_type,
            label,
            placeholder: Some(placeholder),
            required,
            options: &[],
        }
    }

    const fn choice(
        field_type: FieldType,
        label: &'static str,
        required: bool,
        options: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            field_type,
            label,
            placeholder: None,
            required,
            options,
        }
    }

    fn build(&self, ids: &mut dyn IdGenerator) -> FieldDefinition {
        let id = ids.next_id();
        let kind = if self.field_type.has_options() {
            let options = self
                .options
                .iter()
                .map(|(label, value)| FieldOption::new(ids.next_id(), label, value))
                .collect();
            FieldKind::with_options(self.field_type, options)
                .unwrap_or_else(|| FieldKind::new(self.field_type, ids))
        } else {
            FieldKind::new(self.field_type, ids)
        };

        FieldDefinition {
            id,
            label: self.label.to_string(),
            placeholder: self.placeholder.map(str::to_string),
            required: self.required,
            kind,
        }
    }
}

/// A named starting point for a new form
#[derive(Debug, Clone, Copy)]
pub struct FormTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [TemplateField],
}

impl FormTemplate {
    pub fn find(id: &str) -> Option<&'static FormTemplate> {
        TEMPLATES.iter().find(|t| t.id == id)
    }

    /// Fresh draft document with new ids for every field and option
    pub fn instantiate(&self, ids: &mut dyn IdGenerator) -> FormDocument {
        let fields = self.fields.iter().map(|f| f.build(ids)).collect();
        FormDocument::with_content(ids, self.title, self.description, fields)
    }
}

pub const TEMPLATES: &[FormTemplate] = &[
    FormTemplate {
        id: "blank",
        name: "Blank Form",
        summary: "Start from scratch",
        title: "",
        description: "",
        fields: &[],
    },
    FormTemplate {
        id: "contact",
        name: "Contact Us",
        summary: "Collect inquiries from visitors",
        title: "Contact Us",
        description: "We'd love to hear from you! Please fill out the form below and we'll get back to you as soon as possible.",
        fields: &[
            TemplateField::text(FieldType::ShortText, "Full Name", "Enter your full name", true),
            TemplateField::text(FieldType::Email, "Email Address", "you@example.com", true),
            TemplateField::text(FieldType::ShortText, "Subject", "What is this regarding?", true),
            TemplateField::text(
                FieldType::LongText,
                "Message",
                "Tell us what you need help with...",
                true,
            ),
        ],
    },
    FormTemplate {
        id: "feedback",
        name: "Feedback",
        summary: "Gather user opinions",
        title: "Share Your Feedback",
        description: "Your feedback helps us improve! Please take a moment to share your thoughts.",
        fields: &[
            TemplateField::text(FieldType::ShortText, "Name", "Your name (optional)", false),
            TemplateField::text(FieldType::Email, "Email", "Your email (optional)", false),
            TemplateField::choice(
                FieldType::Radio,
                "How would you rate your experience?",
                true,
                &[
                    ("Excellent", "excellent"),
                    ("Good", "good"),
                    ("Average", "average"),
                    ("Poor", "poor"),
                ],
            ),
            TemplateField::text(
                FieldType::LongText,
                "What did you like most?",
                "Tell us what worked well...",
                false,
            ),
            TemplateField::text(
                FieldType::LongText,
                "What could we improve?",
                "Share your suggestions...",
                false,
            ),
        ],
    },
    FormTemplate {
        id: "survey",
        name: "Survey",
        summary: "Conduct detailed research",
        title: "Customer Survey",
        description: "Help us serve you better by answering a few questions about your experience.",
        fields: &[
            TemplateField::text(FieldType::ShortText, "Name", "Your name", true),
            TemplateField::text(FieldType::Email, "Email", "your@email.com", true),
            TemplateField::choice(
                FieldType::Dropdown,
                "How did you hear about us?",
                true,
                &[
                    ("Search Engine", "search"),
                    ("Social Media", "social"),
                    ("Friend/Family", "referral"),
                    ("Advertisement", "ad"),
                    ("Other", "other"),
                ],
            ),
            TemplateField::choice(
                FieldType::Radio,
                "How satisfied are you with our service?",
                true,
                &[
                    ("Very Satisfied", "5"),
                    ("Satisfied", "4"),
                    ("Neutral", "3"),
                    ("Dissatisfied", "2"),
                    ("Very Dissatisfied", "1"),
                ],
            ),
            TemplateField::choice(
                FieldType::Checkbox,
                "Which features do you use most?",
                false,
                &[
                    ("Dashboard", "dashboard"),
                    ("Reports", "reports"),
                    ("Analytics", "analytics"),
                    ("Integrations", "integrations"),
                ],
            ),
            TemplateField::text(
                FieldType::LongText,
                "Any additional comments?",
                "Share any other thoughts or suggestions...",
                false,
            ),
        ],
    },
];
