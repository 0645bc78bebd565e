//! The form document and its ordered mutations

use super::error::{FormError, Precondition};
use super::field::{FieldDefinition, FieldPatch};
use super::field_type::FieldType;
use super::ids::IdGenerator;
use super::option::{FieldOption, OptionPatch};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Publication state of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    #[default]
    Draft,
    Published,
}

impl PublishState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        }
    }
}

/// Where [`FormDocument::insert_field`] puts a new field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InsertPosition {
    #[default]
    End,
    /// Index into the field list, clamped to `0..=len`
    Index(usize),
    /// Immediately before the field with this id; appends if it is absent
    Before(String),
}

/// A complete form: metadata plus the ordered fields it owns. Field order
/// is display and submission order. Field ids are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    id: String,
    title: String,
    description: String,
    fields: Vec<FieldDefinition>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(rename = "isPublished", serialize_with = "serialize_published")]
    state: PublishState,
    #[serde(skip_serializing_if = "Option::is_none")]
    share_url: Option<String>,
}

impl FormDocument {
    /// Empty draft
    pub fn new(ids: &mut dyn IdGenerator) -> Self {
        let now = Utc::now();
        Self {
            id: ids.next_id(),
            title: String::new(),
            description: String::new(),
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
            state: PublishState::Draft,
            share_url: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn state(&self) -> PublishState {
        self.state
    }

    pub fn is_published(&self) -> bool {
        self.state == PublishState::Published
    }

    pub fn share_url(&self) -> Option<&str> {
        self.share_url.as_deref()
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn position(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field_id)
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.touch();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
        self.touch();
    }

    /// Insert `field` and return the index it landed at
    pub fn insert_field(
        &mut self,
        field: FieldDefinition,
        position: InsertPosition,
    ) -> Result<usize, FormError> {
        if self.position(&field.id).is_some() {
            return Err(Precondition::DuplicateId(field.id).into());
        }
        field.kind.check()?;

        let index = match position {
            InsertPosition::End => self.fields.len(),
            InsertPosition::Index(index) => index.min(self.fields.len()),
            InsertPosition::Before(target) => {
                self.position(&target).unwrap_or(self.fields.len())
            }
        };
        self.fields.insert(index, field);
        self.touch();
        Ok(index)
    }

    /// Move `field_id` into the slot `target_id` occupies, shifting the
    /// fields in between by one. Moving a field onto itself does nothing.
    pub fn move_field(&mut self, field_id: &str, target_id: &str) -> Result<(), FormError> {
        let from = self
            .position(field_id)
            .ok_or_else(|| FormError::NotFound(field_id.to_string()))?;
        let to = self
            .position(target_id)
            .ok_or_else(|| FormError::NotFound(target_id.to_string()))?;

        if from == to {
            return Ok(());
        }
        if from < to {
            self.fields[from..=to].rotate_left(1);
        } else {
            self.fields[to..=from].rotate_right(1);
        }
        self.touch();
        Ok(())
    }

    /// Shallow-merge `patch` into one field. Order is untouched.
    pub fn update_field(&mut self, field_id: &str, patch: FieldPatch) -> Result<(), FormError> {
        self.field_mut(field_id)?.apply(patch)?;
        self.touch();
        Ok(())
    }

    pub fn remove_field(&mut self, field_id: &str) -> Result<FieldDefinition, FormError> {
        let index = self
            .position(field_id)
            .ok_or_else(|| FormError::NotFound(field_id.to_string()))?;
        let removed = self.fields.remove(index);
        self.touch();
        Ok(removed)
    }

    pub fn change_field_type(
        &mut self,
        field_id: &str,
        field_type: FieldType,
        ids: &mut dyn IdGenerator,
    ) -> Result<(), FormError> {
        self.field_mut(field_id)?.change_type(field_type, ids);
        self.touch();
        Ok(())
    }

    pub fn add_option(
        &mut self,
        field_id: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<FieldOption, FormError> {
        let option = self.field_mut(field_id)?.add_option(ids)?.clone();
        self.touch();
        Ok(option)
    }

    pub fn update_option(
        &mut self,
        field_id: &str,
        index: usize,
        patch: OptionPatch,
    ) -> Result<(), FormError> {
        self.field_mut(field_id)?.update_option(index, patch)?;
        self.touch();
        Ok(())
    }

    pub fn rename_option(
        &mut self,
        field_id: &str,
        index: usize,
        label: &str,
    ) -> Result<(), FormError> {
        self.field_mut(field_id)?.rename_option(index, label)?;
        self.touch();
        Ok(())
    }

    pub fn remove_option(&mut self, field_id: &str, index: usize) -> Result<FieldOption, FormError> {
        let removed = self.field_mut(field_id)?.remove_option(index)?;
        self.touch();
        Ok(removed)
    }

    /// Draft -> Published. Needs a non-blank title and at least one field;
    /// the title is checked first.
    pub fn publish(&mut self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(Precondition::MissingTitle.into());
        }
        if self.fields.is_empty() {
            return Err(Precondition::NoFields.into());
        }
        if self.state != PublishState::Published {
            self.state = PublishState::Published;
            self.touch();
        }
        Ok(())
    }

    /// Published -> Draft, unconditionally
    pub fn unpublish(&mut self) {
        if self.state != PublishState::Draft {
            self.state = PublishState::Draft;
            self.touch();
        }
    }

    /// Build and remember the public link for this form
    pub fn share_link(&mut self, base_url: &str) -> &str {
        let url = format!("{}/form/{}", base_url.trim_end_matches('/'), self.id);
        self.share_url = Some(url);
        self.touch();
        self.share_url.as_deref().unwrap_or_default()
    }

    /// Pretty JSON snapshot for export
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub(crate) fn with_content(
        ids: &mut dyn IdGenerator,
        title: &str,
        description: &str,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        let mut document = Self::new(ids);
        document.title = title.to_string();
        document.description = description.to_string();
        document.fields = fields;
        document
    }

    fn field_mut(&mut self, field_id: &str) -> Result<&mut FieldDefinition, FormError> {
        self.fields
            .iter_mut()
            .find(|f| f.id == field_id)
            .ok_or_else(|| FormError::NotFound(field_id.to_string()))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

fn serialize_published<S: Serializer>(
    state: &PublishState,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(*state == PublishState::Published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{sequential_ids, FieldKind, MockIdGenerator};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn document_with(types: &[FieldType], ids: &mut MockIdGenerator) -> FormDocument {
        let mut doc = FormDocument::new(ids);
        for field_type in types {
            let field = FieldDefinition::new(*field_type, ids);
            doc.insert_field(field, InsertPosition::End).unwrap();
        }
        doc
    }

    fn field_ids(doc: &FormDocument) -> Vec<String> {
        doc.fields().iter().map(|f| f.id.clone()).collect()
    }

    mod insert {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_inserts_grow_by_one_with_unique_ids() {
            let mut ids = sequential_ids();
            let mut doc = FormDocument::new(&mut ids);
            let positions = [
                InsertPosition::End,
                InsertPosition::Index(0),
                InsertPosition::Index(99),
                InsertPosition::Before("missing".to_string()),
                InsertPosition::Index(2),
            ];

            for (count, position) in positions.into_iter().enumerate() {
                let field = FieldDefinition::new(FieldType::ShortText, &mut ids);
                doc.insert_field(field, position).unwrap();
                assert_eq!(doc.len(), count + 1);
            }

            let unique: HashSet<String> = field_ids(&doc).into_iter().collect();
            assert_eq!(unique.len(), doc.len());
        }

        #[test]
        fn test_index_is_clamped() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email], &mut ids);
            let field = FieldDefinition::new(FieldType::Date, &mut ids);
            assert_eq!(doc.insert_field(field, InsertPosition::Index(10)).unwrap(), 1);
        }

        #[test]
        fn test_before_places_ahead_of_target() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email, FieldType::Date], &mut ids);
            let before = field_ids(&doc);
            let field = FieldDefinition::new(FieldType::Number, &mut ids);
            let new_id = field.id.clone();

            let index = doc
                .insert_field(field, InsertPosition::Before(before[1].clone()))
                .unwrap();

            assert_eq!(index, 1);
            assert_eq!(
                field_ids(&doc),
                vec![before[0].clone(), new_id, before[1].clone()]
            );
        }

        #[test]
        fn test_before_unknown_id_appends() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email], &mut ids);
            let field = FieldDefinition::new(FieldType::Number, &mut ids);
            let index = doc
                .insert_field(field, InsertPosition::Before("nope".to_string()))
                .unwrap();
            assert_eq!(index, 1);
        }

        #[test]
        fn test_duplicate_id_is_rejected() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email], &mut ids);
            let duplicate = doc.fields()[0].clone();
            let before = doc.clone();

            let err = doc
                .insert_field(duplicate.clone(), InsertPosition::End)
                .unwrap_err();

            assert_eq!(
                err,
                FormError::IllegalState(Precondition::DuplicateId(duplicate.id))
            );
            assert_eq!(doc, before);
        }

        #[test]
        fn test_insert_rejects_repeated_option_ids() {
            let mut ids = sequential_ids();
            let mut doc = FormDocument::new(&mut ids);
            let field = FieldDefinition {
                id: "f".to_string(),
                label: "Pick".to_string(),
                placeholder: None,
                required: false,
                kind: FieldKind::Checkbox {
                    options: vec![
                        FieldOption::new("o".to_string(), "A", "a"),
                        FieldOption::new("o".to_string(), "B", "b"),
                    ],
                },
            };

            let err = doc.insert_field(field, InsertPosition::End).unwrap_err();

            assert_eq!(
                err,
                FormError::IllegalState(Precondition::DuplicateOptionId("o".to_string()))
            );
            assert!(doc.is_empty());
        }
    }

    mod move_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_moving_down_shifts_intervening_fields_up() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::ShortText; 4], &mut ids);
            let ids_before = field_ids(&doc);

            doc.move_field(&ids_before[0], &ids_before[2]).unwrap();

            assert_eq!(
                field_ids(&doc),
                vec![
                    ids_before[1].clone(),
                    ids_before[2].clone(),
                    ids_before[0].clone(),
                    ids_before[3].clone(),
                ]
            );
        }

        #[test]
        fn test_moving_up_shifts_intervening_fields_down() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::ShortText; 4], &mut ids);
            let ids_before = field_ids(&doc);

            doc.move_field(&ids_before[3], &ids_before[1]).unwrap();

            assert_eq!(
                field_ids(&doc),
                vec![
                    ids_before[0].clone(),
                    ids_before[3].clone(),
                    ids_before[1].clone(),
                    ids_before[2].clone(),
                ]
            );
        }

        #[test]
        fn test_move_and_revert_keeps_untouched_order() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email; 6], &mut ids);
            let original = field_ids(&doc);
            let moved = original[1].clone();
            let neighbor = original[2].clone();

            doc.move_field(&moved, &original[4]).unwrap();
            doc.move_field(&moved, &neighbor).unwrap();

            let untouched = |order: &[String]| -> Vec<String> {
                order.iter().filter(|id| **id != moved).cloned().collect()
            };
            assert_eq!(untouched(&field_ids(&doc)), untouched(&original));
        }

        #[test]
        fn test_same_id_is_a_no_op() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email, FieldType::Date], &mut ids);
            let before = doc.clone();
            let id = before.fields()[0].id.clone();

            doc.move_field(&id, &id).unwrap();

            assert_eq!(doc, before);
        }

        #[test]
        fn test_absent_ids_report_not_found() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email, FieldType::Date], &mut ids);
            let before = doc.clone();
            let id = before.fields()[0].id.clone();

            assert_eq!(
                doc.move_field("ghost", &id).unwrap_err(),
                FormError::NotFound("ghost".to_string())
            );
            assert_eq!(
                doc.move_field(&id, "ghost").unwrap_err(),
                FormError::NotFound("ghost".to_string())
            );
            assert_eq!(doc, before);
        }
    }

    mod update_and_remove {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_update_keeps_order_and_other_fields() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email, FieldType::Date], &mut ids);
            let before = doc.clone();
            let target = before.fields()[1].id.clone();

            doc.update_field(
                &target,
                FieldPatch {
                    label: Some("Birthday".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

            assert_eq!(field_ids(&doc), field_ids(&before));
            assert_eq!(doc.fields()[0], before.fields()[0]);
            assert_eq!(doc.fields()[1].label, "Birthday");
        }

        #[test]
        fn test_update_rejects_repeated_option_ids() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Radio], &mut ids);
            let before = doc.clone();
            let target = before.fields()[0].id.clone();

            let err = doc
                .update_field(
                    &target,
                    FieldPatch {
                        kind: Some(FieldKind::Radio {
                            options: vec![
                                FieldOption::new("same".to_string(), "Yes", "yes"),
                                FieldOption::new("same".to_string(), "No", "no"),
                            ],
                        }),
                        ..Default::default()
                    },
                )
                .unwrap_err();

            assert_eq!(
                err,
                FormError::IllegalState(Precondition::DuplicateOptionId("same".to_string()))
            );
            assert_eq!(doc, before);
        }

        #[test]
        fn test_update_unknown_field() {
            let mut ids = sequential_ids();
            let mut doc = FormDocument::new(&mut ids);
            assert_eq!(
                doc.update_field("x", FieldPatch::default()).unwrap_err(),
                FormError::NotFound("x".to_string())
            );
        }

        #[test]
        fn test_remove_returns_field() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email, FieldType::Date], &mut ids);
            let target = doc.fields()[0].clone();

            let removed = doc.remove_field(&target.id).unwrap();

            assert_eq!(removed, target);
            assert_eq!(doc.len(), 1);
            assert!(doc.field(&target.id).is_none());
        }

        #[test]
        fn test_remove_unknown_field() {
            let mut ids = sequential_ids();
            let mut doc = FormDocument::new(&mut ids);
            assert!(matches!(
                doc.remove_field("x"),
                Err(FormError::NotFound(_))
            ));
        }

        #[test]
        fn test_option_wrappers_address_fields_by_id() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Radio], &mut ids);
            let field_id = doc.fields()[0].id.clone();

            doc.add_option(&field_id, &mut ids).unwrap();
            doc.rename_option(&field_id, 2, "Not Sure").unwrap();
            doc.remove_option(&field_id, 0).unwrap();

            let values: Vec<&str> = doc.fields()[0]
                .options()
                .unwrap()
                .iter()
                .map(|o| o.value.as_str())
                .collect();
            assert_eq!(values, vec!["option2", "not_sure"]);
        }

        #[test]
        fn test_mutations_bump_updated_at() {
            let mut ids = sequential_ids();
            let mut doc = FormDocument::new(&mut ids);
            let created = doc.updated_at();
            doc.set_title("Survey");
            assert!(doc.updated_at() >= created);
            assert_eq!(doc.created_at(), created);
        }
    }

    mod publication {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_blank_title_reports_missing_title() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email], &mut ids);
            for title in ["", "   \t"] {
                doc.set_title(title);
                assert_eq!(
                    doc.publish().unwrap_err(),
                    FormError::IllegalState(Precondition::MissingTitle)
                );
                assert_eq!(doc.state(), PublishState::Draft);
            }
        }

        #[test]
        fn test_no_fields_reports_no_fields() {
            let mut ids = sequential_ids();
            let mut doc = FormDocument::new(&mut ids);
            doc.set_title("Contact");
            assert_eq!(
                doc.publish().unwrap_err(),
                FormError::IllegalState(Precondition::NoFields)
            );
            assert!(!doc.is_published());
        }

        #[test]
        fn test_title_is_checked_before_fields() {
            let mut ids = sequential_ids();
            let mut doc = FormDocument::new(&mut ids);
            assert_eq!(
                doc.publish().unwrap_err(),
                FormError::IllegalState(Precondition::MissingTitle)
            );
        }

        #[test]
        fn test_publish_and_unpublish() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email], &mut ids);
            doc.set_title("Contact");

            doc.publish().unwrap();
            assert!(doc.is_published());
            doc.publish().unwrap();
            assert!(doc.is_published());

            doc.unpublish();
            assert_eq!(doc.state(), PublishState::Draft);
        }
    }

    mod export {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_share_link_uses_form_id() {
            let mut ids = sequential_ids();
            let mut doc = FormDocument::new(&mut ids);
            let url = doc.share_link("http://localhost:8080/").to_string();
            assert_eq!(url, "http://localhost:8080/form/id-1");
            assert_eq!(doc.share_url(), Some(url.as_str()));
        }

        #[test]
        fn test_snapshot_json_shape() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Dropdown], &mut ids);
            doc.set_title("Poll");

            let json: serde_json::Value =
                serde_json::from_str(&doc.snapshot_json().unwrap()).unwrap();

            assert_eq!(json["title"], "Poll");
            assert_eq!(json["isPublished"], false);
            assert!(json.get("state").is_none());
            assert_eq!(json["fields"][0]["type"], "dropdown");
            assert!(json.get("createdAt").is_some());
            assert!(json.get("shareUrl").is_none());
        }

        #[test]
        fn test_snapshot_marks_published_forms() {
            let mut ids = sequential_ids();
            let mut doc = document_with(&[FieldType::Email], &mut ids);
            doc.set_title("Signup");
            doc.publish().unwrap();

            let json: serde_json::Value =
                serde_json::from_str(&doc.snapshot_json().unwrap()).unwrap();

            assert_eq!(json["isPublished"], true);
        }
    }

    #[test]
    fn test_builder_scenario_end_to_end() {
        let mut ids = sequential_ids();
        let mut doc = FormDocument::new(&mut ids);

        let first = FieldDefinition::new(FieldType::ShortText, &mut ids);
        let first_id = first.id.clone();
        doc.insert_field(first, InsertPosition::End).unwrap();
        assert_eq!(doc.len(), 1);

        let second = FieldDefinition::new(FieldType::Email, &mut ids);
        let second_id = second.id.clone();
        doc.insert_field(second, InsertPosition::End).unwrap();
        assert_eq!(field_ids(&doc), vec![first_id.clone(), second_id.clone()]);

        doc.move_field(&second_id, &first_id).unwrap();
        assert_eq!(field_ids(&doc), vec![second_id.clone(), first_id.clone()]);

        doc.update_field(
            &first_id,
            FieldPatch {
                required: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(doc.field(&first_id).unwrap().required);
        assert_eq!(field_ids(&doc), vec![second_id.clone(), first_id.clone()]);

        doc.remove_field(&second_id).unwrap();
        assert_eq!(doc.len(), 1);
        let remaining = &doc.fields()[0];
        assert_eq!(remaining.id, first_id);
        assert_eq!(remaining.field_type(), FieldType::ShortText);
        assert!(remaining.required);
    }
}
