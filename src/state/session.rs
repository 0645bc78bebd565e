//! Builder session: the document being edited plus selection and drag state

use crate::form::{
    FieldDefinition, FieldPatch, FieldType, FormDocument, FormError, FormTemplate, IdGenerator,
    InsertPosition,
};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A new field of this type, dragged from the palette
    Palette(FieldType),
    /// An existing field, by id
    Field(String),
}

/// Where a drag was released
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The canvas itself, below the last field
    Canvas,
    /// On top of an existing field
    Field(String),
}

/// Result of finishing a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released outside any drop zone, or no drag was in flight
    Cancelled,
    /// Released somewhere that leaves the order as it was
    Unchanged,
    /// A palette drop created this field
    Inserted(String),
    /// A field moved between these indices
    Moved { from: usize, to: usize },
}

/// Session state for one form being edited. Selection and the drag in
/// flight are plain data here; the document knows nothing about them.
#[derive(Debug, Clone)]
pub struct BuilderSession {
    document: FormDocument,
    selected_field_id: Option<String>,
    drag: Option<DragSource>,
}

impl BuilderSession {
    pub fn new(document: FormDocument) -> Self {
        Self {
            document,
            selected_field_id: None,
            drag: None,
        }
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.document
    }

    pub fn selected_field_id(&self) -> Option<&str> {
        self.selected_field_id.as_deref()
    }

    pub fn selected_field(&self) -> Option<&FieldDefinition> {
        self.selected_field_id
            .as_deref()
            .and_then(|id| self.document.field(id))
    }

    pub fn drag(&self) -> Option<&DragSource> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Select a field; unknown ids clear the selection
    pub fn select(&mut self, field_id: &str) {
        self.selected_field_id = self
            .document
            .field(field_id)
            .map(|field| field.id.clone());
    }

    pub fn clear_selection(&mut self) {
        self.selected_field_id = None;
    }

    /// Append a new field of `field_type` and select it
    pub fn add_field(
        &mut self,
        field_type: FieldType,
        ids: &mut dyn IdGenerator,
    ) -> Result<String, FormError> {
        self.insert_new(field_type, InsertPosition::End, ids)
    }

    /// First phase of a drag. Replaces any drag already in flight.
    pub fn drag_start(&mut self, source: DragSource) {
        tracing::debug!("drag start: {source:?}");
        self.drag = Some(source);
    }

    /// Second phase of a drag. `None` means the drop landed outside any
    /// drop zone and nothing changes.
    pub fn drag_end(
        &mut self,
        target: Option<DropTarget>,
        ids: &mut dyn IdGenerator,
    ) -> Result<DragOutcome, FormError> {
        let Some(source) = self.drag.take() else {
            return Ok(DragOutcome::Cancelled);
        };
        let Some(target) = target else {
            tracing::debug!("drag cancelled: {source:?}");
            return Ok(DragOutcome::Cancelled);
        };

        match source {
            DragSource::Palette(field_type) => {
                let position = match target {
                    DropTarget::Canvas => InsertPosition::End,
                    DropTarget::Field(id) => InsertPosition::Before(id),
                };
                let id = self.insert_new(field_type, position, ids)?;
                Ok(DragOutcome::Inserted(id))
            }
            DragSource::Field(field_id) => {
                let DropTarget::Field(target_id) = target else {
                    return Ok(DragOutcome::Unchanged);
                };
                if field_id == target_id {
                    return Ok(DragOutcome::Unchanged);
                }
                let from = self
                    .document
                    .position(&field_id)
                    .ok_or_else(|| FormError::NotFound(field_id.clone()))?;
                let to = self
                    .document
                    .position(&target_id)
                    .ok_or_else(|| FormError::NotFound(target_id.clone()))?;
                self.document.move_field(&field_id, &target_id)?;
                tracing::debug!("moved field {field_id} from {from} to {to}");
                Ok(DragOutcome::Moved { from, to })
            }
        }
    }

    /// Patch the selected field
    pub fn update_selected(&mut self, patch: FieldPatch) -> Result<(), FormError> {
        let id = self
            .selected_field_id
            .clone()
            .ok_or(FormError::NoSelection)?;
        self.document.update_field(&id, patch)
    }

    /// Remove a field, dropping the selection if it pointed there
    pub fn remove_field(&mut self, field_id: &str) -> Result<FieldDefinition, FormError> {
        let removed = self.document.remove_field(field_id)?;
        if self.selected_field_id.as_deref() == Some(field_id) {
            self.selected_field_id = None;
        }
        if self.drag == Some(DragSource::Field(field_id.to_string())) {
            self.drag = None;
        }
        tracing::debug!("removed field {field_id}");
        Ok(removed)
    }

    /// Replace the document with a fresh copy of `template`
    pub fn load_template(&mut self, template: &FormTemplate, ids: &mut dyn IdGenerator) {
        self.document = template.instantiate(ids);
        self.selected_field_id = None;
        self.drag = None;
        tracing::info!("loaded template {}", template.id);
    }

    fn insert_new(
        &mut self,
        field_type: FieldType,
        position: InsertPosition,
        ids: &mut dyn IdGenerator,
    ) -> Result<String, FormError> {
        let field = FieldDefinition::new(field_type, ids);
        let id = field.id.clone();
        let index = self.document.insert_field(field, position)?;
        self.selected_field_id = Some(id.clone());
        tracing::debug!("inserted {field_type:?} field {id} at {index}");
        Ok(id)
    }
}
