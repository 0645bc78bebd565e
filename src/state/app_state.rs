//! Application state definitions

use crate::config::FormflowConfig;
use crate::form::{FieldType, FormDocument, FormError, FormTemplate, IdGenerator, TEMPLATES};
use crate::state::{BuilderSession, DragOutcome, DragSource, DropTarget, FieldEditor};
use std::collections::VecDeque;

/// Focusable pane of the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    Header,
    #[default]
    Palette,
    Canvas,
    Editor,
}

impl Pane {
    pub fn next(&self) -> Self {
        match self {
            Self::Header => Self::Palette,
            Self::Palette => Self::Canvas,
            Self::Canvas => Self::Editor,
            Self::Editor => Self::Header,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Header => Self::Editor,
            Self::Palette => Self::Header,
            Self::Canvas => Self::Palette,
            Self::Editor => Self::Canvas,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Header => "Form",
            Self::Palette => "Fields",
            Self::Canvas => "Canvas",
            Self::Editor => "Editor",
        }
    }
}

/// Which header line receives typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderField {
    #[default]
    Title,
    Description,
}

impl HeaderField {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Title => Self::Description,
            Self::Description => Self::Title,
        };
    }
}

/// Field removal waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub field_id: String,
    pub label: String,
    /// `true` when "Delete" is highlighted, `false` for "Cancel"
    pub selected_option: bool,
}

/// Main application state
pub struct AppState {
    pub session: BuilderSession,
    pub pane: Pane,
    pub header_field: HeaderField,

    // Cursors
    pub palette_index: usize,
    /// Canvas cursor; while dragging it may sit one past the last field
    pub canvas_index: usize,
    pub canvas_offset: usize,
    pub editor: FieldEditor,

    // Modals
    pub pending_delete: Option<PendingDelete>,
    pub template_picker: Option<usize>,
    errors: VecDeque<String>,

    // UI state
    pub status_message: Option<String>,
    pub show_preview: bool,
    pub share_base_url: String,
}

impl AppState {
    /// Start a session from the configured template, or a blank form
    pub fn new(config: &FormflowConfig, ids: &mut dyn IdGenerator) -> Self {
        let document = match config.default_template.as_deref() {
            Some(id) => match FormTemplate::find(id) {
                Some(template) => template.instantiate(ids),
                None => {
                    tracing::warn!("unknown default template '{id}', starting blank");
                    FormDocument::new(ids)
                }
            },
            None => FormDocument::new(ids),
        };

        Self {
            session: BuilderSession::new(document),
            pane: Pane::default(),
            header_field: HeaderField::default(),
            palette_index: 0,
            canvas_index: 0,
            canvas_offset: 0,
            editor: FieldEditor::default(),
            pending_delete: None,
            template_picker: None,
            errors: VecDeque::new(),
            status_message: None,
            show_preview: config.show_preview(),
            share_base_url: config.share_base_url().to_string(),
        }
    }

    pub fn document(&self) -> &FormDocument {
        self.session.document()
    }

    // Error queue

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Queue a failed operation's message and swallow the error
    pub fn report<T>(&mut self, result: Result<T, FormError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("rejected: {err}");
                self.push_error(capitalize(&err.to_string()));
                None
            }
        }
    }

    // Panes

    pub fn next_pane(&mut self) {
        self.leave_editor();
        self.pane = self.pane.next();
    }

    pub fn prev_pane(&mut self) {
        self.leave_editor();
        self.pane = self.pane.prev();
    }

    pub fn focus(&mut self, pane: Pane) {
        if self.pane != pane {
            self.leave_editor();
            self.pane = pane;
        }
    }

    /// Commit any pending numeric draft
    fn leave_editor(&mut self) {
        let result = self.editor.commit(&mut self.session);
        self.report(result);
    }

    // Header

    pub fn header_input_char(&mut self, c: char) {
        let document = self.session.document_mut();
        match self.header_field {
            HeaderField::Title => {
                let mut title = document.title().to_string();
                title.push(c);
                document.set_title(&title);
            }
            HeaderField::Description => {
                let mut description = document.description().to_string();
                description.push(c);
                document.set_description(&description);
            }
        }
    }

    pub fn header_backspace(&mut self) {
        let document = self.session.document_mut();
        match self.header_field {
            HeaderField::Title => {
                let mut title = document.title().to_string();
                title.pop();
                document.set_title(&title);
            }
            HeaderField::Description => {
                let mut description = document.description().to_string();
                description.pop();
                document.set_description(&description);
            }
        }
    }

    // Palette

    pub fn palette_up(&mut self) {
        self.palette_index = self.palette_index.saturating_sub(1);
    }

    pub fn palette_down(&mut self) {
        if self.palette_index + 1 < FieldType::ALL.len() {
            self.palette_index += 1;
        }
    }

    pub fn palette_type(&self) -> FieldType {
        FieldType::ALL[self.palette_index.min(FieldType::ALL.len() - 1)]
    }

    /// Append the highlighted field type and select it
    pub fn palette_add(&mut self, ids: &mut dyn IdGenerator) {
        self.leave_editor();
        let field_type = self.palette_type();
        let result = self.session.add_field(field_type, ids);
        if let Some(id) = self.report(result) {
            self.after_insert(&id);
        }
    }

    /// Pick up the highlighted type and move to the canvas to place it
    pub fn palette_drag_start(&mut self) {
        self.palette_drag_start_with(self.palette_type());
    }

    pub fn palette_drag_start_with(&mut self, field_type: FieldType) {
        self.session.drag_start(DragSource::Palette(field_type));
        self.canvas_index = self.document().len();
        self.pane = Pane::Canvas;
        self.status_message = Some(format!("Placing {}", field_type.label()));
    }

    // Canvas

    /// Last valid canvas cursor position
    fn canvas_max(&self) -> usize {
        let len = self.document().len();
        if self.session.is_dragging() {
            len
        } else {
            len.saturating_sub(1)
        }
    }

    pub fn canvas_up(&mut self) {
        if self.canvas_index > 0 {
            self.canvas_index = self.canvas_index.min(self.canvas_max()).saturating_sub(1);
            self.sync_canvas_selection();
        }
    }

    pub fn canvas_down(&mut self) {
        if self.canvas_index < self.canvas_max() {
            self.canvas_index += 1;
            self.sync_canvas_selection();
        }
    }

    /// Select the field under the cursor, unless a drag is in flight
    fn sync_canvas_selection(&mut self) {
        if self.session.is_dragging() {
            return;
        }
        if let Some(id) = self.field_id_at(self.canvas_index) {
            self.select_field(&id);
        }
    }

    pub fn field_id_at(&self, index: usize) -> Option<String> {
        self.document().fields().get(index).map(|f| f.id.clone())
    }

    /// Select a field for editing
    pub fn select_field(&mut self, field_id: &str) {
        if self.session.selected_field_id() == Some(field_id) {
            return;
        }
        self.leave_editor();
        self.session.select(field_id);
        self.editor.reset();
        if let Some(index) = self.document().position(field_id) {
            self.canvas_index = index;
        }
    }

    /// Space on the canvas: grab the field under the cursor, or drop
    /// whatever is being dragged
    pub fn canvas_grab_or_drop(&mut self, ids: &mut dyn IdGenerator) {
        if self.session.is_dragging() {
            self.drop_at(Some(self.canvas_index), ids);
            return;
        }
        if let Some(id) = self.field_id_at(self.canvas_index) {
            self.select_field(&id);
            self.session.drag_start(DragSource::Field(id));
            self.status_message = Some("Moving field: ↑↓ to choose a spot, Space to drop".into());
        }
    }

    /// Finish a drag over canvas row `row`, where a row past the last
    /// field is the canvas itself and `None` is outside any drop zone
    pub fn drop_at(&mut self, row: Option<usize>, ids: &mut dyn IdGenerator) {
        self.leave_editor();
        let target = row.map(|row| match self.field_id_at(row) {
            Some(id) => DropTarget::Field(id),
            None => DropTarget::Canvas,
        });

        let result = self.session.drag_end(target, ids);
        match self.report(result) {
            Some(DragOutcome::Inserted(id)) => self.after_insert(&id),
            Some(DragOutcome::Moved { from, to }) => {
                self.canvas_index = to;
                self.status_message = Some(format!("Moved field {} → {}", from + 1, to + 1));
            }
            Some(DragOutcome::Cancelled) => {
                self.status_message = Some("Drag cancelled".to_string());
            }
            Some(DragOutcome::Unchanged) | None => {}
        }
        self.clamp_canvas_index();
    }

    pub fn cancel_drag(&mut self, ids: &mut dyn IdGenerator) {
        if self.session.is_dragging() {
            self.drop_at(None, ids);
        }
    }

    fn after_insert(&mut self, field_id: &str) {
        self.editor.reset();
        if let Some(index) = self.document().position(field_id) {
            self.canvas_index = index;
        }
        if let Some(field) = self.document().field(field_id) {
            self.status_message = Some(format!("Added {}", field.field_type().label()));
        }
    }

    fn clamp_canvas_index(&mut self) {
        self.canvas_index = self.canvas_index.min(self.canvas_max());
    }

    /// Keep the canvas cursor within a window of `visible` rows
    pub fn ensure_canvas_visible(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.canvas_index < self.canvas_offset {
            self.canvas_offset = self.canvas_index;
        } else if self.canvas_index >= self.canvas_offset + visible {
            self.canvas_offset = self.canvas_index + 1 - visible;
        }
    }

    // Deletion

    /// Ask before removing the field under the canvas cursor
    pub fn request_delete(&mut self) {
        if self.session.is_dragging() {
            return;
        }
        if let Some(field) = self.document().fields().get(self.canvas_index) {
            self.pending_delete = Some(PendingDelete {
                field_id: field.id.clone(),
                label: field.display_label().to_string(),
                selected_option: false,
            });
        }
    }

    pub fn toggle_delete_option(&mut self) {
        if let Some(pending) = &mut self.pending_delete {
            pending.selected_option = !pending.selected_option;
        }
    }

    /// Close the confirmation, removing the field if "Delete" was chosen
    pub fn resolve_delete(&mut self) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        if !pending.selected_option {
            return;
        }
        if self.session.selected_field_id() == Some(pending.field_id.as_str()) {
            self.editor.reset();
        }
        let result = self.session.remove_field(&pending.field_id);
        if self.report(result).is_some() {
            self.status_message = Some(format!("Removed \"{}\"", pending.label));
        }
        self.clamp_canvas_index();
    }

    // Publication and export

    pub fn publish(&mut self) {
        self.leave_editor();
        let result = self.session.document_mut().publish();
        if self.report(result).is_some() {
            tracing::info!("published form {}", self.document().id());
            self.status_message = Some("Form published".to_string());
        }
    }

    pub fn unpublish(&mut self) {
        self.session.document_mut().unpublish();
        tracing::info!("unpublished form {}", self.document().id());
        self.status_message = Some("Form returned to draft".to_string());
    }

    /// Share link for the form, generated on first request
    pub fn share_link(&mut self) -> String {
        let base = self.share_base_url.clone();
        self.session.document_mut().share_link(&base).to_string()
    }

    pub fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
    }

    // Templates

    pub fn open_template_picker(&mut self) {
        self.template_picker = Some(0);
    }

    pub fn template_up(&mut self) {
        if let Some(index) = &mut self.template_picker {
            *index = index.saturating_sub(1);
        }
    }

    pub fn template_down(&mut self) {
        if let Some(index) = &mut self.template_picker {
            if *index + 1 < TEMPLATES.len() {
                *index += 1;
            }
        }
    }

    /// Replace the form with the highlighted template
    pub fn apply_template(&mut self, ids: &mut dyn IdGenerator) {
        let Some(index) = self.template_picker.take() else {
            return;
        };
        let Some(template) = TEMPLATES.get(index) else {
            return;
        };
        self.session.load_template(template, ids);
        self.editor.reset();
        self.canvas_index = 0;
        self.canvas_offset = 0;
        self.pending_delete = None;
        self.status_message = Some(format!("Loaded \"{}\" template", template.name));
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{prefixed_ids, sequential_ids, MockIdGenerator, PublishState};
    use pretty_assertions::assert_eq;

    fn blank() -> (AppState, MockIdGenerator) {
        let mut ids = sequential_ids();
        let state = AppState::new(&FormflowConfig::default(), &mut ids);
        (state, ids)
    }

    fn labels(state: &AppState) -> Vec<String> {
        state
            .document()
            .fields()
            .iter()
            .map(|f| f.label.clone())
            .collect()
    }

    fn with_labeled_fields(names: &[&str]) -> (AppState, MockIdGenerator) {
        let (mut state, mut ids) = blank();
        for name in names {
            state.palette_add(&mut ids);
            let id = state.session.selected_field_id().unwrap().to_string();
            state
                .session
                .document_mut()
                .update_field(
                    &id,
                    crate::form::FieldPatch {
                        label: Some(name.to_string()),
                        ..Default::default()
                    },
                )
                .unwrap();
        }
        (state, ids)
    }

    mod startup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_defaults() {
            let (state, _) = blank();
            assert!(state.document().is_empty());
            assert_eq!(state.pane, Pane::Palette);
            assert!(state.show_preview);
            assert_eq!(state.share_base_url, "http://localhost:8080");
            assert!(!state.has_errors());
        }

        #[test]
        fn test_default_template_from_config() {
            let config = FormflowConfig {
                default_template: Some("contact".to_string()),
                show_preview: Some(false),
                ..Default::default()
            };
            let state = AppState::new(&config, &mut sequential_ids());
            assert_eq!(state.document().title(), "Contact Us");
            assert_eq!(state.document().len(), 4);
            assert!(!state.show_preview);
        }

        #[test]
        fn test_unknown_template_starts_blank() {
            let config = FormflowConfig {
                default_template: Some("quiz".to_string()),
                ..Default::default()
            };
            let state = AppState::new(&config, &mut sequential_ids());
            assert!(state.document().is_empty());
        }
    }

    mod panes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_cycle() {
            let mut pane = Pane::Header;
            for _ in 0..4 {
                pane = pane.next();
            }
            assert_eq!(pane, Pane::Header);
            assert_eq!(Pane::Header.prev(), Pane::Editor);
        }

        #[test]
        fn test_leaving_editor_commits_draft() {
            let (mut state, mut ids) = blank();
            state.palette_add(&mut ids);
            state.focus(Pane::Editor);
            state.editor.focus = 4; // MinLength
            state.editor.input_char(&mut state.session, '3').unwrap();

            state.next_pane();

            let rules = state.session.selected_field().unwrap().kind.text_rules().unwrap();
            assert_eq!(rules.min_length, Some(3));
        }
    }

    mod header {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_title_and_description() {
            let (mut state, _) = blank();
            for c in "Poll".chars() {
                state.header_input_char(c);
            }
            state.header_backspace();
            state.header_field.toggle();
            state.header_input_char('x');

            assert_eq!(state.document().title(), "Pol");
            assert_eq!(state.document().description(), "x");
        }
    }

    mod palette {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_cursor_bounds() {
            let (mut state, _) = blank();
            state.palette_up();
            assert_eq!(state.palette_index, 0);
            for _ in 0..20 {
                state.palette_down();
            }
            assert_eq!(state.palette_type(), FieldType::Document);
        }

        #[test]
        fn test_add_appends_and_selects() {
            let (mut state, mut ids) = blank();
            state.palette_index = 4; // Dropdown
            state.palette_add(&mut ids);
            state.palette_add(&mut ids);

            assert_eq!(state.document().len(), 2);
            assert_eq!(state.canvas_index, 1);
            let selected = state.session.selected_field().unwrap();
            assert_eq!(selected.field_type(), FieldType::Dropdown);
            assert_eq!(state.status_message.as_deref(), Some("Added Dropdown"));
        }
    }

    mod keyboard_drag {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_palette_drag_places_before_cursor_field() {
            let (mut state, mut ids) = with_labeled_fields(&["A", "B"]);
            state.palette_index = 7; // Date
            state.palette_drag_start();
            assert_eq!(state.pane, Pane::Canvas);
            assert_eq!(state.canvas_index, 2);

            state.canvas_up();
            state.canvas_grab_or_drop(&mut ids);

            assert_eq!(state.document().fields()[1].field_type(), FieldType::Date);
            assert_eq!(state.canvas_index, 1);
            assert!(!state.session.is_dragging());
        }

        #[test]
        fn test_palette_drag_onto_end_row_appends() {
            let (mut state, mut ids) = with_labeled_fields(&["A"]);
            state.palette_drag_start();
            state.canvas_grab_or_drop(&mut ids);

            assert_eq!(state.document().len(), 2);
            assert_eq!(state.canvas_index, 1);
        }

        #[test]
        fn test_move_field_down() {
            let (mut state, mut ids) = with_labeled_fields(&["A", "B", "C"]);
            state.canvas_index = 0;
            state.canvas_grab_or_drop(&mut ids);
            state.canvas_down();
            state.canvas_down();
            state.canvas_grab_or_drop(&mut ids);

            assert_eq!(labels(&state), vec!["B", "C", "A"]);
            assert_eq!(state.canvas_index, 2);
            assert_eq!(state.status_message.as_deref(), Some("Moved field 1 → 3"));
        }

        #[test]
        fn test_cursor_does_not_reselect_while_dragging() {
            let (mut state, mut ids) = with_labeled_fields(&["A", "B"]);
            state.canvas_index = 0;
            state.canvas_grab_or_drop(&mut ids);
            let grabbed = state.session.selected_field_id().map(str::to_string);

            state.canvas_down();

            assert_eq!(state.session.selected_field_id().map(str::to_string), grabbed);
        }

        #[test]
        fn test_cancel_leaves_document_alone() {
            let (mut state, mut ids) = with_labeled_fields(&["A", "B"]);
            state.canvas_index = 1;
            state.canvas_grab_or_drop(&mut ids);
            state.canvas_up();
            state.cancel_drag(&mut ids);

            assert_eq!(labels(&state), vec!["A", "B"]);
            assert!(!state.session.is_dragging());
            assert_eq!(state.status_message.as_deref(), Some("Drag cancelled"));
        }

        #[test]
        fn test_cursor_clamped_after_drag_ends() {
            let (mut state, mut ids) = with_labeled_fields(&["A"]);
            state.canvas_index = 0;
            state.canvas_grab_or_drop(&mut ids);
            state.canvas_down();
            assert_eq!(state.canvas_index, 1);

            state.canvas_grab_or_drop(&mut ids);

            assert_eq!(state.canvas_index, 0);
        }
    }

    mod deletion {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_cancel_keeps_field() {
            let (mut state, _) = with_labeled_fields(&["A"]);
            state.request_delete();
            state.resolve_delete();
            assert_eq!(state.document().len(), 1);
            assert!(state.pending_delete.is_none());
        }

        #[test]
        fn test_confirm_removes_and_clears_selection() {
            let (mut state, _) = with_labeled_fields(&["A", "B"]);
            state.canvas_index = 1;
            state.request_delete();
            assert_eq!(state.pending_delete.as_ref().unwrap().label, "B");

            state.toggle_delete_option();
            state.resolve_delete();

            assert_eq!(labels(&state), vec!["A"]);
            assert!(state.session.selected_field_id().is_none());
            assert_eq!(state.canvas_index, 0);
        }

        #[test]
        fn test_no_request_on_empty_canvas() {
            let (mut state, _) = blank();
            state.request_delete();
            assert!(state.pending_delete.is_none());
        }
    }

    mod publication {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_publish_without_title_queues_error() {
            let (mut state, _) = with_labeled_fields(&["A"]);
            state.publish();

            assert_eq!(state.document().state(), PublishState::Draft);
            assert_eq!(state.current_error(), Some("Please add a form title"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_publish_then_unpublish() {
            let (mut state, _) = with_labeled_fields(&["A"]);
            state.header_input_char('T');
            state.publish();
            assert!(state.document().is_published());
            assert_eq!(state.status_message.as_deref(), Some("Form published"));

            state.unpublish();
            assert!(!state.document().is_published());
        }

        #[test]
        fn test_share_link_uses_configured_base() {
            let mut ids = prefixed_ids("form");
            let config = FormflowConfig {
                share_base_url: Some("https://forms.example.com/".to_string()),
                ..Default::default()
            };
            let mut state = AppState::new(&config, &mut ids);
            let id = state.document().id().to_string();

            assert_eq!(
                state.share_link(),
                format!("https://forms.example.com/form/{id}")
            );
        }

        #[test]
        fn test_errors_queue_in_order() {
            let (mut state, _) = blank();
            state.push_error("first");
            state.push_error("second");
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
        }
    }

    mod templates {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_apply_template_replaces_form() {
            let (mut state, mut ids) = with_labeled_fields(&["A"]);
            state.open_template_picker();
            state.template_down();
            state.template_down();
            state.apply_template(&mut ids);

            assert_eq!(state.document().title(), "Share Your Feedback");
            assert!(state.template_picker.is_none());
            assert!(state.session.selected_field_id().is_none());
            assert_eq!(
                state.status_message.as_deref(),
                Some("Loaded \"Feedback\" template")
            );
        }

        #[test]
        fn test_picker_bounds() {
            let (mut state, _) = blank();
            state.open_template_picker();
            state.template_up();
            assert_eq!(state.template_picker, Some(0));
            for _ in 0..10 {
                state.template_down();
            }
            assert_eq!(state.template_picker, Some(TEMPLATES.len() - 1));
        }
    }

    #[test]
    fn test_ensure_canvas_visible() {
        let (mut state, _) = blank();
        state.canvas_index = 12;
        state.ensure_canvas_visible(5);
        assert_eq!(state.canvas_offset, 8);
        state.canvas_index = 3;
        state.ensure_canvas_visible(5);
        assert_eq!(state.canvas_offset, 3);
    }
}
