//! Application state and core logic

use crate::platform::is_command;
use crate::ui::layout::BuilderLayout;
use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use formflow_tui::config::FormflowConfig;
use formflow_tui::form::{FieldType, UuidGenerator};
use formflow_tui::state::{AppState, EditorProperty, HeaderField, Pane};
use ratatui::layout::Rect;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Configuration the session started with
    config: FormflowConfig,
    ids: UuidGenerator,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for hit-testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    pub fn new(config: FormflowConfig) -> Self {
        let mut ids = UuidGenerator;
        let state = AppState::new(&config, &mut ids);
        tracing::info!("editing form {}", state.document().id());

        Self {
            state,
            config,
            ids,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Configuration with this session's preferences applied, if any of
    /// them differ from what was loaded
    pub fn changed_config(&self) -> Option<FormflowConfig> {
        let updated = FormflowConfig {
            show_preview: Some(self.state.show_preview),
            ..self.config.clone()
        };
        (updated.show_preview() != self.config.show_preview()).then_some(updated)
    }

    /// Record the terminal size and keep the canvas cursor on screen
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = Some((height, width));
        let rows = self.layout().canvas_rows();
        self.state.ensure_canvas_visible(rows);
    }

    fn layout(&self) -> BuilderLayout {
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        BuilderLayout::new(Rect::new(0, 0, width, height), self.state.show_preview)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Handle delete confirmation (modal)
        if self.state.pending_delete.is_some() {
            self.handle_delete_dialog_key(key);
            return Ok(());
        }

        // Handle template picker (modal)
        if self.state.template_picker.is_some() {
            self.handle_template_dialog_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        if is_command(&key) {
            if let KeyCode::Char(c) = key.code {
                self.handle_command_key(c);
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                self.state.cancel_drag(&mut self.ids);
                self.state.next_pane();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.state.cancel_drag(&mut self.ids);
                self.state.prev_pane();
                return Ok(());
            }
            _ => {}
        }

        match self.state.pane {
            Pane::Header => self.handle_header_key(key),
            Pane::Palette => self.handle_palette_key(key),
            Pane::Canvas => self.handle_canvas_key(key),
            Pane::Editor => self.handle_editor_key(key),
        }
        Ok(())
    }

    /// Shortcuts that work from every pane
    fn handle_command_key(&mut self, c: char) {
        match c.to_ascii_lowercase() {
            'c' => self.quit = true,
            's' => self.state.publish(),
            'u' => self.state.unpublish(),
            'l' => {
                let link = self.state.share_link();
                tracing::info!("share link: {link}");
                self.copy_to_clipboard(&link, "share link");
            }
            'e' => match self.state.document().snapshot_json() {
                Ok(json) => {
                    tracing::info!("exported form {}", self.state.document().id());
                    self.copy_to_clipboard(&json, "form JSON");
                }
                Err(err) => self.state.push_error(format!("Could not export form: {err}")),
            },
            'p' => self.state.toggle_preview(),
            't' => {
                self.state.cancel_drag(&mut self.ids);
                self.state.open_template_picker();
            }
            _ => {}
        }
    }

    fn handle_header_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Enter => self.state.header_field.toggle(),
            KeyCode::Backspace => self.state.header_backspace(),
            KeyCode::Esc => self.state.focus(Pane::Palette),
            KeyCode::Char(c) => self.state.header_input_char(c),
            _ => {}
        }
    }

    fn handle_palette_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.palette_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.palette_down(),
            KeyCode::Enter => self.state.palette_add(&mut self.ids),
            KeyCode::Char(' ') => self.state.palette_drag_start(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_canvas_key(&mut self, key: KeyEvent) {
        if self.state.session.is_dragging() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.state.canvas_up(),
                KeyCode::Down | KeyCode::Char('j') => self.state.canvas_down(),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.state.canvas_grab_or_drop(&mut self.ids)
                }
                KeyCode::Esc => self.state.cancel_drag(&mut self.ids),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.canvas_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.canvas_down(),
            KeyCode::Char(' ') => self.state.canvas_grab_or_drop(&mut self.ids),
            KeyCode::Enter => {
                if let Some(id) = self.state.field_id_at(self.state.canvas_index) {
                    self.state.select_field(&id);
                    self.state.focus(Pane::Editor);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.state.request_delete(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let state = &mut self.state;
        let focused = state.editor.focused(&state.session);
        let on_options = matches!(
            focused,
            Some(EditorProperty::Option(_) | EditorProperty::AddOption)
        );

        let result = match key.code {
            KeyCode::Up => state.editor.prev(&mut state.session),
            KeyCode::Down => state.editor.next(&mut state.session),
            KeyCode::Left | KeyCode::Right if focused == Some(EditorProperty::Type) => {
                let forward = key.code == KeyCode::Right;
                state
                    .editor
                    .cycle_type(&mut state.session, forward, &mut self.ids)
            }
            KeyCode::Enter => state.editor.activate(&mut state.session, &mut self.ids),
            KeyCode::Char(' ') if !focused.is_some_and(|p| p.is_text()) => {
                state.editor.activate(&mut state.session, &mut self.ids)
            }
            KeyCode::Char('+') if on_options => {
                state.editor.add_option(&mut state.session, &mut self.ids)
            }
            KeyCode::Char('-') if on_options => state.editor.remove_option(&mut state.session),
            KeyCode::Backspace => state.editor.backspace(&mut state.session),
            KeyCode::Esc => {
                state.focus(Pane::Canvas);
                Ok(())
            }
            KeyCode::Char(c) => state.editor.input_char(&mut state.session, c),
            _ => Ok(()),
        };
        state.report(result);
    }

    fn handle_delete_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.state.toggle_delete_option()
            }
            KeyCode::Enter => self.state.resolve_delete(),
            KeyCode::Esc => self.state.pending_delete = None,
            _ => {}
        }
    }

    fn handle_template_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.template_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.template_down(),
            KeyCode::Enter => self.state.apply_template(&mut self.ids),
            KeyCode::Esc => self.state.template_picker = None,
            _ => {}
        }
    }

    /// Handle a mouse event: press starts a drag, release drops it
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.has_errors()
            || self.state.pending_delete.is_some()
            || self.state.template_picker.is_some()
        {
            return Ok(());
        }

        let layout = self.layout();
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.state.status_message = None;
                match layout.pane_at(column, row) {
                    Some(Pane::Palette) => {
                        self.state.focus(Pane::Palette);
                        let hit = layout.palette_row_at(column, row);
                        if let Some(index) = hit.filter(|i| *i < FieldType::ALL.len()) {
                            self.state.palette_index = index;
                            self.state.palette_drag_start_with(FieldType::ALL[index]);
                        }
                    }
                    Some(Pane::Canvas) => {
                        self.state.focus(Pane::Canvas);
                        let hit = layout.canvas_row_at(column, row, self.state.canvas_offset);
                        if let Some(index) = hit.filter(|i| *i < self.state.document().len()) {
                            self.state.canvas_index = index;
                            self.state.canvas_grab_or_drop(&mut self.ids);
                        }
                    }
                    Some(Pane::Header) => {
                        self.state.focus(Pane::Header);
                        self.state.header_field = if row <= layout.header.y + 1 {
                            HeaderField::Title
                        } else {
                            HeaderField::Description
                        };
                    }
                    Some(Pane::Editor) => self.state.focus(Pane::Editor),
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.state.session.is_dragging() => {
                let hit = layout.canvas_row_at(column, row, self.state.canvas_offset);
                if let Some(index) = hit {
                    self.state.canvas_index = index.min(self.state.document().len());
                }
            }
            MouseEventKind::Up(MouseButton::Left) if self.state.session.is_dragging() => {
                let target = if layout.pane_at(column, row) == Some(Pane::Canvas) {
                    let len = self.state.document().len();
                    let hit = layout.canvas_row_at(column, row, self.state.canvas_offset);
                    Some(hit.unwrap_or(len).min(len))
                } else {
                    None
                };
                self.state.drop_at(target, &mut self.ids);
            }
            MouseEventKind::ScrollUp => match layout.pane_at(column, row) {
                Some(Pane::Palette) => self.state.palette_up(),
                Some(Pane::Canvas) => self.state.canvas_up(),
                _ => {}
            },
            MouseEventKind::ScrollDown => match layout.pane_at(column, row) {
                Some(Pane::Palette) => self.state.palette_down(),
                Some(Pane::Canvas) => self.state.canvas_down(),
                _ => {}
            },
            _ => {}
        }

        let rows = layout.canvas_rows();
        self.state.ensure_canvas_visible(rows);
        Ok(())
    }

    /// Copy `text` and report the outcome in the status bar or error queue
    fn copy_to_clipboard(&mut self, text: &str, what: &str) {
        match set_clipboard(text) {
            Ok(()) => self.state.status_message = Some(format!("Copied {what}")),
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err:#}");
                self.state
                    .push_error(format!("Could not copy {what} to the clipboard: {err}"));
            }
        }
    }
}

fn set_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
