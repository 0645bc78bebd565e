//! Layout of the builder screen and status bar

use crate::app::App;
use crate::platform::SHORTCUT_PREFIX;
use formflow_tui::state::Pane;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Header height (borders + title + description)
pub const HEADER_HEIGHT: u16 = 4;

/// Palette width (icon + longest type label + borders)
pub const PALETTE_WIDTH: u16 = 22;

/// Screen regions of the builder
///
/// ```text
/// ┌ header ─────────────────────────────────────────┐
/// └─────────────────────────────────────────────────┘
/// ┌ palette ┐┌ canvas ──────────────┐┌ editor ──────┐
/// │         ││                      │└──────────────┘
/// │         ││                      │┌ preview ─────┐
/// └─────────┘└──────────────────────┘└──────────────┘
///  status bar
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderLayout {
    pub header: Rect,
    pub palette: Rect,
    pub canvas: Rect,
    pub editor: Rect,
    pub preview: Option<Rect>,
    pub status: Rect,
}

impl BuilderLayout {
    pub fn new(area: Rect, show_preview: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Min(0),                // Body
                Constraint::Length(1),             // Status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(PALETTE_WIDTH), // Palette
                Constraint::Min(30),               // Canvas
                Constraint::Percentage(40),        // Editor + preview
            ])
            .split(rows[1]);

        let (editor, preview) = if show_preview {
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(columns[2]);
            (right[0], Some(right[1]))
        } else {
            (columns[2], None)
        };

        Self {
            header: rows[0],
            palette: columns[0],
            canvas: columns[1],
            editor,
            preview,
            status: rows[2],
        }
    }

    /// Pane under a screen position
    pub fn pane_at(&self, column: u16, row: u16) -> Option<Pane> {
        let pos = Position::new(column, row);
        if self.header.contains(pos) {
            Some(Pane::Header)
        } else if self.palette.contains(pos) {
            Some(Pane::Palette)
        } else if self.canvas.contains(pos) {
            Some(Pane::Canvas)
        } else if self.editor.contains(pos) {
            Some(Pane::Editor)
        } else {
            None
        }
    }

    /// Rows of list content inside the canvas border
    pub fn canvas_rows(&self) -> usize {
        inner(self.canvas).height as usize
    }

    /// Palette entry at a screen position
    pub fn palette_row_at(&self, column: u16, row: u16) -> Option<usize> {
        list_row_at(self.palette, column, row, 0)
    }

    /// Canvas row at a screen position, counting rows scrolled off the top
    pub fn canvas_row_at(&self, column: u16, row: u16, offset: usize) -> Option<usize> {
        list_row_at(self.canvas, column, row, offset)
    }
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn list_row_at(area: Rect, column: u16, row: u16, offset: usize) -> Option<usize> {
    let content = inner(area);
    content
        .contains(Position::new(column, row))
        .then(|| offset + (row - content.y) as usize)
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.state.pane.label()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        get_pane_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = format!(" {SHORTCUT_PREFIX}C:quit ");
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_width = quit_hint.len() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_width),
        y: area.y,
        width: quit_width.min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused pane
fn get_pane_hints(app: &App) -> String {
    let p = SHORTCUT_PREFIX;
    if app.state.session.is_dragging() {
        return "↑↓:choose spot  Space/Enter:drop  Esc:cancel".to_string();
    }
    match app.state.pane {
        Pane::Header => format!("↑↓:title/description  type to edit  {p}S:publish  {p}T:templates"),
        Pane::Palette => "↑↓:nav  Enter:add  Space:drag onto canvas  Tab:next".to_string(),
        Pane::Canvas => "↑↓:select  Space:move  Enter:edit  d:delete  Tab:next".to_string(),
        Pane::Editor => {
            "↑↓:property  type to edit  Space:toggle  ←→:type  +/-:option".to_string()
        }
    }
}
