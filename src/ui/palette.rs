//! Field type palette

use super::widgets::{pane_block, render_scrollable_list};
use crate::app::App;
use formflow_tui::form::FieldType;
use formflow_tui::state::{DragSource, Pane};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let focused = state.pane == Pane::Palette;
    let dragged = match state.session.drag() {
        Some(DragSource::Palette(field_type)) => Some(*field_type),
        _ => None,
    };

    let items: Vec<ListItem> = FieldType::ALL
        .iter()
        .map(|field_type| {
            let style = if dragged == Some(*field_type) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", field_type.icon()), Style::default().fg(Color::Cyan)),
                Span::styled(field_type.label(), style),
            ]))
        })
        .collect();

    let highlight = if focused {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(pane_block("Fields", focused))
        .highlight_style(highlight);

    render_scrollable_list(frame, area, list, Some(state.palette_index), 0);
}
