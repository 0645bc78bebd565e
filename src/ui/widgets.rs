//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListState},
    Frame,
};

/// Render a list that keeps the selected item visible.
///
/// `offset` is the first visible row as tracked by the app state, so mouse
/// hit-testing and rendering agree on which item sits on which row.
///
/// # Example
/// ```ignore
/// let list = List::new(items).block(block);
/// render_scrollable_list(frame, area, list, Some(app.state.canvas_index), app.state.canvas_offset);
/// ```
pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    list: List,
    selected_index: Option<usize>,
    offset: usize,
) {
    let mut list_state = ListState::default()
        .with_offset(offset)
        .with_selected(selected_index);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Bordered block for a pane, highlighted when focused
pub fn pane_block(title: &str, is_focused: bool) -> Block<'static> {
    let (border, title_style) = if is_focused {
        (
            Style::default().fg(Color::Cyan),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Gray),
        )
    };

    Block::default()
        .title(ratatui::text::Span::styled(format!(" {title} "), title_style))
        .borders(Borders::ALL)
        .border_style(border)
}
