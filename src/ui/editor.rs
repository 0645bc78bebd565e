//! Property editor for the selected field

use super::widgets::{pane_block, render_scrollable_list};
use crate::app::App;
use formflow_tui::state::{properties_for, EditorProperty, Pane};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Width of the property title column
const TITLE_WIDTH: usize = 20;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let focused = state.pane == Pane::Editor;

    let Some(field) = state.session.selected_field() else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Select a field on the canvas to edit its properties.",
            Style::default().fg(Color::DarkGray),
        )))
        .wrap(Wrap { trim: true })
        .block(pane_block("Editor", focused));
        frame.render_widget(hint, area);
        return;
    };

    let properties = properties_for(field);
    let focus = state
        .editor
        .focus
        .min(properties.len().saturating_sub(1));

    let mut items = Vec::with_capacity(properties.len() + 1);
    let mut focus_row = 0;
    for (i, property) in properties.iter().enumerate() {
        if property.starts_rules() {
            items.push(ListItem::new(Line::from(Span::styled(
                "── Validation ──",
                Style::default().fg(Color::DarkGray),
            ))));
        }
        if i == focus {
            focus_row = items.len();
        }
        let is_active = focused && i == focus;
        let value = state.editor.value_of(field, *property, is_active);
        items.push(property_item(*property, value, is_active));
    }

    let highlight = if focused {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(pane_block(&format!("Editor · {}", field.display_label()), focused))
        .highlight_style(highlight);

    render_scrollable_list(frame, area, list, focused.then_some(focus_row), 0);
}

fn property_item(property: EditorProperty, value: String, is_active: bool) -> ListItem<'static> {
    let title_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_style = match property {
        EditorProperty::AddOption => Style::default().fg(Color::Green),
        EditorProperty::Type => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::White),
    };

    let mut spans = vec![
        Span::styled(format!(" {:<TITLE_WIDTH$}", property.title()), title_style),
        Span::styled(value, value_style),
    ];
    if is_active && (property.is_text() || property.is_numeric()) {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    ListItem::new(Line::from(spans))
}
