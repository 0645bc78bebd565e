//! Canvas: the ordered field list and drop targets

use super::widgets::{pane_block, render_scrollable_list};
use crate::app::App;
use formflow_tui::state::{DragSource, Pane};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let document = state.document();
    let focused = state.pane == Pane::Canvas;
    let drag = state.session.drag();
    let title = format!("Canvas ({} fields)", document.len());

    if document.is_empty() && drag.is_none() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No fields yet.",
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                "  Press Enter on a field type to add it, or Space to drag it here.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: false })
        .block(pane_block(&title, focused));
        frame.render_widget(hint, area);
        return;
    }

    let dragged_id = match drag {
        Some(DragSource::Field(id)) => Some(id.as_str()),
        _ => None,
    };
    let selected_id = state.session.selected_field_id();

    let mut items: Vec<ListItem> = document
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_dragged = dragged_id == Some(field.id.as_str());
            let marker = if is_dragged {
                "⠿ "
            } else if selected_id == Some(field.id.as_str()) {
                "▶ "
            } else {
                "  "
            };
            let label_style = if is_dragged {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC)
            } else if field.label.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{} ", field.field_type().icon()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(field.display_label().to_string(), label_style),
            ];
            if field.required {
                spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
            }
            spans.push(Span::styled(
                format!("  {}", field.field_type().label()),
                Style::default().fg(Color::DarkGray),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    if drag.is_some() {
        items.push(ListItem::new(Line::from(Span::styled(
            "  ＋ end of form",
            Style::default().fg(Color::DarkGray),
        ))));
    }

    let highlight = if drag.is_some() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let symbol = if drag.is_some() { "⇢ " } else { "" };

    let list = List::new(items)
        .block(pane_block(&title, focused))
        .highlight_style(highlight)
        .highlight_symbol(symbol);

    let selected = (focused || drag.is_some()).then_some(state.canvas_index);
    render_scrollable_list(frame, area, list, selected, state.canvas_offset);
}
