//! Template picker dialog

use super::base::{centered_rect, key_hints, render_dialog_box};
use formflow_tui::form::TEMPLATES;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the template list with `selected` highlighted
pub fn render_template_dialog(frame: &mut Frame, selected: usize) {
    let dialog_height = (TEMPLATES.len() as u16) * 2 + 7;
    let area = centered_rect(frame.area(), 56, dialog_height);

    let mut content = vec![
        Line::from(Span::styled(
            "Start from a Template",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "The current form will be replaced.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for (i, template) in TEMPLATES.iter().enumerate() {
        let is_selected = i == selected;
        let prefix = if is_selected { "▸ " } else { "  " };
        let name_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        content.push(Line::from(vec![
            Span::styled(format!("{prefix}{}", template.name), name_style),
            Span::styled(
                format!("  {} fields", template.fields.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        content.push(Line::from(Span::styled(
            format!("    {}", template.summary),
            Style::default().fg(Color::Gray),
        )));
    }

    content.push(Line::from(""));
    content.push(Line::from(key_hints(&[
        ("↑↓", "select"),
        ("Enter", "use"),
        ("Esc", "cancel"),
    ])));

    render_dialog_box(frame, area, content, Color::Cyan);
}
