//! Live preview of the form as a respondent sees it

use super::widgets::pane_block;
use crate::app::App;
use formflow_tui::form::{FieldDefinition, FieldKind, DEFAULT_MAX_FILE_SIZE_MB};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let document = app.state.document();
    let mut lines = Vec::new();

    let title = if document.title().is_empty() {
        "Untitled Form"
    } else {
        document.title()
    };
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    if !document.description().is_empty() {
        lines.push(Line::from(Span::styled(
            document.description().to_string(),
            Style::default().fg(Color::Gray),
        )));
    }

    for field in document.fields() {
        lines.push(Line::from(""));
        lines.extend(field_lines(field));
    }

    if !document.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[ Submit ]",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        )));
    }

    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(pane_block("Preview", false));
    frame.render_widget(preview, area);
}

/// Lines rendering one field's question and input mock-up
fn field_lines(field: &FieldDefinition) -> Vec<Line<'static>> {
    let mut label = vec![Span::styled(
        field.display_label().to_string(),
        Style::default().fg(Color::White),
    )];
    if field.required {
        label.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    let mut lines = vec![Line::from(label)];

    let input = Style::default().fg(Color::DarkGray);
    let placeholder = field.placeholder.clone().unwrap_or_default();
    let boxed = |text: String| Line::from(Span::styled(format!("[ {text:<24} ]"), input));

    match &field.kind {
        FieldKind::ShortText { .. } | FieldKind::Email | FieldKind::Number { .. } => {
            lines.push(boxed(placeholder));
        }
        FieldKind::LongText { .. } => {
            lines.push(boxed(placeholder));
            lines.push(boxed(String::new()));
        }
        FieldKind::Date => lines.push(boxed("mm/dd/yyyy".to_string())),
        FieldKind::Dropdown { .. } => {
            lines.push(boxed("Select an option ▾".to_string()));
        }
        FieldKind::Radio { options } => {
            lines.extend(
                options
                    .iter()
                    .map(|o| Line::from(Span::styled(format!("( ) {}", o.label), input))),
            );
        }
        FieldKind::Checkbox { options } => {
            lines.extend(
                options
                    .iter()
                    .map(|o| Line::from(Span::styled(format!("[ ] {}", o.label), input))),
            );
        }
        FieldKind::Image { validation } | FieldKind::Document { validation } => {
            let defaults = field.kind.default_mime_types();
            let effective = validation.effective_types(defaults);
            let allowed: Vec<&str> = defaults
                .iter()
                .filter(|(_, mime)| effective.iter().any(|t| t == mime))
                .map(|(label, _)| *label)
                .collect();
            let size = validation
                .max_file_size_mb
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);
            lines.push(Line::from(Span::styled("⇪ Click to upload", input)));
            lines.push(Line::from(Span::styled(
                format!("{} up to {size}MB", allowed.join(", ")),
                input,
            )));
        }
    }
    lines
}
