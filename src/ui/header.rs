//! Form header: title, description and publication badge

use super::widgets::pane_block;
use crate::app::App;
use formflow_tui::form::PublishState;
use formflow_tui::state::{HeaderField, Pane};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let document = state.document();
    let focused = state.pane == Pane::Header;

    let line = |label: &'static str, value: &str, placeholder: &'static str, active: bool| {
        let mut spans = vec![Span::styled(
            format!("{label:<13}"),
            Style::default().fg(Color::DarkGray),
        )];
        if value.is_empty() && !active {
            spans.push(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::styled(value.to_string(), Style::default().fg(Color::White)));
        }
        if active {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    };

    let content = vec![
        line(
            "Title",
            document.title(),
            "Untitled Form",
            focused && state.header_field == HeaderField::Title,
        ),
        line(
            "Description",
            document.description(),
            "(optional)",
            focused && state.header_field == HeaderField::Description,
        ),
    ];

    let (badge, color) = match document.state() {
        PublishState::Draft => (" DRAFT ", Color::Yellow),
        PublishState::Published => (" PUBLISHED ", Color::Green),
    };
    let mut block = pane_block("Form", focused).title(
        Line::from(Span::styled(
            badge,
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
    );
    if let Some(url) = document.share_url() {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {url} "),
                Style::default().fg(Color::Blue),
            ))
            .alignment(Alignment::Right),
        );
    }

    frame.render_widget(Paragraph::new(content).block(block), area);
}
