//! Confirmation dialog for removing a field

use super::base::{centered_rect, key_hints, render_dialog_box};
use formflow_tui::state::PendingDelete;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render a confirmation dialog for a pending field removal
pub fn render_confirm_dialog(frame: &mut Frame, action: &PendingDelete) {
    let dialog_width = 50u16;
    let dialog_height = 10u16;
    let area = centered_rect(frame.area(), dialog_width, dialog_height);

    let max_display_len = (dialog_width - 6) as usize;
    let display_text = truncate_string(&action.label, max_display_len);

    let mut content = vec![
        Line::from(Span::styled(
            "Remove Field",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Remove this field and its settings?"),
        Line::from(Span::styled(
            format!("\"{display_text}\""),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ];

    for (is_delete, label, color) in [(false, "Cancel", Color::White), (true, "Remove", Color::Red)] {
        let is_selected = action.selected_option == is_delete;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(key_hints(&[
        ("↑↓", "select"),
        ("Enter", "confirm"),
        ("Esc", "cancel"),
    ])));

    render_dialog_box(frame, area, content, Color::Red);
}

/// Truncate a string to a maximum number of characters with ellipsis
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Email", 10), "Email");
        assert_eq!(truncate_string("How did you hear about us?", 10), "How did...");
        assert_eq!(truncate_string("ñññññññ", 5), "ññ...");
    }
}
