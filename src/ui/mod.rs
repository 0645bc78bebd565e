//! UI module for rendering the TUI

mod canvas;
mod components;
mod editor;
mod header;
pub mod layout;
mod palette;
mod preview;
mod widgets;

use crate::app::App;
use components::{render_confirm_dialog, render_error_dialog, render_template_dialog};
use layout::BuilderLayout;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let layout = BuilderLayout::new(frame.area(), app.state.show_preview);

    header::draw(frame, layout.header, app);
    palette::draw(frame, layout.palette, app);
    canvas::draw(frame, layout.canvas, app);
    editor::draw(frame, layout.editor, app);
    if let Some(area) = layout.preview {
        preview::draw(frame, area, app);
    }
    layout::draw_status_bar(frame, layout.status, app);

    // Modals, topmost last
    if let Some(index) = app.state.template_picker {
        render_template_dialog(frame, index);
    }
    if let Some(pending) = &app.state.pending_delete {
        render_confirm_dialog(frame, pending);
    }
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.error_count());
    }
}
