//! Dialog components for TUI

mod base;
mod confirm_dialog;
mod error_dialog;
mod template_dialog;

pub use confirm_dialog::render_confirm_dialog;
pub use error_dialog::render_error_dialog;
pub use template_dialog::render_template_dialog;
