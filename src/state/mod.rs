//! Builder state: the editing session and what the TUI layers on top

mod app_state;
mod editor;
mod session;

pub use app_state::*;
pub use editor::*;
pub use session::*;
